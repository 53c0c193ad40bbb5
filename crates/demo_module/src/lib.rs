//! Demonstration backend module for `translit`.
//!
//! Builds as `libtranslitkana.so` (`translitkana.dll` on Windows). Dropped
//! into a directory on the module search path it provides backend `kana`:
//!
//! * transliterators `kana:Latin-Katakana` and `kana:Latin-Hiragana`
//! * filters `kana:ja:romaji` and `kana:ja:romaji-hiragana`

use translit::ModuleRegistrar;

mod filter;
mod romaji;
mod transliterator;

pub use filter::{LANGUAGE, RomajiFilter};
pub use romaji::Script;
pub use transliterator::KanaTransliterator;

/// Backend name this module registers.
pub const BACKEND: &str = "kana";

/// Registers the `kana` filter and transliterator backends.
pub fn register(registrar: &mut ModuleRegistrar) {
	registrar.register_filter(BACKEND, |config| Ok(Box::new(RomajiFilter::new(config)?)));
	registrar.register_transliterator(BACKEND, |config| {
		Ok(Box::new(KanaTransliterator::new(config)?))
	});
	tracing::debug!(backend = BACKEND, "registered kana backends");
}

fn unload() {
	tracing::debug!(backend = BACKEND, "kana module unloaded");
}

translit::declare_module!(register, unload);

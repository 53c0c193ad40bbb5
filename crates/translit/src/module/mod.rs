//! Backend modules: discovery, opening, and the entry-point ABI.
//!
//! A module is a shared library exporting two unmangled functions:
//!
//! * [`LOAD_SYMBOL`] (`translit_module_load`): called exactly once after the
//!   library is opened, with a pointer to a [`ModuleRegistrar`]. The module
//!   registers its filter and transliterator constructors there.
//! * [`UNLOAD_SYMBOL`] (`translit_module_unload`): called only from
//!   [`crate::Context::shutdown`], to release module-global resources.
//!
//! The registrar is a plain Rust value, so modules must be compiled against
//! the same `translit` version with the same toolchain as the host. Use
//! [`declare_module!`](crate::declare_module) rather than writing the entry
//! points by hand.

use std::path::PathBuf;

use thiserror::Error;

mod abi;
mod loader;
mod registrar;

pub use abi::{LOAD_SYMBOL, LoadFn, ModuleHandle, ModuleOrigin, UNLOAD_SYMBOL, UnloadFn};
pub use loader::{MODULE_NAME_PREFIX, ModuleLoader, is_module_file_name, module_file_name};
pub use registrar::ModuleRegistrar;

/// Errors from locating or opening a module.
///
/// These never reach callers of [`crate::Context`]: per-candidate errors are
/// logged and skipped, and a fruitless search becomes
/// [`crate::TranslitError::NoSuchBackend`].
#[derive(Error, Debug)]
pub enum ModuleError {
	#[error("no module found for backend {0}")]
	NotFound(String),

	#[error("failed to open module {path}: {reason}")]
	Open { path: PathBuf, reason: String },

	#[error("module {path} is missing entry point {symbol}: {reason}")]
	MissingSymbol {
		path: PathBuf,
		symbol: &'static str,
		reason: String,
	},

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

/// Exports the two module entry points from a backend crate.
///
/// `$load` is a path to `fn(&mut ModuleRegistrar)`; the optional `$unload` is
/// a path to `fn()`.
///
/// ```ignore
/// fn register(registrar: &mut translit::ModuleRegistrar) {
///     registrar.register_transliterator("upper", |config| Ok(Box::new(Upper::new(config))));
/// }
///
/// translit::declare_module!(register);
/// ```
#[macro_export]
macro_rules! declare_module {
	($load:path) => {
		$crate::declare_module!($load, $crate::module::ModuleRegistrar::noop_unload);
	};
	($load:path, $unload:path) => {
		/// Module load entry point.
		///
		/// # Safety
		///
		/// `registrar` must be null or point to a registrar that stays valid
		/// for the duration of the call.
		#[unsafe(no_mangle)]
		pub unsafe extern "C" fn translit_module_load(
			registrar: *mut $crate::module::ModuleRegistrar,
		) {
			if let Some(registrar) = unsafe { registrar.as_mut() } {
				$load(registrar);
			}
		}

		/// Module unload entry point.
		///
		/// # Safety
		///
		/// Must not be called while instances created by this module are alive.
		#[unsafe(no_mangle)]
		pub unsafe extern "C" fn translit_module_unload() {
			$unload();
		}
	};
}

#[cfg(test)]
mod tests;

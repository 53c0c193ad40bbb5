use translit::{BackendError, Transliteration, Transliterator, TransliteratorConfig};

use crate::romaji::{self, Script};

/// Whole-string romaji to kana conversion.
///
/// The entire input is converted: a trailing consonant with no vowel is read
/// with an implicit `u`, so `endpos` always equals the input length.
#[derive(Debug)]
pub struct KanaTransliterator {
	name: String,
	script: Script,
}

impl KanaTransliterator {
	pub fn new(config: &TransliteratorConfig) -> Result<Self, BackendError> {
		let script = match config.name.as_str() {
			"Latin-Katakana" => Script::Katakana,
			"Latin-Hiragana" => Script::Hiragana,
			other => return Err(BackendError::new(format!("unknown transliteration {other}"))),
		};
		Ok(Self {
			name: config.name.clone(),
			script,
		})
	}
}

impl Transliterator for KanaTransliterator {
	fn name(&self) -> &str {
		&self.name
	}

	fn transliterate(&self, input: &str) -> Result<Transliteration, BackendError> {
		let mut pending: Vec<char> = input.to_lowercase().chars().collect();
		let mut output = String::with_capacity(input.len());
		romaji::compose(&mut pending, true, self.script, &mut output);
		Ok(Transliteration {
			output,
			endpos: input.chars().count(),
		})
	}
}

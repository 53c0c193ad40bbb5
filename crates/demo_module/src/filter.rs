use translit::{BackendError, Filter, FilterConfig, ModifierType};

use crate::romaji::{self, Script};

/// Language every romaji filter serves.
pub const LANGUAGE: &str = "ja";

/// Composes romaji keystrokes into kana.
///
/// Letters (and `-` for the long vowel mark) are absorbed. Completed kana
/// accumulate until [`Filter::poll_output`] takes them. Any other key, or a
/// key combined with a shortcut modifier, flushes the pending romaji and is
/// passed through, so callers should poll before inserting it.
#[derive(Debug)]
pub struct RomajiFilter {
	language: String,
	name: String,
	script: Script,
	pending: Vec<char>,
	committed: String,
}

impl RomajiFilter {
	pub fn new(config: &FilterConfig) -> Result<Self, BackendError> {
		if config.language != LANGUAGE {
			return Err(BackendError::new(format!(
				"unsupported language {}, expected {LANGUAGE}",
				config.language
			)));
		}
		let script = match config.name.as_str() {
			"romaji" => Script::Katakana,
			"romaji-hiragana" => Script::Hiragana,
			other => return Err(BackendError::new(format!("unknown input method {other}"))),
		};
		Ok(Self {
			language: config.language.clone(),
			name: config.name.clone(),
			script,
			pending: Vec::new(),
			committed: String::new(),
		})
	}

	/// Romaji typed but not yet converted.
	pub fn preedit(&self) -> String {
		self.pending.iter().collect()
	}

	fn flush(&mut self) {
		romaji::compose(&mut self.pending, true, self.script, &mut self.committed);
	}
}

impl Filter for RomajiFilter {
	fn language(&self) -> &str {
		&self.language
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn filter(&mut self, ch: char, modifiers: ModifierType) -> bool {
		if modifiers.is_release() {
			return false;
		}
		if modifiers.is_shortcut() || !(ch.is_ascii_alphabetic() || ch == '-') {
			self.flush();
			return false;
		}
		self.pending.push(ch.to_ascii_lowercase());
		romaji::compose(&mut self.pending, false, self.script, &mut self.committed);
		true
	}

	fn poll_output(&mut self) -> Option<String> {
		if self.committed.is_empty() {
			return None;
		}
		Some(std::mem::take(&mut self.committed))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn romaji(name: &str) -> RomajiFilter {
		RomajiFilter::new(&FilterConfig {
			language: LANGUAGE.to_string(),
			name: name.to_string(),
		})
		.expect("known input method")
	}

	fn type_str(filter: &mut RomajiFilter, text: &str) {
		for ch in text.chars() {
			assert!(filter.filter(ch, ModifierType::empty()), "{ch} should be absorbed");
		}
	}

	#[test]
	fn composes_syllables_as_typed() {
		let mut filter = romaji("romaji");
		type_str(&mut filter, "k");
		assert_eq!(filter.poll_output(), None);
		assert_eq!(filter.preedit(), "k");

		type_str(&mut filter, "a");
		assert_eq!(filter.poll_output().as_deref(), Some("カ"));
		assert_eq!(filter.preedit(), "");
	}

	#[test]
	fn non_letter_flushes_and_passes_through() {
		let mut filter = romaji("romaji-hiragana");
		type_str(&mut filter, "hon");
		assert_eq!(filter.poll_output().as_deref(), Some("ほ"));

		assert!(!filter.filter(' ', ModifierType::empty()));
		assert_eq!(filter.poll_output().as_deref(), Some("ん"));
		assert_eq!(filter.poll_output(), None);
	}

	#[test]
	fn shortcuts_and_releases_are_not_absorbed() {
		let mut filter = romaji("romaji");
		assert!(!filter.filter('c', ModifierType::CONTROL));
		assert!(!filter.filter('a', ModifierType::RELEASE));
		assert_eq!(filter.preedit(), "");
		assert_eq!(filter.poll_output(), None);

		// Shift is part of typing.
		assert!(filter.filter('A', ModifierType::SHIFT));
		assert_eq!(filter.poll_output().as_deref(), Some("ア"));
	}

	#[test]
	fn rejects_other_languages_and_names() {
		let config = FilterConfig {
			language: "hi".to_string(),
			name: "romaji".to_string(),
		};
		assert!(RomajiFilter::new(&config).is_err());

		let config = FilterConfig {
			language: LANGUAGE.to_string(),
			name: "inscript".to_string(),
		};
		let err = RomajiFilter::new(&config).unwrap_err();
		assert!(err.message().contains("inscript"));
	}
}

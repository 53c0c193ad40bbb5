//! Composite instance keys and client-facing identifiers.

use std::fmt;

use crate::error::{Result, TranslitError};

/// Separator between key fields. Never allowed inside a field.
pub const KEY_DELIMITER: char = ':';

/// Identity of a cached backend instance.
///
/// Filters are keyed by `backend:language:name`, transliterators by
/// `backend:name`. The two kinds live in separate caches, so equal strings
/// from different kinds never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceKey(String);

impl InstanceKey {
	pub fn filter(backend: &str, language: &str, name: &str) -> Result<Self> {
		Self::join(&[backend, language, name])
	}

	pub fn transliterator(backend: &str, name: &str) -> Result<Self> {
		Self::join(&[backend, name])
	}

	fn join(fields: &[&str]) -> Result<Self> {
		for field in fields {
			validate_field(field)?;
		}
		Ok(Self(fields.join(&KEY_DELIMITER.to_string())))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The backend component, always the first field.
	pub fn backend(&self) -> &str {
		self.0.split(KEY_DELIMITER).next().unwrap_or_default()
	}
}

impl fmt::Display for InstanceKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Rejects empty fields and fields containing [`KEY_DELIMITER`].
pub(crate) fn validate_field(field: &str) -> Result<()> {
	if field.is_empty() {
		return Err(TranslitError::InvalidKey("empty key field".to_string()));
	}
	if field.contains(KEY_DELIMITER) {
		return Err(TranslitError::InvalidKey(format!(
			"key field {field:?} contains '{KEY_DELIMITER}'"
		)));
	}
	Ok(())
}

/// A parsed `backend:language:name` filter identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterId<'a> {
	pub backend: &'a str,
	pub language: &'a str,
	pub name: &'a str,
}

impl<'a> FilterId<'a> {
	pub fn parse(id: &'a str) -> Result<Self> {
		let fields: Vec<&str> = id.split(KEY_DELIMITER).collect();
		match fields.as_slice() {
			[backend, language, name] => {
				let parsed = Self {
					backend: *backend,
					language: *language,
					name: *name,
				};
				parsed.key()?;
				Ok(parsed)
			}
			_ => Err(TranslitError::InvalidKey(format!(
				"expected backend:language:name, got {id:?}"
			))),
		}
	}

	pub fn key(&self) -> Result<InstanceKey> {
		InstanceKey::filter(self.backend, self.language, self.name)
	}
}

/// A parsed `backend:name` transliterator identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransliteratorId<'a> {
	pub backend: &'a str,
	pub name: &'a str,
}

impl<'a> TransliteratorId<'a> {
	pub fn parse(id: &'a str) -> Result<Self> {
		let fields: Vec<&str> = id.split(KEY_DELIMITER).collect();
		match fields.as_slice() {
			[backend, name] => {
				let parsed = Self {
					backend: *backend,
					name: *name,
				};
				parsed.key()?;
				Ok(parsed)
			}
			_ => Err(TranslitError::InvalidKey(format!(
				"expected backend:name, got {id:?}"
			))),
		}
	}

	pub fn key(&self) -> Result<InstanceKey> {
		InstanceKey::transliterator(self.backend, self.name)
	}
}

#[cfg(test)]
mod tests;

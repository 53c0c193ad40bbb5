//! Whole-string transliterators.

use std::fmt;
use std::sync::Arc;

use crate::error::{BackendError, Result, TranslitError};
use crate::key::InstanceKey;

/// Output of one transliteration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transliteration {
	pub output: String,
	/// Number of input characters (not bytes) consumed to produce `output`.
	///
	/// Streaming callers resume from this position once more input arrives.
	pub endpos: usize,
}

/// Backend side of the transliterator contract.
///
/// Implementations must not keep per-call state: the same instance is shared
/// by every caller and may be invoked repeatedly with the same input.
pub trait Transliterator: Send + Sync {
	fn name(&self) -> &str;

	/// Transforms `input`, which the dispatcher has already validated.
	fn transliterate(&self, input: &str) -> std::result::Result<Transliteration, BackendError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransliteratorConfig {
	pub name: String,
}

/// Fallible transliterator constructor registered by a backend.
pub type TransliteratorConstructor = Arc<
	dyn Fn(&TransliteratorConfig) -> std::result::Result<Box<dyn Transliterator>, BackendError>
		+ Send
		+ Sync,
>;

/// Shared handle to a cached transliterator instance.
#[derive(Clone)]
pub struct TransliteratorHandle {
	key: InstanceKey,
	inner: Arc<dyn Transliterator>,
}

impl TransliteratorHandle {
	pub(crate) fn new(key: InstanceKey, transliterator: Box<dyn Transliterator>) -> Self {
		Self {
			key,
			inner: Arc::from(transliterator),
		}
	}

	pub fn key(&self) -> &InstanceKey {
		&self.key
	}

	pub fn name(&self) -> &str {
		self.inner.name()
	}

	/// Transliterates `input`.
	///
	/// Malformed UTF-8 is rejected with [`TranslitError::InvalidInput`] before
	/// the backend is called.
	pub fn transliterate(&self, input: impl AsRef<[u8]>) -> Result<Transliteration> {
		let input = std::str::from_utf8(input.as_ref()).map_err(|e| {
			TranslitError::InvalidInput(format!("not a valid UTF-8 sequence: {e}"))
		})?;
		self.inner
			.transliterate(input)
			.map_err(|e| TranslitError::Failed(e.to_string()))
	}

	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	pub(crate) fn is_shared(&self) -> bool {
		Arc::strong_count(&self.inner) > 1
	}
}

impl fmt::Debug for TransliteratorHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TransliteratorHandle")
			.field("key", &self.key)
			.finish_non_exhaustive()
	}
}

use thiserror::Error;

/// Result alias used by the dispatch layer.
pub type Result<T, E = TranslitError> = std::result::Result<T, E>;

/// Errors surfaced to callers of [`crate::Context`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslitError {
	/// The backend is unknown even after an on-demand module load.
	#[error("no such backend {0}")]
	NoSuchBackend(String),

	/// A backend was found but refused to construct the requested instance.
	#[error("failed to load backend instance: {0}")]
	LoadFailed(String),

	/// Transliterator input was not well-formed UTF-8.
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// A backend reported a failure while transforming text.
	#[error("failed to transliterate: {0}")]
	Failed(String),

	/// An identifier or key field was malformed.
	#[error("invalid key: {0}")]
	InvalidKey(String),
}

/// Failure reported by a backend implementation.
///
/// Constructors and transform calls return this; the dispatcher turns it into
/// [`TranslitError::LoadFailed`] or [`TranslitError::Failed`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
	message: String,
}

impl BackendError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

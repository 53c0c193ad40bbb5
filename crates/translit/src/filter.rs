//! Incremental character filters.
//!
//! A filter is an input-method style state machine. Each call to
//! [`Filter::filter`] feeds one character; committed text accumulates inside
//! the backend until [`Filter::poll_output`] takes it.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::BackendError;
use crate::key::InstanceKey;
use crate::modifiers::ModifierType;

/// Backend side of the filter contract.
pub trait Filter: Send {
	/// Language the instance was constructed for.
	fn language(&self) -> &str;

	/// Input method name within the language.
	fn name(&self) -> &str;

	/// Feeds one character.
	///
	/// Returns true if the character was absorbed (composing or committed),
	/// false if it should pass through to the application unchanged.
	fn filter(&mut self, ch: char, modifiers: ModifierType) -> bool;

	/// Takes text committed since the last poll.
	fn poll_output(&mut self) -> Option<String> {
		None
	}
}

/// Construction parameters for a filter instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
	pub language: String,
	pub name: String,
}

/// Fallible filter constructor registered by a backend.
pub type FilterConstructor =
	Arc<dyn Fn(&FilterConfig) -> Result<Box<dyn Filter>, BackendError> + Send + Sync>;

/// Shared handle to a cached filter instance.
///
/// Clones refer to the same instance; all calls serialize on one lock.
#[derive(Clone)]
pub struct FilterHandle {
	key: InstanceKey,
	inner: Arc<Mutex<Box<dyn Filter>>>,
}

impl FilterHandle {
	pub(crate) fn new(key: InstanceKey, filter: Box<dyn Filter>) -> Self {
		Self {
			key,
			inner: Arc::new(Mutex::new(filter)),
		}
	}

	pub fn key(&self) -> &InstanceKey {
		&self.key
	}

	pub fn language(&self) -> String {
		self.inner.lock().language().to_string()
	}

	pub fn name(&self) -> String {
		self.inner.lock().name().to_string()
	}

	/// Feeds one character to the backend. See [`Filter::filter`].
	pub fn filter(&self, ch: char, modifiers: ModifierType) -> bool {
		self.inner.lock().filter(ch, modifiers)
	}

	/// Takes pending output. Empty output is reported as `None`.
	pub fn poll_output(&self) -> Option<String> {
		self.inner
			.lock()
			.poll_output()
			.filter(|output| !output.is_empty())
	}

	/// Returns true if both handles refer to the same instance.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	/// True while a handle other than this one is alive.
	pub(crate) fn is_shared(&self) -> bool {
		Arc::strong_count(&self.inner) > 1
	}
}

impl fmt::Debug for FilterHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterHandle")
			.field("key", &self.key)
			.finish_non_exhaustive()
	}
}

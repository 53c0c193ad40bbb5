//! Backend name to constructor mapping.

use std::collections::HashMap;
use std::fmt;

use crate::error::Result;
use crate::filter::FilterConstructor;
use crate::key::validate_field;
use crate::transliterator::TransliteratorConstructor;

/// A backend registered under `name`.
#[derive(Clone)]
pub struct BackendDescriptor<C> {
	name: String,
	constructor: C,
}

impl<C> BackendDescriptor<C> {
	pub fn new(name: impl Into<String>, constructor: C) -> Self {
		Self {
			name: name.into(),
			constructor,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn constructor(&self) -> &C {
		&self.constructor
	}
}

impl<C> fmt::Debug for BackendDescriptor<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BackendDescriptor")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

/// Registered backends for one contract.
///
/// Lookups never trigger module loading; that is the caller's job.
pub struct BackendRegistry<C> {
	backends: HashMap<String, BackendDescriptor<C>>,
}

pub type FilterRegistry = BackendRegistry<FilterConstructor>;
pub type TransliteratorRegistry = BackendRegistry<TransliteratorConstructor>;

impl<C: Clone> BackendRegistry<C> {
	pub fn new() -> Self {
		Self {
			backends: HashMap::new(),
		}
	}

	/// Registers `descriptor`, replacing any backend already using its name.
	///
	/// Returns the replaced descriptor, if any.
	pub fn register(
		&mut self,
		descriptor: BackendDescriptor<C>,
	) -> Result<Option<BackendDescriptor<C>>> {
		validate_field(&descriptor.name)?;
		let replaced = self.backends.insert(descriptor.name.clone(), descriptor);
		if let Some(old) = &replaced {
			tracing::debug!(backend = old.name(), "backend re-registered, last one wins");
		}
		Ok(replaced)
	}

	pub fn lookup(&self, name: &str) -> Option<BackendDescriptor<C>> {
		self.backends.get(name).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.backends.contains_key(name)
	}

	/// Registered backend names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.backends.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.backends.len()
	}

	pub fn is_empty(&self) -> bool {
		self.backends.is_empty()
	}

	pub fn clear(&mut self) {
		self.backends.clear();
	}
}

impl<C: Clone> Default for BackendRegistry<C> {
	fn default() -> Self {
		Self::new()
	}
}

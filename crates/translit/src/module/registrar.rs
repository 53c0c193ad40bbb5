use std::sync::Arc;

use crate::error::BackendError;
use crate::filter::{Filter, FilterConfig, FilterConstructor};
use crate::registry::BackendDescriptor;
use crate::transliterator::{Transliterator, TransliteratorConfig, TransliteratorConstructor};

/// Collects the backends a module registers from its load entry point.
///
/// The host moves them into its registries once the entry point returns, so
/// no registry lock is held while module code runs.
#[derive(Default)]
pub struct ModuleRegistrar {
	filters: Vec<BackendDescriptor<FilterConstructor>>,
	transliterators: Vec<BackendDescriptor<TransliteratorConstructor>>,
}

impl ModuleRegistrar {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Registers a filter backend under `name`.
	pub fn register_filter<F>(&mut self, name: &str, constructor: F)
	where
		F: Fn(&FilterConfig) -> Result<Box<dyn Filter>, BackendError> + Send + Sync + 'static,
	{
		self.filters
			.push(BackendDescriptor::new(name, Arc::new(constructor) as FilterConstructor));
	}

	/// Registers a transliterator backend under `name`.
	pub fn register_transliterator<F>(&mut self, name: &str, constructor: F)
	where
		F: Fn(&TransliteratorConfig) -> Result<Box<dyn Transliterator>, BackendError>
			+ Send
			+ Sync
			+ 'static,
	{
		self.transliterators.push(BackendDescriptor::new(
			name,
			Arc::new(constructor) as TransliteratorConstructor,
		));
	}

	pub fn is_empty(&self) -> bool {
		self.filters.is_empty() && self.transliterators.is_empty()
	}

	pub(crate) fn into_parts(
		self,
	) -> (
		Vec<BackendDescriptor<FilterConstructor>>,
		Vec<BackendDescriptor<TransliteratorConstructor>>,
	) {
		(self.filters, self.transliterators)
	}

	/// Unload entry point for modules without global resources.
	pub fn noop_unload() {}
}

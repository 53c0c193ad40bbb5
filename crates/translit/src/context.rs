//! The top-level object clients talk to.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once, OnceLock};

use parking_lot::Mutex;

use crate::cache::InstanceCache;
use crate::config::{LoadPolicy, LoaderConfig};
use crate::error::{BackendError, Result, TranslitError};
use crate::filter::{Filter, FilterConfig, FilterConstructor, FilterHandle};
use crate::key::{FilterId, InstanceKey, TransliteratorId};
use crate::module::{LoadFn, ModuleHandle, ModuleLoader, ModuleOrigin, ModuleRegistrar, UnloadFn};
use crate::registry::{BackendDescriptor, FilterRegistry, TransliteratorRegistry};
use crate::transliterator::{
	Transliterator, TransliteratorConfig, TransliteratorConstructor, TransliteratorHandle,
};

static GLOBAL: OnceLock<Context> = OnceLock::new();

/// Owns the backend registries, the instance caches and every loaded module.
///
/// Each registry and cache sits behind its own lock. Locks are only ever
/// taken in the order cache, modules, registry, so a cache miss may load
/// modules and consult registries without deadlocking.
///
/// Dropping a context never unloads modules and leaves their libraries
/// mapped; [`Context::shutdown`] is the only way to run unload entry points.
pub struct Context {
	filters: Mutex<InstanceCache<FilterHandle>>,
	transliterators: Mutex<InstanceCache<TransliteratorHandle>>,
	filter_backends: Mutex<FilterRegistry>,
	transliterator_backends: Mutex<TransliteratorRegistry>,
	modules: Mutex<Vec<ModuleHandle>>,
	loader: ModuleLoader,
	bulk_scan: Once,
}

impl Context {
	pub fn new(config: LoaderConfig) -> Self {
		Self {
			filters: Mutex::new(InstanceCache::new()),
			transliterators: Mutex::new(InstanceCache::new()),
			filter_backends: Mutex::new(FilterRegistry::new()),
			transliterator_backends: Mutex::new(TransliteratorRegistry::new()),
			modules: Mutex::new(Vec::new()),
			loader: ModuleLoader::new(config),
			bulk_scan: Once::new(),
		}
	}

	/// A context configured from [`crate::MODULE_PATH_ENV`].
	pub fn from_env() -> Self {
		Self::new(LoaderConfig::from_env())
	}

	/// Process-wide context, created from the environment on first use.
	///
	/// It lives until process exit and is never shut down; embedders that
	/// need teardown should own a [`Context`] instead.
	pub fn global() -> &'static Context {
		GLOBAL.get_or_init(Context::from_env)
	}

	pub fn loader(&self) -> &ModuleLoader {
		&self.loader
	}

	/// Gets the filter for a `backend:language:name` identifier.
	pub fn filter(&self, id: &str) -> Result<FilterHandle> {
		let id = FilterId::parse(id)?;
		self.get_filter(id.backend, id.language, id.name)
	}

	/// Gets the transliterator for a `backend:name` identifier.
	pub fn transliterator(&self, id: &str) -> Result<TransliteratorHandle> {
		let id = TransliteratorId::parse(id)?;
		self.get_transliterator(id.backend, id.name)
	}

	/// Returns the cached filter for the key, constructing it on first request.
	///
	/// An unknown backend triggers one module search before failing with
	/// [`TranslitError::NoSuchBackend`]. A constructor refusal is reported as
	/// [`TranslitError::LoadFailed`] and leaves nothing cached.
	pub fn get_filter(&self, backend: &str, language: &str, name: &str) -> Result<FilterHandle> {
		let key = InstanceKey::filter(backend, language, name)?;
		let mut cache = self.filters.lock();
		cache.get_or_try_insert_with(key, |key| {
			let descriptor = self.resolve(backend, || self.filter_backends.lock().lookup(backend))?;
			let config = FilterConfig {
				language: language.to_string(),
				name: name.to_string(),
			};
			let filter = (descriptor.constructor())(&config).map_err(|e| load_failed(key, e))?;
			tracing::debug!(%key, "constructed filter");
			Ok(FilterHandle::new(key.clone(), filter))
		})
	}

	/// Returns the cached transliterator for the key, constructing it on first
	/// request. Failure modes match [`Self::get_filter`].
	pub fn get_transliterator(&self, backend: &str, name: &str) -> Result<TransliteratorHandle> {
		let key = InstanceKey::transliterator(backend, name)?;
		let mut cache = self.transliterators.lock();
		cache.get_or_try_insert_with(key, |key| {
			let descriptor = self.resolve(backend, || {
				self.transliterator_backends.lock().lookup(backend)
			})?;
			let config = TransliteratorConfig {
				name: name.to_string(),
			};
			let transliterator =
				(descriptor.constructor())(&config).map_err(|e| load_failed(key, e))?;
			tracing::debug!(%key, "constructed transliterator");
			Ok(TransliteratorHandle::new(key.clone(), transliterator))
		})
	}

	/// Looks `backend` up, loading modules once on a miss.
	fn resolve<C>(
		&self,
		backend: &str,
		lookup: impl Fn() -> Option<BackendDescriptor<C>>,
	) -> Result<BackendDescriptor<C>> {
		self.ensure_bulk_scan();
		if let Some(descriptor) = lookup() {
			return Ok(descriptor);
		}
		self.load_backend(backend);
		lookup().ok_or_else(|| TranslitError::NoSuchBackend(backend.to_string()))
	}

	/// Under the eager policy the first lookup loads every module up front.
	fn ensure_bulk_scan(&self) {
		if self.loader.config().policy == LoadPolicy::Eager {
			self.bulk_scan.call_once(|| {
				let count = self.load_all();
				tracing::debug!(count, "bulk module scan finished");
			});
		}
	}

	/// Runs the module loader for `backend`. Returns the number of modules loaded.
	fn load_backend(&self, backend: &str) -> usize {
		let mut modules = self.modules.lock();
		let mut registrar = ModuleRegistrar::new();
		let opened = match self
			.loader
			.find_and_load(backend, &loaded_paths(&modules), &mut registrar)
		{
			Ok(opened) => opened,
			Err(e) => {
				tracing::debug!(backend, error = %e, "module search found nothing");
				return 0;
			}
		};
		let count = opened.len();
		modules.extend(opened);
		drop(modules);
		self.apply(backend, registrar);
		count
	}

	/// Opens every module file on the search path that is not loaded yet,
	/// whatever the configured policy. Returns the number of modules loaded.
	pub fn load_all(&self) -> usize {
		let mut modules = self.modules.lock();
		let mut registrar = ModuleRegistrar::new();
		let opened = self.loader.load_all(&loaded_paths(&modules), &mut registrar);
		let count = opened.len();
		modules.extend(opened);
		drop(modules);
		self.apply("bulk scan", registrar);
		count
	}

	/// Installs a module whose entry points are linked into this process.
	///
	/// The module goes through the same registration and teardown path as one
	/// opened from disk. Returns false if a builtin of that name is already
	/// installed.
	///
	/// # Safety
	///
	/// `load` and `unload` must follow the module ABI: `load` may only use
	/// its argument as a [`ModuleRegistrar`] for the duration of the call.
	/// [`crate::declare_module!`] generates conforming functions.
	pub unsafe fn install_builtin(&self, name: &str, load: LoadFn, unload: UnloadFn) -> bool {
		let mut modules = self.modules.lock();
		let origin = ModuleOrigin::Builtin(name.to_string());
		if modules.iter().any(|module| *module.origin() == origin) {
			return false;
		}
		let mut module = ModuleHandle::builtin(name, load, unload);
		let mut registrar = ModuleRegistrar::new();
		module.load(&mut registrar);
		modules.push(module);
		drop(modules);
		self.apply(name, registrar);
		true
	}

	/// Registers a filter backend directly, bypassing module loading.
	pub fn register_filter<F>(&self, name: &str, constructor: F) -> Result<()>
	where
		F: Fn(&FilterConfig) -> std::result::Result<Box<dyn Filter>, BackendError>
			+ Send
			+ Sync
			+ 'static,
	{
		let descriptor = BackendDescriptor::new(name, Arc::new(constructor) as FilterConstructor);
		self.filter_backends.lock().register(descriptor)?;
		Ok(())
	}

	/// Registers a transliterator backend directly, bypassing module loading.
	pub fn register_transliterator<F>(&self, name: &str, constructor: F) -> Result<()>
	where
		F: Fn(&TransliteratorConfig) -> std::result::Result<Box<dyn Transliterator>, BackendError>
			+ Send
			+ Sync
			+ 'static,
	{
		let descriptor =
			BackendDescriptor::new(name, Arc::new(constructor) as TransliteratorConstructor);
		self.transliterator_backends.lock().register(descriptor)?;
		Ok(())
	}

	/// Moves what a module registered into the registries.
	fn apply(&self, origin: &str, registrar: ModuleRegistrar) {
		let (filters, transliterators) = registrar.into_parts();
		{
			let mut registry = self.filter_backends.lock();
			for descriptor in filters {
				let backend = descriptor.name().to_string();
				match registry.register(descriptor) {
					Ok(_) => tracing::debug!(origin, %backend, "registered filter backend"),
					Err(e) => tracing::warn!(origin, error = %e, "rejected filter backend"),
				}
			}
		}
		let mut registry = self.transliterator_backends.lock();
		for descriptor in transliterators {
			let backend = descriptor.name().to_string();
			match registry.register(descriptor) {
				Ok(_) => tracing::debug!(origin, %backend, "registered transliterator backend"),
				Err(e) => tracing::warn!(origin, error = %e, "rejected transliterator backend"),
			}
		}
	}

	/// Registered filter backend names, sorted.
	pub fn filter_backends(&self) -> Vec<String> {
		let registry = self.filter_backends.lock();
		registry.names().into_iter().map(str::to_string).collect()
	}

	/// Registered transliterator backend names, sorted.
	pub fn transliterator_backends(&self) -> Vec<String> {
		let registry = self.transliterator_backends.lock();
		registry.names().into_iter().map(str::to_string).collect()
	}

	/// Origins of every loaded module, in load order.
	pub fn modules(&self) -> Vec<ModuleOrigin> {
		self.modules
			.lock()
			.iter()
			.map(|module| module.origin().clone())
			.collect()
	}

	pub fn cached_filters(&self) -> usize {
		self.filters.lock().len()
	}

	pub fn cached_transliterators(&self) -> usize {
		self.transliterators.lock().len()
	}

	/// Tears the context down.
	///
	/// Drops cached instances and registered constructors, then calls every
	/// module's unload entry point in reverse load order and closes its
	/// library. If a caller still holds an instance handle, unload is skipped
	/// and libraries stay mapped so that handle keeps working.
	pub fn shutdown(mut self) {
		let mut outstanding = 0;
		outstanding += self
			.filters
			.get_mut()
			.drain()
			.filter(FilterHandle::is_shared)
			.count();
		outstanding += self
			.transliterators
			.get_mut()
			.drain()
			.filter(TransliteratorHandle::is_shared)
			.count();
		self.filter_backends.get_mut().clear();
		self.transliterator_backends.get_mut().clear();

		if outstanding > 0 {
			tracing::warn!(
				outstanding,
				"instances still referenced at shutdown, skipping module unload"
			);
			// Drop leaks whatever is left.
			return;
		}
		let mut modules = std::mem::take(self.modules.get_mut());
		while let Some(mut module) = modules.pop() {
			module.unload();
			tracing::debug!(module = %module.origin(), "unloaded module");
		}
	}
}

impl Drop for Context {
	/// Keeps every module library mapped. Handles cloned out of the caches
	/// may outlive the context and still call into module code.
	fn drop(&mut self) {
		for module in self.modules.get_mut().drain(..) {
			module.leak();
		}
	}
}

fn loaded_paths(modules: &[ModuleHandle]) -> HashSet<PathBuf> {
	modules
		.iter()
		.filter_map(ModuleHandle::path)
		.map(Path::to_path_buf)
		.collect()
}

fn load_failed(key: &InstanceKey, e: BackendError) -> TranslitError {
	TranslitError::LoadFailed(format!("{key}: {e}"))
}

use std::collections::HashSet;
use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};

use super::abi::ModuleHandle;
use super::registrar::ModuleRegistrar;
use super::ModuleError;
use crate::config::{LoadPolicy, LoaderConfig};

/// Fixed part of every demand-loaded module file name.
pub const MODULE_NAME_PREFIX: &str = "translit";

/// File name the demand policy looks for: `libtranslitfoo.so`,
/// `libtranslitfoo.dylib` or `translitfoo.dll` for backend `foo`.
pub fn module_file_name(backend: &str) -> String {
	format!("{DLL_PREFIX}{MODULE_NAME_PREFIX}{backend}{DLL_SUFFIX}")
}

/// Whether the eager policy considers `file_name` a module: any file with the
/// platform library prefix and suffix.
pub fn is_module_file_name(file_name: &str) -> bool {
	file_name.len() > DLL_PREFIX.len() + DLL_SUFFIX.len()
		&& file_name.starts_with(DLL_PREFIX)
		&& file_name.ends_with(DLL_SUFFIX)
}

/// Scans the search path and opens modules according to a [`LoadPolicy`].
#[derive(Debug, Clone)]
pub struct ModuleLoader {
	config: LoaderConfig,
}

impl ModuleLoader {
	pub fn new(config: LoaderConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &LoaderConfig {
		&self.config
	}

	/// Candidate files for `backend` under the configured policy, in search order.
	///
	/// Directories are visited in order and entries within one directory in
	/// sorted order. Unreadable directories are skipped.
	pub fn candidates(&self, backend: &str) -> Vec<PathBuf> {
		match self.config.policy {
			LoadPolicy::Demand => {
				let expected = module_file_name(backend);
				self.scan(|name| name == expected)
			}
			LoadPolicy::Eager => self.scan(is_module_file_name),
		}
	}

	fn scan(&self, accept: impl Fn(&str) -> bool) -> Vec<PathBuf> {
		let mut found = Vec::new();
		for dir in &self.config.search_path {
			let entries = match std::fs::read_dir(dir) {
				Ok(entries) => entries,
				Err(e) => {
					tracing::debug!(dir = %dir.display(), error = %e, "skipping module directory");
					continue;
				}
			};
			let mut names: Vec<String> = entries
				.flatten()
				.filter_map(|entry| entry.file_name().into_string().ok())
				.filter(|name| accept(name.as_str()))
				.collect();
			names.sort_unstable();
			found.extend(names.into_iter().map(|name| dir.join(name)));
		}
		found
	}

	/// Opens and loads modules that may provide `backend`.
	///
	/// Each opened module's load entry point runs once against `registrar`.
	/// Paths in `skip` (modules the caller already holds) are not reopened.
	/// Under [`LoadPolicy::Demand`] the first successful load ends the search;
	/// under [`LoadPolicy::Eager`] every candidate is tried.
	pub fn find_and_load(
		&self,
		backend: &str,
		skip: &HashSet<PathBuf>,
		registrar: &mut ModuleRegistrar,
	) -> Result<Vec<ModuleHandle>, ModuleError> {
		let mut loaded = Vec::new();
		for path in self.candidates(backend) {
			if skip.contains(&path) {
				continue;
			}
			let Some(module) = Self::open_and_load(&path, registrar) else {
				continue;
			};
			loaded.push(module);
			if self.config.policy == LoadPolicy::Demand {
				break;
			}
		}

		if loaded.is_empty() {
			return Err(ModuleError::NotFound(backend.to_string()));
		}
		Ok(loaded)
	}

	/// Opens every module file on the search path regardless of policy.
	pub fn load_all(
		&self,
		skip: &HashSet<PathBuf>,
		registrar: &mut ModuleRegistrar,
	) -> Vec<ModuleHandle> {
		self.scan(is_module_file_name)
			.into_iter()
			.filter(|path| !skip.contains(path))
			.filter_map(|path| Self::open_and_load(&path, registrar))
			.collect()
	}

	fn open_and_load(path: &Path, registrar: &mut ModuleRegistrar) -> Option<ModuleHandle> {
		match ModuleHandle::open(path) {
			Ok(mut module) => {
				module.load(registrar);
				tracing::debug!(module = %path.display(), "loaded module");
				Some(module)
			}
			Err(e) => {
				tracing::warn!(module = %path.display(), error = %e, "failed to load module");
				None
			}
		}
	}
}

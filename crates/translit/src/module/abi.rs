//! Library opening and entry-point calls. All unsafe module code lives here.

use std::fmt;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};

use super::ModuleError;
use super::registrar::ModuleRegistrar;

pub const LOAD_SYMBOL: &str = "translit_module_load";
pub const UNLOAD_SYMBOL: &str = "translit_module_unload";

/// Signature of [`LOAD_SYMBOL`].
pub type LoadFn = unsafe extern "C" fn(registrar: *mut ModuleRegistrar);
/// Signature of [`UNLOAD_SYMBOL`].
pub type UnloadFn = unsafe extern "C" fn();

/// Where a module came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOrigin {
	/// Opened from a shared library on the search path.
	Library(PathBuf),
	/// Installed in-process through [`crate::Context::install_builtin`].
	Builtin(String),
}

impl fmt::Display for ModuleOrigin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Library(path) => write!(f, "{}", path.display()),
			Self::Builtin(name) => write!(f, "builtin:{name}"),
		}
	}
}

/// An opened module and its resolved entry points.
pub struct ModuleHandle {
	origin: ModuleOrigin,
	load: LoadFn,
	unload: UnloadFn,
	loaded: bool,
	// Kept last: the entry points above point into this library.
	library: Option<Library>,
}

impl ModuleHandle {
	/// Opens the library at `path` and resolves both entry points.
	///
	/// A library missing either symbol is closed again before returning.
	pub(crate) fn open(path: &Path) -> Result<Self, ModuleError> {
		// SAFETY: opening runs the library's initialisers. Files on the module
		// search path are trusted to be translit modules.
		let library = unsafe { Library::new(path) }.map_err(|e| ModuleError::Open {
			path: path.to_path_buf(),
			reason: e.to_string(),
		})?;

		let (load, unload) = {
			let missing = |symbol: &'static str, e: libloading::Error| ModuleError::MissingSymbol {
				path: path.to_path_buf(),
				symbol,
				reason: e.to_string(),
			};
			// SAFETY: the symbol types match the documented entry-point ABI.
			let load: Symbol<LoadFn> = unsafe { library.get(LOAD_SYMBOL.as_bytes()) }
				.map_err(|e| missing(LOAD_SYMBOL, e))?;
			let unload: Symbol<UnloadFn> = unsafe { library.get(UNLOAD_SYMBOL.as_bytes()) }
				.map_err(|e| missing(UNLOAD_SYMBOL, e))?;
			(*load, *unload)
		};

		Ok(Self {
			origin: ModuleOrigin::Library(path.to_path_buf()),
			load,
			unload,
			loaded: false,
			library: Some(library),
		})
	}

	/// Wraps entry points that are linked into the current process.
	pub(crate) fn builtin(name: &str, load: LoadFn, unload: UnloadFn) -> Self {
		Self {
			origin: ModuleOrigin::Builtin(name.to_string()),
			load,
			unload,
			loaded: false,
			library: None,
		}
	}

	/// Calls the load entry point. Does nothing if it already ran.
	pub(crate) fn load(&mut self, registrar: &mut ModuleRegistrar) -> bool {
		if self.loaded {
			return false;
		}
		// SAFETY: `registrar` is a live exclusive reference for the whole call,
		// which is all the entry point may assume.
		unsafe { (self.load)(registrar as *mut ModuleRegistrar) };
		self.loaded = true;
		true
	}

	/// Calls the unload entry point if load ran.
	///
	/// Callers must have dropped every instance and constructor the module
	/// handed out.
	pub(crate) fn unload(&mut self) {
		if !self.loaded {
			return;
		}
		// SAFETY: see above; the host only unloads during teardown.
		unsafe { (self.unload)() };
		self.loaded = false;
	}

	/// Keeps the library mapped for the rest of the process.
	///
	/// Used when instances from the module may still be referenced.
	pub(crate) fn leak(mut self) {
		if let Some(library) = self.library.take() {
			std::mem::forget(library);
		}
	}

	pub fn origin(&self) -> &ModuleOrigin {
		&self.origin
	}

	pub fn path(&self) -> Option<&Path> {
		match &self.origin {
			ModuleOrigin::Library(path) => Some(path),
			ModuleOrigin::Builtin(_) => None,
		}
	}

	pub fn is_loaded(&self) -> bool {
		self.loaded
	}
}

impl fmt::Debug for ModuleHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModuleHandle")
			.field("origin", &self.origin)
			.field("loaded", &self.loaded)
			.finish_non_exhaustive()
	}
}

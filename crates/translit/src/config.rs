//! Loader configuration: where modules live and how they are opened.

use std::ffi::OsStr;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the module search path.
///
/// Entries are separated by the platform path-list separator (`:` on Unix,
/// `;` on Windows).
pub const MODULE_PATH_ENV: &str = "TRANSLIT_MODULE_PATH";

/// Directory searched when [`MODULE_PATH_ENV`] is unset.
///
/// Packagers override it with `TRANSLIT_MODULE_DIR` at build time.
pub const DEFAULT_MODULE_DIR: &str = match option_env!("TRANSLIT_MODULE_DIR") {
	Some(dir) => dir,
	None => "/usr/local/lib/translit/modules",
};

/// How the loader picks files when a backend is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
	/// Open only the file named after the requested backend; first success wins.
	#[default]
	Demand,
	/// Open every module file on the search path, whatever it is named.
	Eager,
}

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("invalid loader config: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Search path and loading policy for a [`crate::ModuleLoader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
	/// Directories scanned in order.
	pub search_path: Vec<PathBuf>,
	pub policy: LoadPolicy,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLoaderConfig {
	search_path: Option<Vec<PathBuf>>,
	#[serde(default)]
	policy: LoadPolicy,
}

impl LoaderConfig {
	/// Reads the search path from [`MODULE_PATH_ENV`].
	pub fn from_env() -> Self {
		Self::from_search_path(std::env::var_os(MODULE_PATH_ENV).as_deref())
	}

	/// Builds a config from an override value as found in the environment.
	///
	/// `None` selects [`DEFAULT_MODULE_DIR`]. Empty entries are dropped.
	pub fn from_search_path(value: Option<&OsStr>) -> Self {
		let search_path = match value {
			Some(value) => std::env::split_paths(value)
				.filter(|dir| !dir.as_os_str().is_empty())
				.collect(),
			None => vec![PathBuf::from(DEFAULT_MODULE_DIR)],
		};
		Self {
			search_path,
			policy: LoadPolicy::default(),
		}
	}

	/// Parses a TOML document:
	///
	/// ```toml
	/// search_path = ["/opt/translit/modules"]
	/// policy = "eager"
	/// ```
	///
	/// Without `search_path` the environment decides, as in [`Self::from_env`].
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		let raw: RawLoaderConfig = toml::from_str(text)?;
		let search_path = match raw.search_path {
			Some(search_path) => search_path,
			None => Self::from_env().search_path,
		};
		Ok(Self {
			search_path,
			policy: raw.policy,
		})
	}

	pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
		self.policy = policy;
		self
	}
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self::from_env()
	}
}

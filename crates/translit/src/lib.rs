//! Runtime-loaded text transform backends.
//!
//! Clients ask a [`Context`] for a backend instance by identifier and get a
//! shared handle back. Backends live in separately built modules that are
//! discovered on a search path, opened on demand and asked to register their
//! constructors.
//!
//! # Architecture
//!
//! * [`module`]: search-path scanning, library opening and the entry-point ABI
//! * [`registry`]: backend name to constructor mapping, one per contract
//! * [`cache`]: deduplicating memo of constructed instances
//! * [`filter`]: incremental, stateful character filters (input methods)
//! * [`transliterator`]: whole-string transforms reporting consumed length
//! * [`context`]: owns all of the above and implements the lookup algorithm
//!
//! # Identifiers
//!
//! Filters are requested as `"backend:language:name"` (for example
//! `"m17n:hi:inscript"`), transliterators as `"backend:name"` (for example
//! `"icu:Latin-Katakana"`).

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod key;
pub mod modifiers;
pub mod module;
pub mod registry;
pub mod transliterator;

pub use cache::InstanceCache;
pub use config::{ConfigError, DEFAULT_MODULE_DIR, LoadPolicy, LoaderConfig, MODULE_PATH_ENV};
pub use context::Context;
pub use error::{BackendError, Result, TranslitError};
pub use filter::{Filter, FilterConfig, FilterConstructor, FilterHandle};
pub use key::{FilterId, InstanceKey, KEY_DELIMITER, TransliteratorId};
pub use modifiers::ModifierType;
pub use module::{ModuleError, ModuleHandle, ModuleLoader, ModuleOrigin, ModuleRegistrar};
pub use registry::{BackendDescriptor, BackendRegistry, FilterRegistry, TransliteratorRegistry};
pub use transliterator::{
	Transliteration, Transliterator, TransliteratorConfig, TransliteratorConstructor,
	TransliteratorHandle,
};

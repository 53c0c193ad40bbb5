use std::collections::HashSet;
use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::rstest;

use super::*;
use crate::config::{LoadPolicy, LoaderConfig};

fn loader(dirs: &[&Path], policy: LoadPolicy) -> ModuleLoader {
	ModuleLoader::new(LoaderConfig {
		search_path: dirs.iter().map(|dir| dir.to_path_buf()).collect(),
		policy,
	})
}

fn touch(dir: &Path, name: &str) {
	fs::write(dir.join(name), b"not a shared library").expect("must write fixture");
}

#[test]
fn demand_file_name_follows_platform_convention() {
	assert_eq!(module_file_name("icu"), format!("{DLL_PREFIX}transliticu{DLL_SUFFIX}"));
	#[cfg(target_os = "linux")]
	assert_eq!(module_file_name("icu"), "libtransliticu.so");
	#[cfg(windows)]
	assert_eq!(module_file_name("icu"), "transliticu.dll");
}

#[rstest]
#[case::module(&format!("{DLL_PREFIX}translitkana{DLL_SUFFIX}"), true)]
#[case::any_name(&format!("{DLL_PREFIX}other{DLL_SUFFIX}"), true)]
#[case::wrong_suffix(&format!("{DLL_PREFIX}translitkana.txt"), false)]
#[case::bare_affixes(&format!("{DLL_PREFIX}{DLL_SUFFIX}"), false)]
fn eager_matching_uses_prefix_and_suffix(#[case] name: &str, #[case] expected: bool) {
	assert_eq!(is_module_file_name(name), expected);
}

#[test]
fn demand_candidates_match_exact_name_across_directories() {
	let first = tempfile::tempdir().expect("must create tempdir");
	let second = tempfile::tempdir().expect("must create tempdir");
	touch(first.path(), &module_file_name("icu"));
	touch(first.path(), &module_file_name("icu2"));
	touch(second.path(), &module_file_name("icu"));
	touch(second.path(), &module_file_name("m17n"));

	let loader = loader(&[first.path(), second.path()], LoadPolicy::Demand);
	assert_eq!(
		loader.candidates("icu"),
		[
			first.path().join(module_file_name("icu")),
			second.path().join(module_file_name("icu")),
		]
	);
	assert!(loader.candidates("missing").is_empty());
}

#[test]
fn eager_candidates_include_every_module_file() {
	let dir = tempfile::tempdir().expect("must create tempdir");
	touch(dir.path(), &module_file_name("m17n"));
	touch(dir.path(), &module_file_name("icu"));
	touch(dir.path(), "README");

	let loader = loader(&[dir.path()], LoadPolicy::Eager);
	let candidates = loader.candidates("anything");
	assert_eq!(candidates.len(), 2);
	assert_eq!(candidates[0], dir.path().join(module_file_name("icu")));
}

#[test]
fn unreadable_directories_are_skipped() {
	let dir = tempfile::tempdir().expect("must create tempdir");
	touch(dir.path(), &module_file_name("icu"));
	let missing = dir.path().join("does-not-exist");

	let loader = loader(&[missing.as_path(), dir.path()], LoadPolicy::Demand);
	assert_eq!(loader.candidates("icu").len(), 1);
}

#[test]
fn broken_candidates_are_skipped_and_search_fails() {
	let dir = tempfile::tempdir().expect("must create tempdir");
	touch(dir.path(), &module_file_name("icu"));
	touch(dir.path(), &module_file_name("m17n"));

	for policy in [LoadPolicy::Demand, LoadPolicy::Eager] {
		let loader = loader(&[dir.path()], policy);
		let mut registrar = ModuleRegistrar::new();
		let result = loader.find_and_load("icu", &HashSet::new(), &mut registrar);
		assert!(matches!(result, Err(ModuleError::NotFound(name)) if name == "icu"));
		assert!(registrar.is_empty());
	}
}

#[test]
fn skipped_paths_are_not_opened() {
	let dir = tempfile::tempdir().expect("must create tempdir");
	touch(dir.path(), &module_file_name("icu"));
	let skip: HashSet<_> = [dir.path().join(module_file_name("icu"))].into();

	let loader = loader(&[dir.path()], LoadPolicy::Eager);
	let mut registrar = ModuleRegistrar::new();
	assert!(loader.load_all(&skip, &mut registrar).is_empty());
}

#[test]
fn opening_garbage_reports_open_error() {
	let dir = tempfile::tempdir().expect("must create tempdir");
	touch(dir.path(), &module_file_name("icu"));
	let path = dir.path().join(module_file_name("icu"));

	let err = ModuleHandle::open(&path).unwrap_err();
	assert!(matches!(err, ModuleError::Open { path: p, .. } if p == path));
}

static LOADS: AtomicUsize = AtomicUsize::new(0);
static UNLOADS: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn counting_load(registrar: *mut ModuleRegistrar) {
	LOADS.fetch_add(1, Ordering::SeqCst);
	if let Some(registrar) = unsafe { registrar.as_mut() } {
		registrar.register_transliterator("counting", |_| {
			Err(crate::BackendError::new("never constructed"))
		});
	}
}

unsafe extern "C" fn counting_unload() {
	UNLOADS.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn builtin_entry_points_run_once() {
	let mut module = ModuleHandle::builtin("counting", counting_load, counting_unload);
	let mut registrar = ModuleRegistrar::new();

	assert!(module.load(&mut registrar));
	assert!(!module.load(&mut registrar));
	assert_eq!(LOADS.load(Ordering::SeqCst), 1);
	assert!(module.is_loaded());
	assert!(module.path().is_none());

	let (filters, transliterators) = registrar.into_parts();
	assert!(filters.is_empty());
	assert_eq!(transliterators[0].name(), "counting");

	module.unload();
	module.unload();
	assert_eq!(UNLOADS.load(Ordering::SeqCst), 1);
	assert!(!module.is_loaded());
}

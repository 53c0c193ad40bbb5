use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::key::InstanceKey;

/// Deduplicating memo of constructed instances.
///
/// Holds at most one handle per key. Entries are only added; they go away
/// when the cache is cleared or dropped.
#[derive(Debug)]
pub struct InstanceCache<H> {
	entries: HashMap<InstanceKey, H>,
}

impl<H: Clone> InstanceCache<H> {
	pub fn new() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}

	pub fn get(&self, key: &InstanceKey) -> Option<H> {
		self.entries.get(key).cloned()
	}

	/// Returns the cached handle for `key`, or builds one with `make`.
	///
	/// `make` runs only on a miss. On error nothing is inserted.
	pub fn get_or_try_insert_with<E>(
		&mut self,
		key: InstanceKey,
		make: impl FnOnce(&InstanceKey) -> Result<H, E>,
	) -> Result<H, E> {
		match self.entries.entry(key) {
			Entry::Occupied(entry) => {
				tracing::trace!(key = %entry.key(), "instance cache hit");
				Ok(entry.get().clone())
			}
			Entry::Vacant(entry) => {
				let handle = make(entry.key())?;
				Ok(entry.insert(handle).clone())
			}
		}
	}

	pub fn contains(&self, key: &InstanceKey) -> bool {
		self.entries.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Removes every entry, yielding the handles.
	pub fn drain(&mut self) -> impl Iterator<Item = H> + '_ {
		self.entries.drain().map(|(_, handle)| handle)
	}
}

impl<H: Clone> Default for InstanceCache<H> {
	fn default() -> Self {
		Self::new()
	}
}

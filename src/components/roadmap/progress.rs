//! Per-roadmap completion state and its persistence.
//!
//! Completion is a set of topic ids stored under `progress:<roadmap id>` as a
//! JSON array. Reads never fail: a missing or unparsable value is an empty
//! set. Writes go straight through to the backing store after every toggle.

use std::cell::RefCell;
use std::collections::HashMap;

use indexmap::IndexSet;
use log::{debug, warn};

use super::types::Roadmap;
use crate::error::{Error, Result};

pub const KEY_PREFIX: &str = "progress:";

/// Topic ids marked complete, in the order they were completed.
pub type CompletionSet = IndexSet<String>;

/// Minimal string key-value persistence.
pub trait KeyValueStore {
	fn get(&self, key: &str) -> Option<String>;
	fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store. Backs [`BrowserStorage`] when `localStorage` is
/// unavailable, so progress survives for the lifetime of the page.
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.borrow().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) -> Result<()> {
		self.entries
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
		Ok(())
	}
}

/// `window.localStorage`, or an in-memory map when the browser denies access.
pub enum BrowserStorage {
	Local(web_sys::Storage),
	Memory(MemoryStore),
}

impl BrowserStorage {
	pub fn new() -> Self {
		Self::from_local(web_sys::window().and_then(|w| w.local_storage().ok().flatten()))
	}

	pub fn from_local(storage: Option<web_sys::Storage>) -> Self {
		match storage {
			Some(storage) => BrowserStorage::Local(storage),
			None => {
				warn!("localStorage unavailable, progress is kept for this page only");
				BrowserStorage::Memory(MemoryStore::new())
			}
		}
	}
}

impl Default for BrowserStorage {
	fn default() -> Self {
		Self::new()
	}
}

impl KeyValueStore for BrowserStorage {
	fn get(&self, key: &str) -> Option<String> {
		match self {
			BrowserStorage::Local(storage) => storage.get_item(key).ok().flatten(),
			BrowserStorage::Memory(memory) => memory.get(key),
		}
	}

	fn set(&self, key: &str, value: &str) -> Result<()> {
		match self {
			BrowserStorage::Local(storage) => {
				storage.set_item(key, value).map_err(|e| Error::Storage {
					message: format!("{e:?}"),
				})
			}
			BrowserStorage::Memory(memory) => memory.set(key, value),
		}
	}
}

pub fn storage_key(roadmap_id: &str) -> String {
	format!("{KEY_PREFIX}{roadmap_id}")
}

pub struct ProgressStore<S> {
	store: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
	pub fn new(store: S) -> Self {
		Self { store }
	}

	#[cfg(test)]
	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn load(&self, roadmap_id: &str) -> CompletionSet {
		let key = storage_key(roadmap_id);
		let Some(raw) = self.store.get(&key) else {
			return CompletionSet::new();
		};
		match serde_json::from_str::<Vec<String>>(&raw) {
			Ok(ids) => ids.into_iter().collect(),
			Err(e) => {
				warn!("Ignoring corrupt progress under {key}: {e}");
				CompletionSet::new()
			}
		}
	}

	pub fn save(&self, roadmap_id: &str, ids: &CompletionSet) -> Result<()> {
		let value = serde_json::to_string(ids)?;
		debug!("Saving {} completed topics for {roadmap_id}", ids.len());
		self.store.set(&storage_key(roadmap_id), &value)
	}
}

/// Adds `topic_id` if absent, removes it if present.
pub fn toggle(mut ids: CompletionSet, topic_id: &str) -> CompletionSet {
	if !ids.shift_remove(topic_id) {
		ids.insert(topic_id.to_string());
	}
	ids
}

/// Completion summary shown in the progress badge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
	pub completed: usize,
	pub total: usize,
	pub percentage: u32,
}

impl Progress {
	/// Only ids that name a topic of `roadmap` count as completed.
	pub fn of(roadmap: &Roadmap, ids: &CompletionSet) -> Self {
		let completed = ids
			.iter()
			.filter(|id| roadmap.find_topic(id).is_some())
			.count();
		let total = roadmap.total_topics();
		Self {
			completed,
			total,
			percentage: percentage(completed, total),
		}
	}

	pub fn badge(&self) -> String {
		format!("{}% Done", self.percentage)
	}

	pub fn summary(&self) -> String {
		format!("{} of {} Done", self.completed, self.total)
	}
}

/// Rounded completion percentage; zero when there is nothing to complete.
pub fn percentage(completed: usize, total: usize) -> u32 {
	if total == 0 {
		return 0;
	}
	(100.0 * completed as f64 / total as f64).round() as u32
}

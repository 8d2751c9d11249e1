use std::{collections::HashMap, sync::Mutex};

/// String key-value storage owned by the embedding application, such as browser local storage.
pub trait KeyValueStore
where
	Self: Send + Sync,
{
	fn get(&self, key: &str) -> Option<String>;

	fn set(&self, key: &str, value: String);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: Mutex<HashMap<String, String>>,
}
impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.lock().unwrap_or_else(|err| err.into_inner()).get(key).cloned()
	}

	fn set(&self, key: &str, value: String) {
		self.entries.lock().unwrap_or_else(|err| err.into_inner()).insert(key.to_string(), value);
	}
}

#[cfg(test)]
mod tests {
	use super::{KeyValueStore, MemoryStore};

	#[test]
	fn set_overwrites_previous_value() {
		let store = MemoryStore::new();

		assert!(store.get("bookmarks").is_none());

		store.set("bookmarks", "[]".to_string());
		store.set("bookmarks", "[\"gmx\"]".to_string());

		assert_eq!(store.get("bookmarks").as_deref(), Some("[\"gmx\"]"));
		assert_eq!(store.len(), 1);
	}
}

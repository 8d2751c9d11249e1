use std::collections::BTreeSet;

use portal_catalog::Catalog;
use portal_domain::{KeyValueStore, Project};

use crate::Result;

pub const BOOKMARKS_KEY: &str = "bookmarks";
pub const RESEARCH_KEY_PREFIX: &str = "dyor:";

/// Bookmarked project slugs, stored as a JSON array. A corrupt stored value reads as empty.
pub struct Bookmarks<'a, S>
where
	S: ?Sized + KeyValueStore,
{
	store: &'a S,
}
impl<'a, S> Bookmarks<'a, S>
where
	S: ?Sized + KeyValueStore,
{
	pub fn new(store: &'a S) -> Self {
		Self { store }
	}

	pub fn list(&self) -> Vec<String> {
		let Some(raw) = self.store.get(BOOKMARKS_KEY) else { return Vec::new() };

		match serde_json::from_str::<Vec<String>>(&raw) {
			Ok(slugs) => slugs,
			Err(err) => {
				tracing::warn!(error = %err, "Ignoring unreadable bookmarks.");

				Vec::new()
			},
		}
	}

	pub fn contains(&self, slug: &str) -> bool {
		self.list().iter().any(|bookmarked| bookmarked == slug)
	}

	/// Adds or removes `slug` and returns whether it is bookmarked afterwards.
	pub fn toggle(&self, slug: &str) -> Result<bool> {
		let mut slugs = self.list();
		let bookmarked = match slugs.iter().position(|bookmarked| bookmarked == slug) {
			Some(idx) => {
				slugs.remove(idx);

				false
			},
			None => {
				slugs.push(slug.to_string());

				true
			},
		};

		self.store.set(BOOKMARKS_KEY, serde_json::to_string(&slugs)?);

		Ok(bookmarked)
	}
}

/// Completed research checklist steps per project, stored as a JSON array under
/// `dyor:<slug>`.
pub struct ResearchChecklist<'a, S>
where
	S: ?Sized + KeyValueStore,
{
	store: &'a S,
}
impl<'a, S> ResearchChecklist<'a, S>
where
	S: ?Sized + KeyValueStore,
{
	pub fn new(store: &'a S) -> Self {
		Self { store }
	}

	pub fn completed(&self, slug: &str) -> BTreeSet<u32> {
		self.store
			.get(&research_key(slug))
			.and_then(|raw| serde_json::from_str(&raw).ok())
			.unwrap_or_default()
	}

	pub fn set_step(&self, slug: &str, step: u32, done: bool) -> Result<()> {
		let mut steps = self.completed(slug);

		if done {
			steps.insert(step);
		} else {
			steps.remove(&step);
		}

		self.store.set(&research_key(slug), serde_json::to_string(&steps)?);

		Ok(())
	}

	pub fn is_complete(&self, slug: &str, total_steps: u32) -> bool {
		let steps = self.completed(slug);

		(0..total_steps).all(|step| steps.contains(&step))
	}

	pub fn reset(&self, slug: &str) -> Result<()> {
		self.store.set(&research_key(slug), serde_json::to_string(&BTreeSet::<u32>::new())?);

		Ok(())
	}
}

/// Bookmarked projects in catalog order. Slugs no longer in the catalog are skipped.
pub fn bookmarked_projects<'a, S>(
	catalog: &'a Catalog,
	bookmarks: &Bookmarks<'_, S>,
) -> Vec<&'a Project>
where
	S: ?Sized + KeyValueStore,
{
	let slugs: BTreeSet<String> = bookmarks.list().into_iter().collect();

	catalog.projects().iter().filter(|project| slugs.contains(&project.slug)).collect()
}

fn research_key(slug: &str) -> String {
	format!("{RESEARCH_KEY_PREFIX}{slug}")
}

pub mod bookmarks;
pub mod filter;
pub mod params;
pub mod search;
pub mod selection;

mod error;

pub use bookmarks::{Bookmarks, ResearchChecklist, bookmarked_projects};
pub use error::{Error, Result};
pub use filter::{filter_listings, filtered_orbit_chains, filtered_projects, sort_listings};
pub use params::{Page, decode_page, decode_search, decode_selection, encode_selection};
pub use search::SearchHit;
pub use selection::{ALL_CATEGORIES, CategoryFilter, Selection, SortOrder};

use std::{collections::BTreeMap, sync::Arc};

use serde::Serialize;

use portal_catalog::Catalog;
use portal_config::Config;
use portal_domain::{Category, Listing, OrbitChain, Project, Subcategory};

#[derive(Clone, Debug, Serialize)]
pub struct ListingResponse<T> {
	pub items: Vec<T>,
	pub total: usize,
	pub page: u32,
	pub page_size: u32,
	pub selection: BTreeMap<String, String>,
	pub snapshot: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchResponse {
	pub query: String,
	pub hits: Vec<SearchHit>,
	pub snapshot: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct CategoryListing {
	#[serde(flatten)]
	pub category: Category,
	pub subcategories: Vec<Subcategory>,
}

/// Listing and search operations over one immutable catalog snapshot.
pub struct Portal {
	catalog: Arc<Catalog>,
	search: portal_config::Search,
	listing: portal_config::Listing,
}
impl Portal {
	pub fn new(cfg: &Config, catalog: Arc<Catalog>) -> Self {
		Self { catalog, search: cfg.search.clone(), listing: cfg.listing.clone() }
	}

	pub fn with_settings(
		catalog: Arc<Catalog>,
		search: portal_config::Search,
		listing: portal_config::Listing,
	) -> Self {
		Self { catalog, search, listing }
	}

	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	pub fn snapshot(&self) -> &str {
		self.catalog.fingerprint()
	}

	pub fn list_projects<I, K, V>(&self, pairs: I) -> ListingResponse<Project>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let pairs = collect_pairs(pairs);
		let selection = decode_selection(pairs.iter().map(pair_refs), &self.catalog);
		let items = filtered_projects(&self.catalog, &selection);

		self.page_of(&pairs, &selection, items)
	}

	pub fn list_orbit_chains<I, K, V>(&self, pairs: I) -> ListingResponse<OrbitChain>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let pairs = collect_pairs(pairs);
		let selection = decode_selection(pairs.iter().map(pair_refs), &self.catalog);
		let items = filtered_orbit_chains(&self.catalog, &selection);

		self.page_of(&pairs, &selection, items)
	}

	pub fn search<I, K, V>(&self, pairs: I) -> SearchResponse
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let query = decode_search(pairs).unwrap_or_default();
		let hits = search::search(&self.catalog, &query, &self.search);

		SearchResponse { query, hits, snapshot: self.snapshot().to_string() }
	}

	/// Canonical query pairs for the selection encoded in `pairs`.
	pub fn canonical_selection<I, K, V>(&self, pairs: I) -> Vec<(String, String)>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		encode_selection(&decode_selection(pairs, &self.catalog))
	}

	pub fn project(&self, slug: &str) -> Result<Project> {
		self.catalog
			.project_by_slug(slug)
			.cloned()
			.ok_or_else(|| Error::NotFound { message: format!("No project with slug '{slug}'.") })
	}

	pub fn categories(&self) -> Vec<CategoryListing> {
		self.catalog
			.categories()
			.iter()
			.map(|category| CategoryListing {
				category: category.clone(),
				subcategories: self.catalog.subcategories_of(&category.id).cloned().collect(),
			})
			.collect()
	}

	fn page_of<T>(
		&self,
		pairs: &[(String, String)],
		selection: &Selection,
		items: Vec<&T>,
	) -> ListingResponse<T>
	where
		T: Clone + Listing,
	{
		let page = decode_page(pairs.iter().map(pair_refs), &self.listing);
		let total = items.len();
		let items = items
			.into_iter()
			.skip(page.offset())
			.take(page.page_size as usize)
			.cloned()
			.collect::<Vec<_>>();

		tracing::debug!(
			kind = %T::KIND,
			total,
			page = page.page,
			returned = items.len(),
			"Listing page served."
		);

		ListingResponse {
			items,
			total,
			page: page.page,
			page_size: page.page_size,
			selection: encode_selection(selection).into_iter().collect(),
			snapshot: self.snapshot().to_string(),
		}
	}
}

fn collect_pairs<I, K, V>(pairs: I) -> Vec<(String, String)>
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	pairs
		.into_iter()
		.map(|(key, value)| (key.as_ref().to_string(), value.as_ref().to_string()))
		.collect()
}

fn pair_refs(pair: &(String, String)) -> (&str, &str) {
	(pair.0.as_str(), pair.1.as_str())
}

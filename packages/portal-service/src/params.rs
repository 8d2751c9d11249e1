use std::collections::BTreeSet;

use serde::Serialize;

use portal_catalog::Catalog;
use portal_domain::text;

use crate::selection::{ALL_CATEGORIES, CategoryFilter, Selection, SortOrder};

pub const CATEGORY_KEY: &str = "category";
pub const SUBCATEGORIES_KEY: &str = "subcategories";
pub const CHAINS_KEY: &str = "chains";
pub const SORT_KEY: &str = "sort";
pub const SEARCH_KEY: &str = "search";
pub const PAGE_KEY: &str = "page";
pub const PAGE_SIZE_KEY: &str = "page_size";

const VALUE_SEPARATOR: char = ',';

/// One-based page window over a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
	pub page: u32,
	pub page_size: u32,
}
impl Page {
	pub fn offset(self) -> usize {
		(self.page.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
	}
}

/// Decodes query pairs into a selection. Keys may repeat and values may be comma-delimited.
/// Malformed or unknown values are dropped and missing ones fall back to defaults, so this
/// never fails.
pub fn decode_selection<I, K, V>(pairs: I, catalog: &Catalog) -> Selection
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut category = None;
	let mut subcategories = BTreeSet::new();
	let mut chains = BTreeSet::new();
	let mut sort = None;

	for (key, value) in pairs {
		let tokens = split_values(value.as_ref());

		match key.as_ref() {
			CATEGORY_KEY if category.is_none() => {
				category = tokens.into_iter().find_map(|token| {
					if token == ALL_CATEGORIES {
						Some(CategoryFilter::All)
					} else if text::is_slug(token) && catalog.category_by_slug(token).is_some() {
						Some(CategoryFilter::Only(token.to_string()))
					} else {
						None
					}
				});
			},
			SUBCATEGORIES_KEY => subcategories.extend(
				tokens.into_iter().filter(|token| text::is_slug(token)).map(str::to_string),
			),
			CHAINS_KEY => chains.extend(
				tokens.into_iter().filter(|token| catalog.has_chain(token)).map(str::to_string),
			),
			SORT_KEY if sort.is_none() => {
				sort = tokens.into_iter().find_map(SortOrder::parse);
			},
			_ => {},
		}
	}

	let selection = Selection {
		category: category.unwrap_or_default(),
		subcategories,
		chains,
		sort: sort.unwrap_or_default(),
	};

	selection.normalized(catalog)
}

/// Encodes a selection as query pairs, omitting every key that holds its default.
pub fn encode_selection(selection: &Selection) -> Vec<(String, String)> {
	let mut out = Vec::new();

	if let Some(slug) = selection.category.slug() {
		out.push((CATEGORY_KEY.to_string(), slug.to_string()));
	}
	if !selection.subcategories.is_empty() {
		out.push((SUBCATEGORIES_KEY.to_string(), join_values(&selection.subcategories)));
	}
	if !selection.chains.is_empty() {
		out.push((CHAINS_KEY.to_string(), join_values(&selection.chains)));
	}
	if selection.sort != SortOrder::default() {
		out.push((SORT_KEY.to_string(), selection.sort.as_str().to_string()));
	}

	out
}

/// First non-blank `search` value, trimmed.
pub fn decode_search<I, K, V>(pairs: I) -> Option<String>
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	pairs.into_iter().find_map(|(key, value)| {
		let value = value.as_ref().trim();

		(key.as_ref() == SEARCH_KEY && !value.is_empty()).then(|| value.to_string())
	})
}

/// Reads `page` and `page_size`. Unparsable values use the defaults; sizes are clamped to
/// `1..=max_page_size`.
pub fn decode_page<I, K, V>(pairs: I, cfg: &portal_config::Listing) -> Page
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut page = None;
	let mut page_size = None;

	for (key, value) in pairs {
		let parsed = value.as_ref().trim().parse::<u32>().ok();

		match key.as_ref() {
			PAGE_KEY if page.is_none() => page = parsed.filter(|page| *page > 0),
			PAGE_SIZE_KEY if page_size.is_none() => page_size = parsed.filter(|size| *size > 0),
			_ => {},
		}
	}

	Page {
		page: page.unwrap_or(1),
		page_size: page_size.unwrap_or(cfg.default_page_size).min(cfg.max_page_size).max(1),
	}
}

fn split_values(raw: &str) -> Vec<&str> {
	raw.split(VALUE_SEPARATOR).map(str::trim).filter(|token| !token.is_empty()).collect()
}

fn join_values(values: &BTreeSet<String>) -> String {
	values.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

use std::cmp::Reverse;

use portal_catalog::Catalog;
use portal_domain::{Listing, OrbitChain, Project, text};

use crate::selection::{Selection, SortOrder};

pub fn filtered_projects<'a>(catalog: &'a Catalog, selection: &Selection) -> Vec<&'a Project> {
	filter_listings(catalog, catalog.projects(), selection)
}

pub fn filtered_orbit_chains<'a>(
	catalog: &'a Catalog,
	selection: &Selection,
) -> Vec<&'a OrbitChain> {
	filter_listings(catalog, catalog.orbit_chains(), selection)
}

/// Retains the listings that satisfy every active constraint of `selection`, then orders them.
///
/// Category is single-select, subcategories and chains match when any selected value matches.
/// The `all` token applies no category filter. An unknown category slug is compared verbatim and
/// so matches nothing. Subcategories that do not belong to the selected category are ignored.
pub fn filter_listings<'a, T>(
	catalog: &Catalog,
	items: &'a [T],
	selection: &Selection,
) -> Vec<&'a T>
where
	T: Listing,
{
	let category_id = selection.category.slug().map(|slug| {
		catalog.category_by_slug(slug).map(|category| category.id.as_str()).unwrap_or(slug)
	});
	let subcategory_ids = effective_subcategory_ids(catalog, selection, category_id);
	let mut out: Vec<&T> = items
		.iter()
		.filter(|item| {
			category_id.is_none_or(|id| item.category_ids().iter().any(|candidate| candidate == id))
		})
		.filter(|item| {
			subcategory_ids.is_empty()
				|| item.subcategory_ids().iter().any(|id| subcategory_ids.contains(&id.as_str()))
		})
		.filter(|item| {
			selection.chains.is_empty()
				|| item.chain_ids().iter().any(|chain| selection.chains.contains(chain))
		})
		.collect();

	sort_listings(&mut out, selection.sort);

	tracing::debug!(
		kind = %T::KIND,
		category = ?selection.category,
		subcategories = subcategory_ids.len(),
		chains = selection.chains.len(),
		sort = %selection.sort,
		total = items.len(),
		kept = out.len(),
		"Listings filtered."
	);

	out
}

/// Stable sort; equal keys keep catalog order.
pub fn sort_listings<T>(items: &mut [&T], sort: SortOrder)
where
	T: Listing,
{
	match sort {
		SortOrder::Featured => items.sort_by_key(|item| Reverse(item.meta().is_featured)),
		SortOrder::Newest => items.sort_by_key(|item| {
			let created_at = item.meta().created_at;

			(created_at.is_none(), Reverse(created_at))
		}),
		SortOrder::Alphabetical => items.sort_by_cached_key(|item| text::fold(item.title())),
	}
}

fn effective_subcategory_ids<'a>(
	catalog: &'a Catalog,
	selection: &'a Selection,
	category_id: Option<&str>,
) -> Vec<&'a str> {
	selection
		.subcategories
		.iter()
		.filter_map(|slug| match (catalog.subcategory_by_slug(slug), category_id) {
			(Some(subcategory), Some(id)) if subcategory.category_id != id => None,
			(Some(subcategory), _) => Some(subcategory.id.as_str()),
			// Unknown slugs cannot belong to a selected category.
			(None, Some(_)) => None,
			(None, None) => Some(slug.as_str()),
		})
		.collect()
}

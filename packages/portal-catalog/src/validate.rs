use std::collections::{HashMap, HashSet};

use portal_domain::{EntityKind, text};

use crate::{CatalogParts, Error, Result};

struct Record<'a> {
	id: &'a str,
	slug: &'a str,
	title: &'a str,
}

pub(crate) fn validate(parts: &CatalogParts) -> Result<()> {
	check_records(
		EntityKind::Project,
		parts.projects.iter().map(|p| Record { id: &p.id, slug: &p.slug, title: &p.title }),
	)?;
	check_records(
		EntityKind::OrbitChain,
		parts.orbit_chains.iter().map(|c| Record { id: &c.id, slug: &c.slug, title: &c.title }),
	)?;
	check_records(
		EntityKind::Category,
		parts.categories.iter().map(|c| Record { id: &c.id, slug: &c.slug, title: &c.title }),
	)?;
	check_records(
		EntityKind::Subcategory,
		parts.subcategories.iter().map(|s| Record { id: &s.id, slug: &s.slug, title: &s.title }),
	)?;

	warn_shared_titles(parts);

	let category_ids: HashSet<&str> =
		parts.categories.iter().map(|category| category.id.as_str()).collect();
	let subcategory_ids: HashSet<&str> =
		parts.subcategories.iter().map(|subcategory| subcategory.id.as_str()).collect();

	for subcategory in &parts.subcategories {
		if !category_ids.contains(subcategory.category_id.as_str()) {
			return Err(Error::Integrity(format!(
				"subcategory '{}' references unknown category '{}'",
				subcategory.id, subcategory.category_id
			)));
		}
	}

	let listings = parts
		.projects
		.iter()
		.map(|p| (EntityKind::Project, &p.id, &p.category_ids, &p.subcategory_ids, &p.chain_ids))
		.chain(parts.orbit_chains.iter().map(|c| {
			(EntityKind::OrbitChain, &c.id, &c.category_ids, &c.subcategory_ids, &c.chain_ids)
		}));

	for (kind, id, categories, subcategories, chains) in listings {
		if chains.iter().any(|chain| chain.trim().is_empty()) {
			return Err(Error::Integrity(format!("{kind} '{id}' has an empty chain id")));
		}
		// Chain ids travel comma-joined in query strings.
		if let Some(chain) = chains.iter().find(|chain| chain.contains(',')) {
			return Err(Error::Integrity(format!(
				"{kind} '{id}' has chain id '{chain}' with a comma"
			)));
		}

		for category in categories {
			if !category_ids.contains(category.as_str()) {
				tracing::warn!(
					%kind,
					id = %id,
					category = %category,
					"Listing references unknown category."
				);
			}
		}
		for subcategory in subcategories {
			if !subcategory_ids.contains(subcategory.as_str()) {
				tracing::warn!(
					%kind,
					id = %id,
					subcategory = %subcategory,
					"Listing references unknown subcategory."
				);
			}
		}
	}

	Ok(())
}

fn check_records<'a>(kind: EntityKind, records: impl Iterator<Item = Record<'a>>) -> Result<()> {
	let mut ids = HashSet::new();
	let mut slugs = HashSet::new();

	for (position, record) in records.enumerate() {
		if record.id.trim().is_empty() {
			return Err(Error::Integrity(format!("{kind} at position {position} has an empty id")));
		}
		if !text::is_slug(record.slug) {
			return Err(Error::Integrity(format!(
				"{kind} '{}' has a malformed slug '{}'",
				record.id, record.slug
			)));
		}
		if record.title.trim().is_empty() {
			return Err(Error::Integrity(format!("{kind} '{}' has an empty title", record.id)));
		}
		if !ids.insert(record.id) {
			return Err(Error::Integrity(format!("duplicate {kind} id '{}'", record.id)));
		}
		if !slugs.insert(record.slug) {
			return Err(Error::Integrity(format!("duplicate {kind} slug '{}'", record.slug)));
		}
	}

	Ok(())
}

/// Exact-title search only ranks an entity first when its folded title is unique.
fn warn_shared_titles(parts: &CatalogParts) {
	let titles = parts
		.projects
		.iter()
		.map(|p| (EntityKind::Project, p.id.as_str(), p.title.as_str()))
		.chain(
			parts
				.orbit_chains
				.iter()
				.map(|c| (EntityKind::OrbitChain, c.id.as_str(), c.title.as_str())),
		)
		.chain(
			parts
				.categories
				.iter()
				.map(|c| (EntityKind::Category, c.id.as_str(), c.title.as_str())),
		)
		.chain(
			parts
				.subcategories
				.iter()
				.map(|s| (EntityKind::Subcategory, s.id.as_str(), s.title.as_str())),
		);
	let mut seen: HashMap<String, (EntityKind, &str)> = HashMap::new();

	for (kind, id, title) in titles {
		let folded = text::fold(title);

		if let Some((first_kind, first_id)) = seen.get(&folded) {
			tracing::warn!(
				%kind,
				id = %id,
				shared_with_kind = %first_kind,
				shared_with_id = %first_id,
				title = %title,
				"Folded title is shared by more than one entity."
			);
		} else {
			seen.insert(folded, (kind, id));
		}
	}
}

//! Shared catalogs for tests.
//!
//! `scenario_catalog` is the minimal two-project catalog used to check filter semantics.
//! `sample_catalog` is richer. Every folded title is unique across kinds and some entries are
//! undated. `keyed_catalog` is the sample catalog with category and subcategory ids that differ
//! from their slugs.

use time::{OffsetDateTime, macros::datetime};

use portal_catalog::{Catalog, CatalogParts};
use portal_domain::{Category, EntityMeta, OrbitChain, Project, Subcategory};

pub fn scenario_parts() -> CatalogParts {
	CatalogParts {
		projects: vec![
			ProjectBuilder::new("a", "A", "defi").chains(&["arb1"]).build(),
			ProjectBuilder::new("b", "B", "gaming").chains(&["arb1", "nova"]).build(),
		],
		orbit_chains: Vec::new(),
		categories: vec![category("defi", "DeFi", None), category("gaming", "Gaming", None)],
		subcategories: Vec::new(),
	}
}

pub fn scenario_catalog() -> Catalog {
	Catalog::from_parts(scenario_parts()).expect("Scenario fixture must be valid.")
}

pub fn sample_parts() -> CatalogParts {
	CatalogParts {
		projects: vec![
			ProjectBuilder::new("gmx", "GMX", "defi")
				.subcategories(&["perps"])
				.chains(&["arb1"])
				.description("Decentralized perpetuals exchange with low fees.")
				.tags(&["trading"])
				.featured()
				.created(datetime!(2021-09-01 00:00 UTC))
				.build(),
			ProjectBuilder::new("uniswap", "Uniswap", "defi")
				.subcategories(&["dex"])
				.chains(&["arb1"])
				.description("Automated market maker for token swaps.")
				.tags(&["amm"])
				.created(datetime!(2023-01-10 00:00 UTC))
				.build(),
			ProjectBuilder::new("treasure", "Treasure", "gaming")
				.subcategories(&["rpg"])
				.chains(&["arb1", "nova"])
				.description("Decentralized gaming ecosystem and marketplace.")
				.tags(&["marketplace"])
				.featured()
				.created(datetime!(2022-04-20 00:00 UTC))
				.build(),
			ProjectBuilder::new("camelot", "Camelot", "defi")
				.subcategories(&["dex"])
				.chains(&["arb1"])
				.description("Community driven liquidity hub.")
				.tags(&["amm"])
				.build(),
			ProjectBuilder::new("smolverse", "Smolverse", "gaming").chains(&["arb1"]).build(),
			ProjectBuilder::new("pendle", "Pendle", "defi")
				.chains(&["arb1"])
				.description("Yield tokenization.")
				.created(datetime!(2023-06-01 00:00 UTC))
				.build(),
		],
		orbit_chains: vec![
			orbit_chain("xai", "Xai", "gaming", &["arb1"], Some(datetime!(2024-01-09 00:00 UTC))),
			orbit_chain("apechain", "ApeChain", "gaming", &["arb1"], None),
			orbit_chain(
				"playblock",
				"PlayBlock",
				"gaming",
				&["nova"],
				Some(datetime!(2023-11-15 00:00 UTC)),
			),
		],
		categories: vec![
			category("defi", "DeFi", Some("Decentralized finance protocols.")),
			category("gaming", "Gaming", Some("On-chain games and worlds.")),
		],
		subcategories: vec![
			subcategory("dex", "DEX", "defi"),
			subcategory("perps", "Perpetuals", "defi"),
			subcategory("rpg", "RPG", "gaming"),
		],
	}
}

pub fn sample_catalog() -> Catalog {
	Catalog::from_parts(sample_parts()).expect("Sample fixture must be valid.")
}

/// The sample catalog with categories keyed `cat-<slug>` and subcategories keyed `sub-<slug>`.
pub fn keyed_parts() -> CatalogParts {
	let mut parts = sample_parts();
	let category_key = |id: &mut String| *id = format!("cat-{id}");
	let subcategory_key = |id: &mut String| *id = format!("sub-{id}");

	for project in &mut parts.projects {
		project.category_ids.iter_mut().for_each(category_key);
		project.subcategory_ids.iter_mut().for_each(subcategory_key);
	}
	for chain in &mut parts.orbit_chains {
		chain.category_ids.iter_mut().for_each(category_key);
		chain.subcategory_ids.iter_mut().for_each(subcategory_key);
	}
	for category in &mut parts.categories {
		category_key(&mut category.id);
	}
	for subcategory in &mut parts.subcategories {
		subcategory_key(&mut subcategory.id);
		category_key(&mut subcategory.category_id);
	}

	parts
}

pub fn keyed_catalog() -> Catalog {
	Catalog::from_parts(keyed_parts()).expect("Keyed fixture must be valid.")
}

struct ProjectBuilder(Project);
impl ProjectBuilder {
	fn new(slug: &str, title: &str, category_id: &str) -> Self {
		Self(Project {
			id: slug.to_string(),
			slug: slug.to_string(),
			title: title.to_string(),
			subtitle: None,
			description: None,
			category_ids: vec![category_id.to_string()],
			subcategory_ids: Vec::new(),
			chain_ids: Vec::new(),
			tags: Vec::new(),
			meta: EntityMeta::default(),
		})
	}

	fn subcategories(mut self, ids: &[&str]) -> Self {
		self.0.subcategory_ids = strings(ids);

		self
	}

	fn chains(mut self, ids: &[&str]) -> Self {
		self.0.chain_ids = strings(ids);

		self
	}

	fn description(mut self, text: &str) -> Self {
		self.0.description = Some(text.to_string());

		self
	}

	fn tags(mut self, tags: &[&str]) -> Self {
		self.0.tags = strings(tags);

		self
	}

	fn featured(mut self) -> Self {
		self.0.meta.is_featured = true;

		self
	}

	fn created(mut self, at: OffsetDateTime) -> Self {
		self.0.meta.created_at = Some(at);

		self
	}

	fn build(self) -> Project {
		self.0
	}
}

fn orbit_chain(
	slug: &str,
	title: &str,
	category_id: &str,
	chains: &[&str],
	created_at: Option<OffsetDateTime>,
) -> OrbitChain {
	OrbitChain {
		id: slug.to_string(),
		slug: slug.to_string(),
		title: title.to_string(),
		description: None,
		category_ids: vec![category_id.to_string()],
		subcategory_ids: Vec::new(),
		chain_ids: strings(chains),
		tags: Vec::new(),
		meta: EntityMeta { is_featured: false, created_at },
	}
}

fn category(slug: &str, title: &str, description: Option<&str>) -> Category {
	Category {
		id: slug.to_string(),
		slug: slug.to_string(),
		title: title.to_string(),
		description: description.map(str::to_string),
	}
}

fn subcategory(slug: &str, title: &str, category_id: &str) -> Subcategory {
	Subcategory {
		id: slug.to_string(),
		slug: slug.to_string(),
		title: title.to_string(),
		category_id: category_id.to_string(),
	}
}

fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(|value| value.to_string()).collect()
}

pub mod load;

mod error;
mod validate;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use portal_domain::{Category, OrbitChain, Project, Subcategory};

/// Deserialized catalog documents before validation.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CatalogParts {
	pub projects: Vec<Project>,
	pub orbit_chains: Vec<OrbitChain>,
	pub categories: Vec<Category>,
	pub subcategories: Vec<Subcategory>,
}

/// Immutable snapshot of every listed entity, in source order.
#[derive(Debug)]
pub struct Catalog {
	projects: Vec<Project>,
	orbit_chains: Vec<OrbitChain>,
	categories: Vec<Category>,
	subcategories: Vec<Subcategory>,
	project_by_id: HashMap<String, usize>,
	project_by_slug: HashMap<String, usize>,
	orbit_chain_by_slug: HashMap<String, usize>,
	category_by_id: HashMap<String, usize>,
	category_by_slug: HashMap<String, usize>,
	subcategory_by_id: HashMap<String, usize>,
	subcategory_by_slug: HashMap<String, usize>,
	chain_ids: BTreeSet<String>,
	fingerprint: String,
}
impl Catalog {
	/// Builds a catalog from in-memory records. The fingerprint is derived from their JSON
	/// serialization.
	pub fn from_parts(parts: CatalogParts) -> Result<Self> {
		let encoded = serde_json::to_vec(&parts)
			.map_err(|err| Error::Parse { document: "catalog parts".to_string(), source: err })?;
		let fingerprint = blake3::hash(&encoded).to_hex().to_string();

		Self::build(parts, fingerprint)
	}

	pub(crate) fn build(parts: CatalogParts, fingerprint: String) -> Result<Self> {
		validate::validate(&parts)?;

		let CatalogParts { projects, orbit_chains, categories, subcategories } = parts;
		let chain_ids = projects
			.iter()
			.flat_map(|project| project.chain_ids.iter())
			.chain(orbit_chains.iter().flat_map(|chain| chain.chain_ids.iter()))
			.cloned()
			.collect();

		Ok(Self {
			project_by_id: index_by(&projects, |project| project.id.as_str()),
			project_by_slug: index_by(&projects, |project| project.slug.as_str()),
			orbit_chain_by_slug: index_by(&orbit_chains, |chain| chain.slug.as_str()),
			category_by_id: index_by(&categories, |category| category.id.as_str()),
			category_by_slug: index_by(&categories, |category| category.slug.as_str()),
			subcategory_by_id: index_by(&subcategories, |subcategory| subcategory.id.as_str()),
			subcategory_by_slug: index_by(&subcategories, |subcategory| {
				subcategory.slug.as_str()
			}),
			projects,
			orbit_chains,
			categories,
			subcategories,
			chain_ids,
			fingerprint,
		})
	}

	pub fn projects(&self) -> &[Project] {
		&self.projects
	}

	pub fn orbit_chains(&self) -> &[OrbitChain] {
		&self.orbit_chains
	}

	pub fn categories(&self) -> &[Category] {
		&self.categories
	}

	pub fn subcategories(&self) -> &[Subcategory] {
		&self.subcategories
	}

	pub fn project_by_id(&self, id: &str) -> Option<&Project> {
		self.project_by_id.get(id).map(|&idx| &self.projects[idx])
	}

	pub fn project_by_slug(&self, slug: &str) -> Option<&Project> {
		self.project_by_slug.get(slug).map(|&idx| &self.projects[idx])
	}

	pub fn orbit_chain_by_slug(&self, slug: &str) -> Option<&OrbitChain> {
		self.orbit_chain_by_slug.get(slug).map(|&idx| &self.orbit_chains[idx])
	}

	pub fn category_by_id(&self, id: &str) -> Option<&Category> {
		self.category_by_id.get(id).map(|&idx| &self.categories[idx])
	}

	pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
		self.category_by_slug.get(slug).map(|&idx| &self.categories[idx])
	}

	pub fn subcategory_by_id(&self, id: &str) -> Option<&Subcategory> {
		self.subcategory_by_id.get(id).map(|&idx| &self.subcategories[idx])
	}

	pub fn subcategory_by_slug(&self, slug: &str) -> Option<&Subcategory> {
		self.subcategory_by_slug.get(slug).map(|&idx| &self.subcategories[idx])
	}

	pub fn subcategories_of<'a>(
		&'a self,
		category_id: &'a str,
	) -> impl Iterator<Item = &'a Subcategory> + 'a {
		self.subcategories.iter().filter(move |subcategory| subcategory.category_id == category_id)
	}

	/// Chain identifiers referenced by any project or orbit chain, sorted.
	pub fn chain_ids(&self) -> &BTreeSet<String> {
		&self.chain_ids
	}

	pub fn has_chain(&self, chain_id: &str) -> bool {
		self.chain_ids.contains(chain_id)
	}

	/// Hex blake3 digest identifying this snapshot.
	pub fn fingerprint(&self) -> &str {
		&self.fingerprint
	}
}

fn index_by<T>(items: &[T], key: impl Fn(&T) -> &str) -> HashMap<String, usize> {
	items.iter().enumerate().map(|(idx, item)| (key(item).to_string(), idx)).collect()
}

#[cfg(test)]
mod tests {
	use super::{Catalog, CatalogParts, Error};
	use portal_domain::{Category, EntityMeta, OrbitChain, Project, Subcategory};

	fn project(id: &str, category: &str, chains: &[&str]) -> Project {
		Project {
			id: id.to_string(),
			slug: id.to_string(),
			title: id.to_uppercase(),
			subtitle: None,
			description: None,
			category_ids: vec![category.to_string()],
			subcategory_ids: Vec::new(),
			chain_ids: chains.iter().map(|chain| chain.to_string()).collect(),
			tags: Vec::new(),
			meta: EntityMeta::default(),
		}
	}

	fn category(id: &str) -> Category {
		Category {
			id: id.to_string(),
			slug: id.to_string(),
			title: id.to_string(),
			description: None,
		}
	}

	fn parts() -> CatalogParts {
		CatalogParts {
			projects: vec![
				project("a", "defi", &["arb1"]),
				project("b", "gaming", &["arb1", "nova"]),
			],
			orbit_chains: vec![OrbitChain {
				id: "xai".to_string(),
				slug: "xai".to_string(),
				title: "Xai".to_string(),
				description: None,
				category_ids: vec!["gaming".to_string()],
				subcategory_ids: Vec::new(),
				chain_ids: vec!["arb1".to_string(), "xai-mainnet".to_string()],
				tags: Vec::new(),
				meta: EntityMeta::default(),
			}],
			categories: vec![category("defi"), category("gaming")],
			subcategories: vec![Subcategory {
				id: "dex".to_string(),
				slug: "dex".to_string(),
				title: "DEX".to_string(),
				category_id: "defi".to_string(),
			}],
		}
	}

	#[test]
	fn lookups_resolve_by_id_and_slug() {
		let catalog = Catalog::from_parts(parts()).expect("Failed to build catalog.");

		assert_eq!(catalog.project_by_id("b").map(|project| project.title.as_str()), Some("B"));
		assert!(catalog.project_by_id("missing").is_none());
		assert_eq!(
			catalog.category_by_slug("gaming").map(|category| category.id.as_str()),
			Some("gaming")
		);
		assert_eq!(catalog.subcategories_of("defi").count(), 1);
		assert_eq!(catalog.subcategories_of("gaming").count(), 0);
	}

	#[test]
	fn chain_ids_cover_projects_and_orbit_chains() {
		let catalog = Catalog::from_parts(parts()).expect("Failed to build catalog.");
		let chains: Vec<&str> = catalog.chain_ids().iter().map(String::as_str).collect();

		assert_eq!(chains, vec!["arb1", "nova", "xai-mainnet"]);
	}

	#[test]
	fn fingerprint_is_stable_for_identical_parts() {
		let first = Catalog::from_parts(parts()).expect("Failed to build catalog.");
		let second = Catalog::from_parts(parts()).expect("Failed to build catalog.");
		let mut changed = parts();

		changed.projects.pop();

		let third = Catalog::from_parts(changed).expect("Failed to build catalog.");

		assert_eq!(first.fingerprint(), second.fingerprint());
		assert_ne!(first.fingerprint(), third.fingerprint());
		assert_eq!(first.fingerprint().len(), 64);
	}

	#[test]
	fn duplicate_project_slug_is_an_integrity_error() {
		let mut broken = parts();

		broken.projects[1].slug = "a".to_string();

		let err = Catalog::from_parts(broken).expect_err("Expected integrity error.");

		assert!(matches!(err, Error::Integrity(_)));
		assert!(err.to_string().contains("duplicate project slug 'a'"), "{err}");
	}
}

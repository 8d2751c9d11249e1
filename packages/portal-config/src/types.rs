use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_PROJECTS_FILE: &str = "projects.json";
pub const DEFAULT_ORBIT_CHAINS_FILE: &str = "orbitChains.json";
pub const DEFAULT_CATEGORIES_FILE: &str = "categories.json";
pub const DEFAULT_SUBCATEGORIES_FILE: &str = "subcategories.json";

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub catalog: CatalogSource,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub listing: Listing,
	#[serde(default)]
	pub security: Security,
	pub sync: Option<SyncSource>,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

/// Location of the generated catalog documents.
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogSource {
	pub data_dir: PathBuf,
	#[serde(default = "default_projects_file")]
	pub projects_file: String,
	#[serde(default = "default_orbit_chains_file")]
	pub orbit_chains_file: String,
	#[serde(default = "default_categories_file")]
	pub categories_file: String,
	#[serde(default = "default_subcategories_file")]
	pub subcategories_file: String,
}
impl CatalogSource {
	pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
		Self {
			data_dir: data_dir.into(),
			projects_file: default_projects_file(),
			orbit_chains_file: default_orbit_chains_file(),
			categories_file: default_categories_file(),
			subcategories_file: default_subcategories_file(),
		}
	}

	pub fn file_names(&self) -> [&str; 4] {
		[
			self.projects_file.as_str(),
			self.orbit_chains_file.as_str(),
			self.categories_file.as_str(),
			self.subcategories_file.as_str(),
		]
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Normalized relevance below which matches are dropped.
	pub min_score: f32,
	/// Zero means unlimited.
	pub max_results: u32,
	pub include_descriptions: bool,
	pub description_weight: f32,
	pub typo_tolerance: bool,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			min_score: 0.35,
			max_results: 50,
			include_descriptions: true,
			description_weight: 0.6,
			typo_tolerance: true,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Listing {
	pub default_page_size: u32,
	pub max_page_size: u32,
}
impl Default for Listing {
	fn default() -> Self {
		Self { default_page_size: 24, max_page_size: 200 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Security {
	pub bind_localhost_only: bool,
}
impl Default for Security {
	fn default() -> Self {
		Self { bind_localhost_only: true }
	}
}

#[derive(Debug, Deserialize)]
pub struct SyncSource {
	pub base_url: String,
	#[serde(default = "default_sync_timeout_ms")]
	pub timeout_ms: u64,
	/// Defaults to the four catalog file names.
	#[serde(default)]
	pub files: Vec<String>,
}

fn default_projects_file() -> String {
	DEFAULT_PROJECTS_FILE.to_string()
}

fn default_orbit_chains_file() -> String {
	DEFAULT_ORBIT_CHAINS_FILE.to_string()
}

fn default_categories_file() -> String {
	DEFAULT_CATEGORIES_FILE.to_string()
}

fn default_subcategories_file() -> String {
	DEFAULT_SUBCATEGORIES_FILE.to_string()
}

fn default_sync_timeout_ms() -> u64 {
	10_000
}

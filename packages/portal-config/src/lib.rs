mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	CatalogSource, Config, DEFAULT_CATEGORIES_FILE, DEFAULT_ORBIT_CHAINS_FILE,
	DEFAULT_PROJECTS_FILE, DEFAULT_SUBCATEGORIES_FILE, Listing, Search, Security, Service,
	SyncSource,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.catalog.data_dir.as_os_str().is_empty() {
		return Err(Error::Validation {
			message: "catalog.data_dir must be non-empty.".to_string(),
		});
	}

	for (label, name) in [
		("catalog.projects_file", &cfg.catalog.projects_file),
		("catalog.orbit_chains_file", &cfg.catalog.orbit_chains_file),
		("catalog.categories_file", &cfg.catalog.categories_file),
		("catalog.subcategories_file", &cfg.catalog.subcategories_file),
	] {
		if name.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
		if name.contains('/') || name.contains('\\') {
			return Err(Error::Validation {
				message: format!("{label} must be a file name, not a path."),
			});
		}
	}

	if !cfg.search.min_score.is_finite() {
		return Err(Error::Validation {
			message: "search.min_score must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.search.min_score) {
		return Err(Error::Validation {
			message: "search.min_score must be in the range 0.0-1.0.".to_string(),
		});
	}
	if !cfg.search.description_weight.is_finite() {
		return Err(Error::Validation {
			message: "search.description_weight must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.search.description_weight) {
		return Err(Error::Validation {
			message: "search.description_weight must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.listing.default_page_size == 0 {
		return Err(Error::Validation {
			message: "listing.default_page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.listing.max_page_size < cfg.listing.default_page_size {
		return Err(Error::Validation {
			message: "listing.max_page_size must be at least listing.default_page_size."
				.to_string(),
		});
	}

	if let Some(sync) = cfg.sync.as_ref() {
		if sync.base_url.trim().is_empty() {
			return Err(Error::Validation {
				message: "sync.base_url must be non-empty.".to_string(),
			});
		}
		if !sync.base_url.starts_with("http://") && !sync.base_url.starts_with("https://") {
			return Err(Error::Validation {
				message: "sync.base_url must be an http or https URL.".to_string(),
			});
		}
		if sync.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "sync.timeout_ms must be greater than zero.".to_string(),
			});
		}
		if sync.files.iter().any(|file| file.trim().is_empty()) {
			return Err(Error::Validation {
				message: "sync.files must not contain empty names.".to_string(),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if let Some(sync) = cfg.sync.as_mut() {
		while sync.base_url.ends_with('/') {
			sync.base_url.pop();
		}

		if sync.files.is_empty() {
			sync.files = cfg.catalog.file_names().iter().map(|name| name.to_string()).collect();
		}
	}
}

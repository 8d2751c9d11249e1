use std::{fs, path::Path};

use serde::de::DeserializeOwned;

use portal_config::CatalogSource;

use crate::{Catalog, CatalogParts, Error, Result};

impl Catalog {
	/// Reads and validates the four catalog documents under `source.data_dir`.
	pub fn load(source: &CatalogSource) -> Result<Self> {
		let catalog = Self::from_documents(source, |name| read_bytes(&source.data_dir, name))?;

		tracing::info!(
			data_dir = %source.data_dir.display(),
			projects = catalog.projects().len(),
			orbit_chains = catalog.orbit_chains().len(),
			categories = catalog.categories().len(),
			subcategories = catalog.subcategories().len(),
			fingerprint = catalog.fingerprint(),
			"Catalog loaded."
		);

		Ok(catalog)
	}

	/// Parses and validates the documents named by `source`, taking their bytes from `document`.
	/// The fingerprint matches what [`Catalog::load`] computes for the same bytes on disk.
	pub fn from_documents<F>(source: &CatalogSource, mut document: F) -> Result<Self>
	where
		F: FnMut(&str) -> Result<Vec<u8>>,
	{
		let mut hasher = blake3::Hasher::new();
		let mut next = |name: &str| -> Result<Vec<u8>> {
			let bytes = document(name)?;

			hasher.update(name.as_bytes());
			hasher.update(&(bytes.len() as u64).to_le_bytes());
			hasher.update(&bytes);

			Ok(bytes)
		};
		let parts = CatalogParts {
			projects: parse_document(&source.projects_file, &next(&source.projects_file)?)?,
			orbit_chains: parse_document(
				&source.orbit_chains_file,
				&next(&source.orbit_chains_file)?,
			)?,
			categories: parse_document(&source.categories_file, &next(&source.categories_file)?)?,
			subcategories: parse_document(
				&source.subcategories_file,
				&next(&source.subcategories_file)?,
			)?,
		};
		let fingerprint = hasher.finalize().to_hex().to_string();

		Self::build(parts, fingerprint)
	}
}

/// Parses one catalog document, which must be a JSON array of records.
pub fn parse_document<T>(document: &str, bytes: &[u8]) -> Result<Vec<T>>
where
	T: DeserializeOwned,
{
	serde_json::from_slice(bytes)
		.map_err(|err| Error::Parse { document: document.to_string(), source: err })
}

/// Reads the raw bytes of the document `name` under `data_dir`.
pub fn read_bytes(data_dir: &Path, name: &str) -> Result<Vec<u8>> {
	let path = data_dir.join(name);

	fs::read(&path).map_err(|err| Error::Read { path, source: err })
}

use std::{
	path::{Path, PathBuf},
	time::Duration,
};

use reqwest::Client;
use serde_json::Value;
use tokio::fs;

use portal_catalog::{Catalog, load};
use portal_config::{CatalogSource, SyncSource};

use crate::{Error, Result};

const TEMP_SUFFIX: &str = ".partial";

#[derive(Debug)]
pub struct SyncReport {
	pub documents: Vec<DocumentReport>,
	pub fingerprint: String,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DocumentReport {
	pub file: String,
	pub records: usize,
	pub bytes: usize,
}

/// Fetches every configured document, validates the resulting snapshot, then replaces the local
/// copies. Nothing is written unless every document was fetched, parsed and the combined
/// catalog passed its integrity checks.
pub async fn mirror(sync: &SyncSource, catalog: &CatalogSource) -> Result<SyncReport> {
	let client = Client::builder().timeout(Duration::from_millis(sync.timeout_ms)).build()?;
	let mut staged = Vec::with_capacity(sync.files.len());

	for file in &sync.files {
		let bytes = fetch_document(&client, &sync.base_url, file).await?;
		let records = validate_document(file, &bytes)?;

		tracing::debug!(file = %file, records, bytes = bytes.len(), "Document fetched.");

		staged.push((file, bytes, records));
	}

	// Documents not mirrored keep their current bytes.
	let snapshot = Catalog::from_documents(catalog, |name| {
		match staged.iter().find(|(file, _, _)| file.as_str() == name) {
			Some((_, bytes, _)) => Ok(bytes.clone()),
			None => load::read_bytes(&catalog.data_dir, name),
		}
	})?;

	fs::create_dir_all(&catalog.data_dir)
		.await
		.map_err(|source| Error::Write { path: catalog.data_dir.clone(), source })?;

	let mut temps = Vec::with_capacity(staged.len());

	for (file, bytes, _) in &staged {
		match write_temp(&catalog.data_dir, file, bytes).await {
			Ok(temp) => temps.push((temp, catalog.data_dir.join(file))),
			Err(err) => {
				for (temp, _) in &temps {
					let _ = fs::remove_file(temp).await;
				}

				return Err(err);
			},
		}
	}
	for (temp, target) in temps {
		if let Err(source) = fs::rename(&temp, &target).await {
			let _ = fs::remove_file(&temp).await;

			return Err(Error::Write { path: target, source });
		}
	}

	let documents = staged
		.into_iter()
		.map(|(file, bytes, records)| DocumentReport {
			file: file.clone(),
			records,
			bytes: bytes.len(),
		})
		.collect();

	Ok(SyncReport { documents, fingerprint: snapshot.fingerprint().to_string() })
}

pub fn document_url(base_url: &str, file: &str) -> String {
	format!("{}/{}", base_url.trim_end_matches('/'), file.trim_start_matches('/'))
}

async fn fetch_document(client: &Client, base_url: &str, file: &str) -> Result<Vec<u8>> {
	let url = document_url(base_url, file);
	let res = client
		.get(&url)
		.send()
		.await
		.and_then(|res| res.error_for_status())
		.map_err(|source| Error::Fetch { url: url.clone(), source })?;
	let bytes = res.bytes().await.map_err(|source| Error::Fetch { url, source })?;

	Ok(bytes.to_vec())
}

/// Checks that a document is a JSON array of objects and returns its length.
pub fn validate_document(file: &str, bytes: &[u8]) -> Result<usize> {
	let invalid = |message: String| Error::InvalidDocument { file: file.to_string(), message };
	let value: Value = serde_json::from_slice(bytes).map_err(|err| invalid(err.to_string()))?;
	let Value::Array(records) = value else {
		return Err(invalid("expected a JSON array".to_string()));
	};

	if let Some(idx) = records.iter().position(|record| !record.is_object()) {
		return Err(invalid(format!("record {idx} is not an object")));
	}

	Ok(records.len())
}

/// Writes `bytes` next to the target under a temporary name and returns that path.
async fn write_temp(dir: &Path, file: &str, bytes: &[u8]) -> Result<PathBuf> {
	let temp = dir.join(format!("{file}{TEMP_SUFFIX}"));

	fs::write(&temp, bytes).await.map_err(|source| Error::Write { path: temp.clone(), source })?;

	Ok(temp)
}

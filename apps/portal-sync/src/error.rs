use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to fetch {url}: {source}")]
	Fetch { url: String, source: reqwest::Error },
	#[error("Document {file} is invalid: {message}")]
	InvalidDocument { file: String, message: String },
	#[error("Failed to write {path:?}: {source}")]
	Write { path: PathBuf, source: std::io::Error },
	#[error(transparent)]
	Http(#[from] reqwest::Error),
	#[error(transparent)]
	Catalog(#[from] portal_catalog::Error),
}

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read catalog document at {path:?}.")]
	Read { path: PathBuf, source: std::io::Error },
	#[error("Failed to parse catalog document {document}: {source}")]
	Parse { document: String, source: serde_json::Error },
	#[error("Invalid catalog: {0}")]
	Integrity(String),
}

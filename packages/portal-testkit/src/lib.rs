pub mod fixtures;

use std::{
	env, fs,
	path::{Path, PathBuf},
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use portal_catalog::CatalogParts;
use portal_config::CatalogSource;

/// A scratch catalog data directory removed on drop.
pub struct DataDir {
	path: PathBuf,
}
impl DataDir {
	pub fn new(prefix: &str) -> Self {
		static COUNTER: AtomicU64 = AtomicU64::new(0);

		let nanos = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|elapsed| elapsed.as_nanos())
			.unwrap_or_default();
		let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
		let path = env::temp_dir().join(format!(
			"{prefix}_{nanos}_{}_{ordinal}",
			std::process::id()
		));

		fs::create_dir_all(&path).expect("Failed to create test data dir.");

		Self { path }
	}

	/// A data directory holding the four documents of `parts`.
	pub fn with_parts(prefix: &str, parts: &CatalogParts) -> Self {
		let dir = Self::new(prefix);

		dir.write_parts(parts);

		dir
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn source(&self) -> CatalogSource {
		CatalogSource::with_data_dir(&self.path)
	}

	pub fn write_raw(&self, name: &str, raw: &str) {
		fs::write(self.path.join(name), raw).expect("Failed to write test document.");
	}

	pub fn write_parts(&self, parts: &CatalogParts) {
		let source = self.source();
		let documents = [
			(&source.projects_file, serde_json::to_string_pretty(&parts.projects)),
			(&source.orbit_chains_file, serde_json::to_string_pretty(&parts.orbit_chains)),
			(&source.categories_file, serde_json::to_string_pretty(&parts.categories)),
			(&source.subcategories_file, serde_json::to_string_pretty(&parts.subcategories)),
		];

		for (name, document) in documents {
			self.write_raw(name, &document.expect("Fixture records must serialize."));
		}
	}
}
impl Drop for DataDir {
	fn drop(&mut self) {
		if let Err(err) = fs::remove_dir_all(&self.path) {
			eprintln!("Test data dir cleanup failed: {err}.");
		}
	}
}

use std::{collections::HashMap, sync::Arc};

use axum::{
	Router,
	extract::{Path, State},
	http::StatusCode,
	routing::get,
};
use tokio::net::TcpListener;

use portal_config::{CatalogSource, SyncSource};
use portal_sync::{Error, mirror};
use portal_testkit::{DataDir, fixtures};

type Documents = Arc<HashMap<String, String>>;

async fn serve(documents: HashMap<String, String>) -> String {
	let app = Router::new()
		.route("/data/{file}", get(document))
		.with_state(Arc::new(documents) as Documents);
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind test server.");
	let addr = listener.local_addr().expect("Listener must have an address.");

	tokio::spawn(async move {
		axum::serve(listener, app).await.expect("Test server failed.");
	});

	format!("http://{addr}/data")
}

async fn document(
	State(documents): State<Documents>,
	Path(file): Path<String>,
) -> Result<String, StatusCode> {
	documents.get(&file).cloned().ok_or(StatusCode::NOT_FOUND)
}

fn sample_documents(source: &CatalogSource) -> HashMap<String, String> {
	let parts = fixtures::sample_parts();
	let encode = |value: serde_json::Result<String>| value.expect("Fixture must serialize.");

	HashMap::from([
		(source.projects_file.clone(), encode(serde_json::to_string(&parts.projects))),
		(source.orbit_chains_file.clone(), encode(serde_json::to_string(&parts.orbit_chains))),
		(source.categories_file.clone(), encode(serde_json::to_string(&parts.categories))),
		(source.subcategories_file.clone(), encode(serde_json::to_string(&parts.subcategories))),
	])
}

fn sync_source(base_url: String, source: &CatalogSource) -> SyncSource {
	SyncSource {
		base_url,
		timeout_ms: 5_000,
		files: source.file_names().iter().map(|name| name.to_string()).collect(),
	}
}

#[tokio::test]
async fn mirrors_every_document_and_loads_the_catalog() {
	let dir = DataDir::new("portal_sync_ok");
	let source = dir.source();
	let base_url = serve(sample_documents(&source)).await;
	let report = mirror::mirror(&sync_source(base_url, &source), &source)
		.await
		.expect("Mirror must succeed.");
	let projects = report
		.documents
		.iter()
		.find(|document| document.file == source.projects_file)
		.expect("Projects must be reported.");

	assert_eq!(report.documents.len(), 4);
	assert_eq!(projects.records, fixtures::sample_parts().projects.len());
	assert!(!report.fingerprint.is_empty());

	for name in source.file_names() {
		assert!(dir.path().join(name).is_file(), "{name} must be written");
	}
}

#[tokio::test]
async fn invalid_document_leaves_existing_snapshot_untouched() {
	let dir = DataDir::with_parts("portal_sync_invalid", &fixtures::scenario_parts());
	let source = dir.source();
	let before = std::fs::read(dir.path().join(&source.projects_file))
		.expect("Scenario projects must exist.");
	let mut documents = sample_documents(&source);

	documents.insert(source.subcategories_file.clone(), "{\"not\":\"an array\"}".to_string());

	let base_url = serve(documents).await;
	let err = mirror::mirror(&sync_source(base_url, &source), &source)
		.await
		.expect_err("Mirror must reject the document.");

	assert!(matches!(err, Error::InvalidDocument { .. }));
	assert_eq!(
		std::fs::read(dir.path().join(&source.projects_file)).expect("Projects must remain."),
		before
	);
}

#[tokio::test]
async fn missing_document_is_a_fetch_error() {
	let dir = DataDir::new("portal_sync_missing");
	let source = dir.source();
	let mut documents = sample_documents(&source);

	documents.remove(&source.orbit_chains_file);

	let base_url = serve(documents).await;
	let err = mirror::mirror(&sync_source(base_url, &source), &source)
		.await
		.expect_err("Mirror must fail on a 404.");

	assert!(matches!(err, Error::Fetch { .. }));
	assert!(!dir.path().join(&source.projects_file).exists());
}

#[tokio::test]
async fn inconsistent_catalog_keeps_previous_snapshot_loadable() {
	let dir = DataDir::with_parts("portal_sync_orphan", &fixtures::scenario_parts());
	let source = dir.source();
	let before = portal_catalog::Catalog::load(&source).expect("Scenario snapshot must load.");
	let mut documents = sample_documents(&source);

	documents.insert(
		source.subcategories_file.clone(),
		r#"[{"id":"x","slug":"x","title":"X","categoryId":"missing"}]"#.to_string(),
	);

	let base_url = serve(documents).await;
	let err = mirror::mirror(&sync_source(base_url, &source), &source)
		.await
		.expect_err("Mirror must reject an inconsistent catalog.");

	assert!(matches!(err, Error::Catalog(_)), "{err}");

	let after = portal_catalog::Catalog::load(&source).expect("Previous snapshot must survive.");

	assert_eq!(after.fingerprint(), before.fingerprint());

	for name in source.file_names() {
		assert!(!dir.path().join(format!("{name}.partial")).exists());
	}
}

#[tokio::test]
async fn reported_fingerprint_matches_the_written_snapshot() {
	let dir = DataDir::new("portal_sync_fingerprint");
	let source = dir.source();
	let base_url = serve(sample_documents(&source)).await;
	let report = mirror::mirror(&sync_source(base_url, &source), &source)
		.await
		.expect("Mirror must succeed.");
	let loaded = portal_catalog::Catalog::load(&source).expect("Mirrored snapshot must load.");

	assert_eq!(report.fingerprint, loaded.fingerprint());
}

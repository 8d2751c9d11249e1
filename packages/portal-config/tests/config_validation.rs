use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use portal_config::Config;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.expect("Template config must be a table.")
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.expect("Template config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("portal_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> portal_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = portal_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn expect_validation_error(payload: String, expected: &str) {
	let err = load_payload(payload).expect_err("Expected validation error.");
	let message = err.to_string();

	assert!(message.contains(expected), "Unexpected error message: {message}");
}

#[test]
fn sample_config_loads_and_normalizes_sync() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Sample config must load.");
	let sync = cfg.sync.expect("Sample config must include [sync].");

	assert_eq!(sync.base_url, "https://portal-data.example.org/data");
	assert_eq!(
		sync.files,
		vec!["projects.json", "orbitChains.json", "categories.json", "subcategories.json"]
	);
	assert_eq!(cfg.catalog.projects_file, "projects.json");
	assert_eq!(cfg.listing.default_page_size, 24);
}

#[test]
fn optional_sections_fall_back_to_defaults() {
	let payload = r#"
[service]
http_bind = "127.0.0.1:8080"
log_level = "debug"

[catalog]
data_dir = "data"
"#;
	let cfg = load_payload(payload.to_string()).expect("Minimal config must load.");

	assert!(cfg.sync.is_none());
	assert!(cfg.security.bind_localhost_only);
	assert_eq!(cfg.search.max_results, 50);
	assert!(cfg.search.typo_tolerance);
}

#[test]
fn min_score_must_be_in_unit_range() {
	expect_validation_error(
		sample_toml_with("search", "min_score", Value::Float(1.5)),
		"search.min_score must be in the range 0.0-1.0.",
	);
}

#[test]
fn description_weight_must_be_in_unit_range() {
	expect_validation_error(
		sample_toml_with("search", "description_weight", Value::Float(-0.1)),
		"search.description_weight must be in the range 0.0-1.0.",
	);
}

#[test]
fn page_size_must_be_positive() {
	expect_validation_error(
		sample_toml_with("listing", "default_page_size", Value::Integer(0)),
		"listing.default_page_size must be greater than zero.",
	);
}

#[test]
fn max_page_size_must_cover_default() {
	expect_validation_error(
		sample_toml_with("listing", "max_page_size", Value::Integer(10)),
		"listing.max_page_size must be at least listing.default_page_size.",
	);
}

#[test]
fn catalog_file_names_must_not_be_paths() {
	expect_validation_error(
		sample_toml_with("catalog", "projects_file", Value::String("../projects.json".into())),
		"catalog.projects_file must be a file name, not a path.",
	);
}

#[test]
fn sync_base_url_must_be_http() {
	expect_validation_error(
		sample_toml_with("sync", "base_url", Value::String("ftp://example.org".into())),
		"sync.base_url must be an http or https URL.",
	);
}

#[test]
fn sync_timeout_must_be_positive() {
	expect_validation_error(
		sample_toml_with("sync", "timeout_ms", Value::Integer(0)),
		"sync.timeout_ms must be greater than zero.",
	);
}

#[test]
fn missing_file_reports_read_error() {
	let err = portal_config::load(&PathBuf::from("/nonexistent/portal.toml"))
		.expect_err("Expected read error.");

	assert!(matches!(err, portal_config::Error::ReadConfig { .. }));
}

#[test]
fn malformed_toml_reports_parse_error() {
	let err = load_payload("[service\nhttp_bind =".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, portal_config::Error::ParseConfig { .. }));
}

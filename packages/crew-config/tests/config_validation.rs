use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use crew_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(section: &[&str], key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let mut table = root.as_table_mut().expect("Sample config must be a table.");

	for name in section {
		table = table
			.get_mut(*name)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Sample config must include [{name}]."));
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
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

	path.push(format!("crew_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> crew_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = crew_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn expect_validation(payload: String, expected: &str) {
	let err = load_payload(payload).expect_err("Expected validation error.");

	assert!(matches!(err, Error::Validation { .. }), "Unexpected error kind: {err:?}");

	let message = err.to_string();

	assert!(message.contains(expected), "Unexpected error message: {message}");
}

#[test]
fn sample_config_loads() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.search.retrieval.default_mode, "hybrid");
	assert_eq!(cfg.search.quality.min_relevance, 0.25);
	assert_eq!(cfg.search.rerank.max_documents, 100);
	assert!(cfg.security.api_auth_token.is_none(), "Blank tokens must normalize to None.");
}

#[test]
fn search_section_is_optional() {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");

	root.as_table_mut().expect("Sample config must be a table.").remove("search");

	let cfg: Config = toml::from_str(&toml::to_string(&root).expect("Failed to render config."))
		.expect("Config without [search] must parse.");

	assert_eq!(cfg.search.retrieval.similarity_threshold, 0.35);
	assert_eq!(cfg.search.retrieval.over_fetch, 100);
	assert_eq!(cfg.search.suggestions.sample_size, 200);
	assert_eq!(cfg.search.suggestions.max_suggestions, 5);
	assert_eq!(cfg.search.pagination.default_limit, 20);
}

#[test]
fn mode_is_normalized_before_validation() {
	let payload = sample_with(
		&["search", "retrieval"],
		"default_mode",
		Value::String(" Keyword ".to_string()),
	);
	let cfg = load_payload(payload).expect("Mixed-case mode must load.");

	assert_eq!(cfg.search.retrieval.default_mode, "keyword");
}

#[test]
fn rejects_unknown_mode() {
	expect_validation(
		sample_with(&["search", "retrieval"], "default_mode", Value::String("fuzzy".to_string())),
		"search.retrieval.default_mode must be one of hybrid, semantic, or keyword.",
	);
}

#[test]
fn rejects_out_of_range_min_relevance() {
	expect_validation(
		sample_with(&["search", "quality"], "min_relevance", Value::Float(1.5)),
		"search.quality.min_relevance must be in the range 0.0-1.0.",
	);
}

#[test]
fn rejects_empty_provider_key() {
	expect_validation(
		sample_with(&["providers", "rerank"], "api_key", Value::String("  ".to_string())),
		"Provider rerank api_key must be non-empty.",
	);
}

#[test]
fn rejects_default_limit_above_max() {
	expect_validation(
		sample_with(&["search", "pagination"], "default_limit", Value::Integer(500)),
		"search.pagination.default_limit must not exceed search.pagination.max_limit.",
	);
}

#[test]
fn rejects_zero_min_pool_size() {
	expect_validation(
		sample_with(&["search", "rerank"], "min_pool_size", Value::Integer(0)),
		"search.rerank.min_pool_size must be greater than zero.",
	);
}

#[test]
fn rejects_unbounded_max_offset() {
	expect_validation(
		sample_with(&["search", "pagination"], "max_offset", Value::Integer(i64::from(u32::MAX))),
		"search.pagination.max_offset is too large.",
	);
}

#[test]
fn rejects_zero_dimensions() {
	expect_validation(
		sample_with(&["providers", "embedding"], "dimensions", Value::Integer(0)),
		"providers.embedding.dimensions must be greater than zero.",
	);
}

#[test]
fn missing_file_reports_read_error() {
	let err = crew_config::load(&PathBuf::from("/nonexistent/crew.toml"))
		.expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}

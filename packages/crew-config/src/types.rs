use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub rerank: ProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Search {
	pub retrieval: SearchRetrieval,
	pub rerank: SearchRerank,
	pub quality: SearchQuality,
	pub suggestions: SearchSuggestions,
	pub pagination: SearchPagination,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchRetrieval {
	/// One of "hybrid", "semantic", or "keyword".
	pub default_mode: String,
	/// Vector similarity floor handed to the datastore. Kept low; precision comes from reranking.
	pub similarity_threshold: f32,
	/// Extra hits fetched beyond `limit + offset` so the reranker has a pool to reorder.
	pub over_fetch: u32,
}
impl Default for SearchRetrieval {
	fn default() -> Self {
		Self { default_mode: "hybrid".to_string(), similarity_threshold: 0.35, over_fetch: 100 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchRerank {
	pub max_documents: u32,
	/// Pools smaller than this are returned in retrieval order. Must be at least 1.
	pub min_pool_size: u32,
	pub cv_excerpt_chars: u32,
}
impl Default for SearchRerank {
	fn default() -> Self {
		Self { max_documents: 100, min_pool_size: 4, cv_excerpt_chars: 500 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchQuality {
	pub min_relevance: f32,
	pub related_role_min_relevance: f32,
}
impl Default for SearchQuality {
	fn default() -> Self {
		Self { min_relevance: 0.25, related_role_min_relevance: 0.3 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchSuggestions {
	pub sample_size: u32,
	pub max_suggestions: u32,
}
impl Default for SearchSuggestions {
	fn default() -> Self {
		Self { sample_size: 200, max_suggestions: 5 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchPagination {
	pub default_limit: u32,
	pub max_limit: u32,
	pub max_offset: u32,
}
impl Default for SearchPagination {
	fn default() -> Self {
		Self { default_limit: 20, max_limit: 100, max_offset: 1_000 }
	}
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
	pub api_auth_token: Option<String>,
}

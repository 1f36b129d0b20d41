mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, Postgres, ProviderConfig, Providers, Search,
	SearchPagination, SearchQuality, SearchRerank, SearchRetrieval, SearchSuggestions, Security,
	Service, Storage,
};

use std::{fs, path::Path};

pub const SEARCH_MODES: [&str; 3] = ["hybrid", "semantic", "keyword"];

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
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}

	for (label, key) in
		[("embedding", &cfg.providers.embedding.api_key), ("rerank", &cfg.providers.rerank.api_key)]
	{
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	let retrieval = &cfg.search.retrieval;

	if !SEARCH_MODES.contains(&retrieval.default_mode.as_str()) {
		return Err(Error::Validation {
			message: "search.retrieval.default_mode must be one of hybrid, semantic, or keyword."
				.to_string(),
		});
	}
	if retrieval.over_fetch == 0 {
		return Err(Error::Validation {
			message: "search.retrieval.over_fetch must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("search.retrieval.similarity_threshold", retrieval.similarity_threshold),
		("search.quality.min_relevance", cfg.search.quality.min_relevance),
		("search.quality.related_role_min_relevance", cfg.search.quality.related_role_min_relevance),
	] {
		if !value.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if !(0.0..=1.0).contains(&value) {
			return Err(Error::Validation {
				message: format!("{label} must be in the range 0.0-1.0."),
			});
		}
	}

	let rerank = &cfg.search.rerank;

	if rerank.max_documents == 0 || rerank.max_documents > 1_000 {
		return Err(Error::Validation {
			message: "search.rerank.max_documents must be in the range 1-1000.".to_string(),
		});
	}
	if rerank.min_pool_size == 0 {
		return Err(Error::Validation {
			message: "search.rerank.min_pool_size must be greater than zero.".to_string(),
		});
	}
	if rerank.cv_excerpt_chars == 0 {
		return Err(Error::Validation {
			message: "search.rerank.cv_excerpt_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.search.suggestions.sample_size == 0 {
		return Err(Error::Validation {
			message: "search.suggestions.sample_size must be greater than zero.".to_string(),
		});
	}
	if cfg.search.suggestions.max_suggestions == 0 {
		return Err(Error::Validation {
			message: "search.suggestions.max_suggestions must be greater than zero.".to_string(),
		});
	}

	let pagination = &cfg.search.pagination;

	if pagination.default_limit == 0 || pagination.max_limit == 0 {
		return Err(Error::Validation {
			message: "search.pagination limits must be greater than zero.".to_string(),
		});
	}
	if pagination.default_limit > pagination.max_limit {
		return Err(Error::Validation {
			message: "search.pagination.default_limit must not exceed search.pagination.max_limit."
				.to_string(),
		});
	}

	// limit + offset + over_fetch must fit the storage layer's i32 row count.
	let max_fetch = u64::from(pagination.max_limit)
		+ u64::from(pagination.max_offset)
		+ u64::from(retrieval.over_fetch);

	if max_fetch > i32::MAX as u64 {
		return Err(Error::Validation {
			message: "search.pagination.max_offset is too large.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.security.api_auth_token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false)
	{
		cfg.security.api_auth_token = None;
	}

	cfg.search.retrieval.default_mode = cfg.search.retrieval.default_mode.trim().to_lowercase();
}

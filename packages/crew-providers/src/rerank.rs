// std
use std::{cmp::Ordering, time::Duration as StdDuration};

// crates.io
use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// One reranked document: `index` points into the submitted document slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RerankScore {
	pub index: usize,
	pub relevance_score: f32,
}

/// Scores `docs` against `query`, returning at most `top_n` entries ordered best first.
pub async fn rerank(
	cfg: &crew_config::ProviderConfig,
	query: &str,
	docs: &[String],
	top_n: u32,
) -> Result<Vec<RerankScore>> {
	let client = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"query": query,
		"documents": docs,
		"top_n": top_n,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_rerank_response(json, docs.len())
}

fn parse_rerank_response(json: Value, doc_count: usize) -> Result<Vec<RerankScore>> {
	let results = json
		.get("results")
		.or_else(|| json.get("data"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Rerank response is missing results array.".to_string(),
		})?;
	let mut scores = Vec::with_capacity(results.len());

	for item in results {
		let index = item.get("index").and_then(|v| v.as_u64()).ok_or_else(|| {
			Error::InvalidResponse { message: "Rerank result missing index.".to_string() }
		})? as usize;
		let relevance_score = item
			.get("relevance_score")
			.or_else(|| item.get("score"))
			.and_then(|v| v.as_f64())
			.ok_or_else(|| Error::InvalidResponse {
				message: "Rerank result missing score.".to_string(),
			})? as f32;

		if index >= doc_count || scores.iter().any(|score: &RerankScore| score.index == index) {
			continue;
		}

		scores.push(RerankScore { index, relevance_score });
	}

	// Providers already return best first; sort anyway so a stable contract holds.
	scores.sort_by(|a, b| {
		b.relevance_score.partial_cmp(&a.relevance_score).unwrap_or(Ordering::Equal)
	});

	Ok(scores)
}

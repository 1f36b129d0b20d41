mod assemble;
mod document;
mod explain;
mod filter;
mod quality;
mod rerank;
mod retrieval;
mod suggest;

pub use document::build_candidate_document;
pub use explain::{Confidence, MatchExplanation, explain_match};
pub use filter::SearchFilters;
pub use quality::QualityGate;
pub use suggest::suggest_positions;

pub(crate) use quality::GateOutcome;

use std::{fmt::Display, time::Instant};

use time::Date;
use tracing::info;
use uuid::Uuid;

use crate::{CrewService, Error, Result};
use crew_storage::models::CandidateRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
	#[default]
	Hybrid,
	Semantic,
	Keyword,
}
impl SearchMode {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Hybrid => "hybrid",
			Self::Semantic => "semantic",
			Self::Keyword => "keyword",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"hybrid" => Some(Self::Hybrid),
			"semantic" => Some(Self::Semantic),
			"keyword" => Some(Self::Keyword),
			_ => None,
		}
	}
}

impl Display for SearchMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub query: String,
	#[serde(default)]
	pub filters: Option<SearchFilters>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
	pub use_rerank: Option<bool>,
	pub include_snippets: Option<bool>,
	pub mode: Option<SearchMode>,
}
impl SearchRequest {
	pub fn new(query: impl Into<String>) -> Self {
		Self { query: query.into(), ..Default::default() }
	}
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResultItem {
	pub id: Uuid,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub primary_position: Option<String>,
	pub position_category: Option<String>,
	pub years_experience: Option<i32>,
	pub current_location: Option<String>,
	pub nationality: Option<String>,
	pub availability_status: Option<String>,
	#[serde(default, with = "crate::time_serde::option")]
	pub available_from: Option<Date>,
	pub verification_tier: Option<String>,
	pub has_stcw: bool,
	pub has_eng1: bool,
	pub has_schengen: bool,
	pub has_b1b2: bool,
	pub match_score: f32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rerank_score: Option<f32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub snippet: Option<String>,
	#[serde(rename = "matchExplanation")]
	pub match_explanation: MatchExplanation,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchMetadata {
	pub total_searched: usize,
	pub embedding_match_count: usize,
	pub post_filter_count: usize,
	pub post_rerank_count: usize,
	pub post_threshold_count: usize,
	pub threshold: f32,
	pub requested_experience_years: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rerank_skipped_reason: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub results: Vec<SearchResultItem>,
	pub total_count: usize,
	pub processing_time_ms: u64,
	pub search_mode: SearchMode,
	pub rerank_used: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub suggestions: Option<Vec<String>>,
	#[serde(rename = "searchMetadata")]
	pub search_metadata: SearchMetadata,
	#[serde(rename = "noResultsReason", default, skip_serializing_if = "Option::is_none")]
	pub no_results_reason: Option<String>,
}

/// A retrieved candidate joined with its stored profile. Never leaves the service.
#[derive(Debug, Clone)]
pub(crate) struct PoolCandidate {
	pub(crate) record: CandidateRecord,
	pub(crate) match_score: f32,
	pub(crate) snippet: Option<String>,
}

#[derive(Debug, Clone)]
struct SearchPlan {
	query: String,
	filters: Option<SearchFilters>,
	limit: u32,
	offset: u32,
	mode: SearchMode,
	use_rerank: bool,
	include_snippets: bool,
}
impl SearchPlan {
	fn window(&self) -> u32 {
		self.limit.saturating_add(self.offset)
	}
}

impl CrewService {
	pub async fn search_candidates(&self, req: SearchRequest) -> Result<SearchResponse> {
		let started = Instant::now();
		let plan = self.plan_search(req)?;
		let signals = self.signals.extract(&plan.query);
		let fetch_count = plan.window().saturating_add(self.cfg.search.retrieval.over_fetch);
		let hits = self.retrieve(&plan.query, plan.mode, fetch_count).await?;
		let embedding_match_count = hits.len();
		let pool = self.load_pool(hits, plan.include_snippets).await?;
		let pool = filter::apply_filters(plan.filters.as_ref(), pool);
		let post_filter_count = pool.len();
		let top_n = plan.window().min(self.cfg.search.rerank.max_documents);
		let outcome = self.rerank_pool(&plan.query, pool, plan.use_rerank, top_n).await;
		let rerank_used = outcome.is_reranked();
		let post_rerank_count = outcome.scored_count();
		let rerank_skipped_reason = outcome.skip_reason().map(ToString::to_string);
		let mut metadata = SearchMetadata {
			total_searched: embedding_match_count,
			embedding_match_count,
			post_filter_count,
			post_rerank_count,
			post_threshold_count: 0,
			threshold: self.quality_gate.min_relevance,
			requested_experience_years: signals.requested_years,
			rerank_skipped_reason,
		};

		match self.quality_gate.apply(outcome) {
			GateOutcome::Emptied { dropped } => {
				let suggestions = self.suggest(&signals.tokens).await;

				info!(
					mode = %plan.mode,
					embedding_match_count,
					dropped,
					elapsed_ms = elapsed_ms(started),
					suggestions = suggestions.len(),
					"All candidates fell below the relevance threshold."
				);

				Ok(SearchResponse {
					results: Vec::new(),
					total_count: 0,
					processing_time_ms: elapsed_ms(started),
					search_mode: plan.mode,
					rerank_used,
					suggestions: Some(suggestions),
					search_metadata: metadata,
					no_results_reason: Some(format!(
						"No candidates met the minimum relevance of {:.2} for this query.",
						self.quality_gate.min_relevance
					)),
				})
			},
			GateOutcome::Qualified(qualified) => {
				metadata.post_threshold_count = qualified.len();

				let total_count = qualified.len();
				let results = assemble::assemble_page(
					qualified,
					plan.offset as usize,
					plan.limit as usize,
					&plan.query,
					&signals,
					self.cfg.search.quality.related_role_min_relevance,
				);

				info!(
					mode = %plan.mode,
					embedding_match_count,
					post_filter_count,
					post_rerank_count,
					total_count,
					returned = results.len(),
					rerank_used,
					elapsed_ms = elapsed_ms(started),
					"Candidate search completed."
				);

				Ok(SearchResponse {
					results,
					total_count,
					processing_time_ms: elapsed_ms(started),
					search_mode: plan.mode,
					rerank_used,
					suggestions: None,
					search_metadata: metadata,
					no_results_reason: None,
				})
			},
		}
	}

	fn plan_search(&self, req: SearchRequest) -> Result<SearchPlan> {
		let query = req.query.trim().to_string();

		if query.is_empty() {
			return Err(Error::invalid("$.query", "query must be non-empty."));
		}

		let pagination = &self.cfg.search.pagination;
		let limit = req.limit.unwrap_or(pagination.default_limit);

		if limit == 0 || limit > pagination.max_limit {
			return Err(Error::invalid(
				"$.limit",
				format!("limit must be between 1 and {}.", pagination.max_limit),
			));
		}

		let offset = req.offset.unwrap_or(0);

		if offset > pagination.max_offset {
			return Err(Error::invalid(
				"$.offset",
				format!("offset must be between 0 and {}.", pagination.max_offset),
			));
		}
		if let Some(filters) = req.filters.as_ref() {
			filters.validate()?;
		}

		let mode = match req.mode {
			Some(mode) => mode,
			None => SearchMode::parse(&self.cfg.search.retrieval.default_mode).unwrap_or_default(),
		};

		Ok(SearchPlan {
			query,
			filters: req.filters,
			limit,
			offset,
			mode,
			use_rerank: req.use_rerank.unwrap_or(true),
			include_snippets: req.include_snippets.unwrap_or(false),
		})
	}
}

fn elapsed_ms(started: Instant) -> u64 {
	u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

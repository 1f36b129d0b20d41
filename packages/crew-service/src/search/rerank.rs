use std::{
	collections::HashMap,
	fmt::{Display, Formatter},
};

use tracing::{debug, warn};

use crate::{
	CrewService,
	search::{PoolCandidate, document::build_candidate_document},
};
use crew_providers::rerank::RerankScore;

/// Rank given to candidates the reranker did not return; they sort after every ranked one.
pub(crate) const UNRANKED: usize = usize::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RerankSkip {
	NotRequested,
	PoolTooSmall { size: usize },
	ProviderFailed { message: String },
}
impl Display for RerankSkip {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::NotRequested => f.write_str("not_requested"),
			Self::PoolTooSmall { size } => write!(f, "pool_too_small: {size} candidates"),
			Self::ProviderFailed { message } => write!(f, "provider_failed: {message}"),
		}
	}
}

#[derive(Debug, Clone)]
pub(crate) struct RerankedHit {
	pub(crate) candidate: PoolCandidate,
	pub(crate) relevance_score: Option<f32>,
	pub(crate) rank: usize,
}

/// Result of the rerank stage. `Skipped` carries the pool in its retrieval order.
#[derive(Debug, Clone)]
pub(crate) enum RerankOutcome {
	Reranked(Vec<RerankedHit>),
	Skipped { reason: RerankSkip, pool: Vec<PoolCandidate> },
}
impl RerankOutcome {
	pub(crate) fn is_reranked(&self) -> bool {
		matches!(self, Self::Reranked(_))
	}

	pub(crate) fn skip_reason(&self) -> Option<&RerankSkip> {
		match self {
			Self::Reranked(_) => None,
			Self::Skipped { reason, .. } => Some(reason),
		}
	}

	/// Candidates still in contention after reranking: scored ones, or the whole skipped pool.
	pub(crate) fn scored_count(&self) -> usize {
		match self {
			Self::Reranked(hits) => hits.iter().filter(|hit| hit.relevance_score.is_some()).count(),
			Self::Skipped { pool, .. } => pool.len(),
		}
	}
}

impl CrewService {
	pub(crate) async fn rerank_pool(
		&self,
		query: &str,
		pool: Vec<PoolCandidate>,
		use_rerank: bool,
		top_n: u32,
	) -> RerankOutcome {
		if !use_rerank {
			return RerankOutcome::Skipped { reason: RerankSkip::NotRequested, pool };
		}

		let policy = &self.cfg.search.rerank;

		if pool.len() < policy.min_pool_size as usize {
			return RerankOutcome::Skipped {
				reason: RerankSkip::PoolTooSmall { size: pool.len() },
				pool,
			};
		}

		let submitted = pool.len().min(policy.max_documents as usize);
		let docs: Vec<String> = pool[..submitted]
			.iter()
			.map(|candidate| {
				build_candidate_document(&candidate.record, policy.cv_excerpt_chars as usize)
			})
			.collect();

		match self.providers.rerank.rerank(&self.cfg.providers.rerank, query, &docs, top_n).await {
			Ok(scores) => {
				debug!(submitted, returned = scores.len(), top_n, "Reranked candidate pool.");

				RerankOutcome::Reranked(apply_scores(pool, &scores))
			},
			Err(err) => {
				warn!(error = %err, submitted, "Rerank failed. Falling back to retrieval order.");

				RerankOutcome::Skipped {
					reason: RerankSkip::ProviderFailed { message: err.to_string() },
					pool,
				}
			},
		}
	}
}

/// Orders the pool by reranker rank. Unreturned candidates keep retrieval order at the tail.
pub(crate) fn apply_scores(pool: Vec<PoolCandidate>, scores: &[RerankScore]) -> Vec<RerankedHit> {
	let mut by_index: HashMap<usize, (usize, f32)> = HashMap::with_capacity(scores.len());

	for (rank, score) in scores.iter().enumerate() {
		if score.index < pool.len() {
			by_index.entry(score.index).or_insert((rank, score.relevance_score));
		}
	}

	let mut hits: Vec<RerankedHit> = pool
		.into_iter()
		.enumerate()
		.map(|(index, candidate)| match by_index.get(&index) {
			Some(&(rank, score)) =>
				RerankedHit { candidate, relevance_score: Some(score), rank },
			None => RerankedHit { candidate, relevance_score: None, rank: UNRANKED },
		})
		.collect();

	hits.sort_by_key(|hit| hit.rank);

	hits
}

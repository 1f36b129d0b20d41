use crate::search::{
	PoolCandidate,
	rerank::{RerankOutcome, RerankedHit},
};
use crew_config::SearchQuality;

/// Minimum reranker relevance a candidate needs to be returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityGate {
	pub min_relevance: f32,
}
impl QualityGate {
	pub fn new(min_relevance: f32) -> Self {
		Self { min_relevance }
	}

	pub fn from_config(cfg: &SearchQuality) -> Self {
		Self::new(cfg.min_relevance)
	}

	/// Gates a reranked pool. A skipped rerank passes through untouched.
	pub(crate) fn apply(&self, outcome: RerankOutcome) -> GateOutcome {
		match outcome {
			RerankOutcome::Skipped { pool, .. } => GateOutcome::Qualified(
				pool.into_iter()
					.map(|candidate| QualifiedCandidate { candidate, rerank_score: None })
					.collect(),
			),
			RerankOutcome::Reranked(hits) => {
				let before = hits.len();
				let qualified: Vec<QualifiedCandidate> =
					hits.into_iter().filter_map(|hit| self.admit(hit)).collect();

				if before > 0 && qualified.is_empty() {
					GateOutcome::Emptied { dropped: before }
				} else {
					GateOutcome::Qualified(qualified)
				}
			},
		}
	}

	fn admit(&self, hit: RerankedHit) -> Option<QualifiedCandidate> {
		let score = hit.relevance_score?;

		(score >= self.min_relevance)
			.then_some(QualifiedCandidate { candidate: hit.candidate, rerank_score: Some(score) })
	}
}

#[derive(Debug, Clone)]
pub(crate) struct QualifiedCandidate {
	pub(crate) candidate: PoolCandidate,
	pub(crate) rerank_score: Option<f32>,
}
impl QualifiedCandidate {
	/// Reranker relevance when available, retrieval score otherwise.
	pub(crate) fn relevance(&self) -> f32 {
		self.rerank_score.unwrap_or(self.candidate.match_score)
	}
}

#[derive(Debug, Clone)]
pub(crate) enum GateOutcome {
	Qualified(Vec<QualifiedCandidate>),
	/// Every candidate of a non-empty reranked pool fell below the threshold.
	Emptied { dropped: usize },
}

#[cfg(test)]
mod tests {
	use uuid::Uuid;

	use crate::search::{
		PoolCandidate,
		quality::{GateOutcome, QualityGate},
		rerank::{RerankOutcome, RerankSkip, RerankedHit, UNRANKED},
	};
	use crew_storage::models::CandidateRecord;

	fn candidate(match_score: f32) -> PoolCandidate {
		PoolCandidate {
			record: CandidateRecord { id: Uuid::new_v4(), ..Default::default() },
			match_score,
			snippet: None,
		}
	}

	fn hit(score: Option<f32>, rank: usize) -> RerankedHit {
		RerankedHit { candidate: candidate(0.5), relevance_score: score, rank }
	}

	#[test]
	fn skipped_rerank_is_not_gated() {
		let gate = QualityGate::new(0.25);
		let outcome = RerankOutcome::Skipped {
			reason: RerankSkip::NotRequested,
			pool: vec![candidate(0.05), candidate(0.01)],
		};

		match gate.apply(outcome) {
			GateOutcome::Qualified(qualified) => {
				assert_eq!(qualified.len(), 2);
				assert_eq!(qualified[0].relevance(), 0.05);
			},
			GateOutcome::Emptied { .. } => panic!("Skipped rerank must not be gated."),
		}
	}

	#[test]
	fn keeps_scores_at_or_above_threshold() {
		let gate = QualityGate::new(0.25);
		let outcome = RerankOutcome::Reranked(vec![
			hit(Some(0.8), 0),
			hit(Some(0.25), 1),
			hit(Some(0.2), 2),
			hit(None, UNRANKED),
		]);

		match gate.apply(outcome) {
			GateOutcome::Qualified(qualified) => {
				let scores: Vec<Option<f32>> = qualified.iter().map(|q| q.rerank_score).collect();

				assert_eq!(scores, vec![Some(0.8), Some(0.25)]);
			},
			GateOutcome::Emptied { .. } => panic!("Expected qualified candidates."),
		}
	}

	#[test]
	fn reports_emptied_pool() {
		let gate = QualityGate::new(0.25);
		let outcome = RerankOutcome::Reranked(vec![hit(Some(0.1), 0), hit(None, UNRANKED)]);

		assert!(matches!(gate.apply(outcome), GateOutcome::Emptied { dropped: 2 }));
	}

	#[test]
	fn empty_reranked_pool_is_not_emptied() {
		let gate = QualityGate::new(0.25);

		match gate.apply(RerankOutcome::Reranked(Vec::new())) {
			GateOutcome::Qualified(qualified) => assert!(qualified.is_empty()),
			GateOutcome::Emptied { .. } => panic!("An empty pool cannot be emptied."),
		}
	}
}

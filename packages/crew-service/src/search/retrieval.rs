use std::collections::{HashMap, HashSet};

use tracing::debug;
use uuid::Uuid;

use crate::{
	CrewService, Error, Result,
	search::{PoolCandidate, SearchMode, document::truncate_chars},
};
use crew_storage::models::{CandidateHit, CandidateRecord};

const FALLBACK_SNIPPET_CHARS: usize = 200;

impl CrewService {
	/// Runs the retrieval procedure for `mode`. Any failure here aborts the search.
	pub(crate) async fn retrieve(
		&self,
		query: &str,
		mode: SearchMode,
		fetch_count: u32,
	) -> Result<Vec<CandidateHit>> {
		let threshold = self.cfg.search.retrieval.similarity_threshold;
		let hits = match mode {
			SearchMode::Keyword => self.store.fulltext_search(query, fetch_count).await,
			SearchMode::Semantic => {
				let embedding = self.embed_query(query).await?;

				self.store.vector_search(&embedding, threshold, fetch_count).await
			},
			SearchMode::Hybrid => {
				let embedding = self.embed_query(query).await?;

				self.store.hybrid_search(query, &embedding, threshold, fetch_count).await
			},
		}
		.map_err(|err| Error::search_failed("Candidate retrieval failed", err))?;
		let raw_count = hits.len();
		let hits = dedup_hits(hits);

		debug!(mode = %mode, fetch_count, raw_count, deduped = hits.len(), "Retrieved candidate hits.");

		Ok(hits)
	}

	/// Joins hits with their stored profiles, preserving retrieval order.
	pub(crate) async fn load_pool(
		&self,
		hits: Vec<CandidateHit>,
		include_snippets: bool,
	) -> Result<Vec<PoolCandidate>> {
		if hits.is_empty() {
			return Ok(Vec::new());
		}

		let ids: Vec<Uuid> = hits.iter().map(|hit| hit.candidate_id).collect();
		let records = self
			.store
			.fetch_candidates(&ids)
			.await
			.map_err(|err| Error::search_failed("Candidate fetch failed", err))?;
		let mut by_id: HashMap<Uuid, CandidateRecord> = records
			.into_iter()
			.filter(|record| record.deleted_at.is_none())
			.map(|record| (record.id, record))
			.collect();
		let mut pool = Vec::with_capacity(hits.len());

		for hit in hits {
			let Some(record) = by_id.remove(&hit.candidate_id) else {
				continue;
			};
			let snippet = if include_snippets {
				hit.snippet
					.filter(|snippet| !snippet.trim().is_empty())
					.or_else(|| fallback_snippet(&record))
			} else {
				None
			};

			pool.push(PoolCandidate { record, match_score: hit.score, snippet });
		}

		debug!(fetched = pool.len(), requested = ids.len(), "Loaded candidate records.");

		Ok(pool)
	}

	async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
		let cfg = &self.cfg.providers.embedding;
		let texts = [query.to_string()];
		let embeddings = self
			.providers
			.embedding
			.embed(cfg, &texts)
			.await
			.map_err(|err| Error::search_failed("Query embedding failed", err))?;
		let Some(embedding) = embeddings.into_iter().next() else {
			return Err(Error::SearchFailed {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		if embedding.len() != cfg.dimensions as usize {
			return Err(Error::SearchFailed {
				message: format!(
					"Embedding dimension mismatch: expected {}, got {}.",
					cfg.dimensions,
					embedding.len()
				),
			});
		}

		Ok(embedding)
	}
}

fn dedup_hits(hits: Vec<CandidateHit>) -> Vec<CandidateHit> {
	let mut seen = HashSet::with_capacity(hits.len());

	hits.into_iter().filter(|hit| seen.insert(hit.candidate_id)).collect()
}

fn fallback_snippet(record: &CandidateRecord) -> Option<String> {
	[record.profile_summary.as_deref(), record.cv_text.as_deref()]
		.into_iter()
		.flatten()
		.map(str::trim)
		.find(|text| !text.is_empty())
		.map(|text| truncate_chars(text, FALLBACK_SNIPPET_CHARS).to_string())
}

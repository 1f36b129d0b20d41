use uuid::Uuid;

use crate::{BoxFuture, CandidateStore, Result};
use crew_storage::{
	db::Db,
	models::{CandidateHit, CandidateRecord},
	queries,
};

impl CandidateStore for Db {
	fn vector_search<'a>(
		&'a self,
		embedding: &'a [f32],
		threshold: f32,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<CandidateHit>>> {
		Box::pin(async move { Ok(queries::vector_search(self, embedding, threshold, limit).await?) })
	}

	fn fulltext_search<'a>(
		&'a self,
		query: &'a str,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<CandidateHit>>> {
		Box::pin(async move { Ok(queries::fulltext_search(self, query, limit).await?) })
	}

	fn hybrid_search<'a>(
		&'a self,
		query: &'a str,
		embedding: &'a [f32],
		threshold: f32,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<CandidateHit>>> {
		Box::pin(async move {
			Ok(queries::hybrid_search(self, query, embedding, threshold, limit).await?)
		})
	}

	fn fetch_candidates<'a>(
		&'a self,
		ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<CandidateRecord>>> {
		Box::pin(async move { Ok(queries::fetch_candidates(self, ids).await?) })
	}

	fn sample_positions<'a>(&'a self, limit: u32) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(async move { Ok(queries::sample_positions(self, limit).await?) })
	}
}

pub mod search;
pub mod time_serde;

mod error;
mod store;

pub use error::{Error, Result};
pub use search::{
	Confidence, MatchExplanation, QualityGate, SearchFilters, SearchMetadata, SearchMode,
	SearchRequest, SearchResponse, SearchResultItem,
};

use std::{future::Future, pin::Pin, sync::Arc};

use uuid::Uuid;

use crew_config::{Config, EmbeddingProviderConfig, ProviderConfig};
use crew_domain::{PatternSignalExtractor, QuerySignalExtractor};
use crew_providers::{embedding, rerank, rerank::RerankScore};
use crew_storage::{
	db::Db,
	models::{CandidateHit, CandidateRecord},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

pub trait RerankProvider
where
	Self: Send + Sync,
{
	/// Returns at most `top_n` scores ordered best first; `index` points into `docs`.
	fn rerank<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		docs: &'a [String],
		top_n: u32,
	) -> BoxFuture<'a, Result<Vec<RerankScore>>>;
}

/// Read-only view of the candidate datastore used by the search pipeline.
pub trait CandidateStore
where
	Self: Send + Sync,
{
	fn vector_search<'a>(
		&'a self,
		embedding: &'a [f32],
		threshold: f32,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<CandidateHit>>>;

	fn fulltext_search<'a>(
		&'a self,
		query: &'a str,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<CandidateHit>>>;

	fn hybrid_search<'a>(
		&'a self,
		query: &'a str,
		embedding: &'a [f32],
		threshold: f32,
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<CandidateHit>>>;

	/// Live candidates among `ids`; deleted or unknown ids are simply absent.
	fn fetch_candidates<'a>(&'a self, ids: &'a [Uuid])
	-> BoxFuture<'a, Result<Vec<CandidateRecord>>>;

	fn sample_positions<'a>(&'a self, limit: u32) -> BoxFuture<'a, Result<Vec<String>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub rerank: Arc<dyn RerankProvider>,
}

pub struct CrewService {
	pub cfg: Config,
	pub store: Arc<dyn CandidateStore>,
	pub providers: Providers,
	pub signals: Arc<dyn QuerySignalExtractor>,
	pub quality_gate: QualityGate,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Ok(embedding::embed(cfg, texts).await?) })
	}
}

impl RerankProvider for DefaultProviders {
	fn rerank<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		docs: &'a [String],
		top_n: u32,
	) -> BoxFuture<'a, Result<Vec<RerankScore>>> {
		Box::pin(async move { Ok(rerank::rerank(cfg, query, docs, top_n).await?) })
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>, rerank: Arc<dyn RerankProvider>) -> Self {
		Self { embedding, rerank }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), rerank: provider }
	}
}

impl CrewService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self::with_providers(cfg, Arc::new(db), Providers::default())
	}

	pub fn with_providers(
		cfg: Config,
		store: Arc<dyn CandidateStore>,
		providers: Providers,
	) -> Self {
		let quality_gate = QualityGate::from_config(&cfg.search.quality);

		Self { cfg, store, providers, signals: Arc::new(PatternSignalExtractor), quality_gate }
	}

	pub fn with_signal_extractor(mut self, signals: Arc<dyn QuerySignalExtractor>) -> Self {
		self.signals = signals;

		self
	}
}

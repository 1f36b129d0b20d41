use std::sync::Arc;

use crew_service::CrewService;
use crew_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CrewService>,
}
impl AppState {
	pub async fn new(config: crew_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema(config.providers.embedding.dimensions).await?;

		Ok(Self::from_service(CrewService::new(config, db)))
	}

	pub fn from_service(service: CrewService) -> Self {
		Self { service: Arc::new(service) }
	}
}

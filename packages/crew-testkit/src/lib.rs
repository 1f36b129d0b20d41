//! Scratch Postgres databases for storage tests.

mod error;

pub use error::{Error, Result};

use std::{env, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use uuid::Uuid;

use crew_config::Postgres;

pub const DSN_ENV: &str = "CREW_PG_DSN";

/// A uniquely named database on the server behind [`DSN_ENV`]. Dropped on [`Self::destroy`], or
/// from a helper thread when the value goes out of scope.
pub struct ScratchDatabase {
	name: String,
	server: PgConnectOptions,
	destroyed: bool,
}
impl ScratchDatabase {
	/// Returns `Ok(None)` when [`DSN_ENV`] is unset so callers can skip.
	pub async fn from_env() -> Result<Option<Self>> {
		match env::var(DSN_ENV) {
			Ok(dsn) => Self::create(&dsn).await.map(Some),
			Err(_) => Ok(None),
		}
	}

	pub async fn create(server_dsn: &str) -> Result<Self> {
		let server = PgConnectOptions::from_str(server_dsn).map_err(Error::InvalidDsn)?;
		let name = format!("crew_scratch_{}", Uuid::new_v4().simple());

		execute_on(&server, &name, "create", &format!(r#"CREATE DATABASE "{name}""#)).await?;

		Ok(Self { name, server, destroyed: false })
	}

	/// Storage settings pointing at this database.
	pub fn postgres(&self, pool_max_conns: u32) -> Postgres {
		let dsn = self.server.clone().database(&self.name).to_url_lossy().to_string();

		Postgres { dsn, pool_max_conns }
	}

	pub async fn destroy(mut self) -> Result<()> {
		self.destroyed = true;

		drop_database(&self.server, &self.name).await
	}
}
impl Drop for ScratchDatabase {
	fn drop(&mut self) {
		if self.destroyed {
			return;
		}

		let server = self.server.clone();
		let name = std::mem::take(&mut self.name);
		// Drop cannot await.
		let handle = thread::spawn(move || {
			let outcome = Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| err.to_string())
				.and_then(|runtime| {
					runtime.block_on(drop_database(&server, &name)).map_err(|err| err.to_string())
				});

			if let Err(message) = outcome {
				eprintln!("Scratch database cleanup failed: {message}.");
			}
		});
		let _ = handle.join();
	}
}

async fn drop_database(server: &PgConnectOptions, name: &str) -> Result<()> {
	execute_on(server, name, "drop", &format!(r#"DROP DATABASE IF EXISTS "{name}" WITH (FORCE)"#))
		.await
}

async fn execute_on(
	server: &PgConnectOptions,
	name: &str,
	action: &'static str,
	sql: &str,
) -> Result<()> {
	let wrap = |source| Error::Postgres { action, name: name.to_string(), source };
	let mut conn = PgConnection::connect_with(server).await.map_err(wrap)?;

	conn.execute(sql).await.map_err(wrap)?;
	conn.close().await.map_err(wrap)?;

	Ok(())
}

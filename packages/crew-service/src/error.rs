pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String, fields: Vec<String> },
	#[error("Search failed: {message}")]
	SearchFailed { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
		Self::InvalidRequest { message: message.into(), fields: vec![field.to_string()] }
	}

	pub(crate) fn search_failed(stage: &str, err: Self) -> Self {
		match err {
			Self::SearchFailed { .. } => err,
			other => Self::SearchFailed { message: format!("{stage}: {other}") },
		}
	}
}

impl From<crew_storage::Error> for Error {
	fn from(err: crew_storage::Error) -> Self {
		match err {
			crew_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			crew_storage::Error::InvalidArgument(message) =>
				Self::InvalidRequest { message, fields: Vec::new() },
		}
	}
}

impl From<crew_providers::Error> for Error {
	fn from(err: crew_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

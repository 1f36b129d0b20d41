use axum::{
	Json, Router,
	body::Body,
	extract::{Request, State, rejection::JsonRejection},
	http::{HeaderMap, StatusCode, header::AUTHORIZATION},
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;
use crew_service::{Error, SearchRequest, SearchResponse};

pub fn router(state: AppState) -> Router {
	let api = Router::new()
		.route("/v1/search/cv", post(search_cv))
		.route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

	Router::new().route("/health", get(health)).merge(api).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search_cv(
	State(state): State<AppState>,
	payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	let Json(payload) = payload.map_err(|rejection| {
		json_error(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_REQUEST", rejection.body_text(), None)
	})?;
	let response = state.service.search_candidates(payload).await?;

	Ok(Json(response))
}

async fn require_bearer(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
	let Some(expected) = state.service.cfg.security.api_auth_token.as_deref() else {
		return next.run(req).await;
	};

	if read_bearer_token(req.headers()).is_some_and(|token| token == expected) {
		return next.run(req).await;
	}

	json_error(
		StatusCode::UNAUTHORIZED,
		"UNAUTHENTICATED",
		"A valid Bearer token is required.",
		None,
	)
	.into_response()
}

fn read_bearer_token(headers: &HeaderMap) -> Option<&str> {
	let raw = headers.get(AUTHORIZATION)?;
	let value = raw.to_str().ok()?.trim();
	let token = value.strip_prefix("Bearer ")?.trim();

	if token.is_empty() { None } else { Some(token) }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message, fields } => json_error(
				StatusCode::UNPROCESSABLE_ENTITY,
				"INVALID_REQUEST",
				message,
				(!fields.is_empty()).then_some(fields),
			),
			Error::SearchFailed { .. } | Error::Provider { .. } | Error::Storage { .. } => {
				tracing::error!(error = %err, "Candidate search failed.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"SEARCH_FAILED",
					"Candidate search failed.",
					None,
				)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}

use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
	Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{session, store};

/// Error type for the application.
///
/// The Display trait is not sent to the client for the 5xx variants, so it
/// can show sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("query error: {0}")]
	Query(#[from] rejection::QueryRejection),
	#[error("auth error: {0}")]
	Auth(#[from] session::Error),
	#[error("forbidden")]
	Forbidden,
	#[error("unknown post {0}")]
	UnknownPost(Uuid),
	#[error("unknown user {0}")]
	UnknownUser(String),
	#[error("store error: {0}")]
	Store(#[from] store::Error),
	#[error("upstream error: {0}")]
	Upstream(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub success: bool,
	pub errors: Vec<String>,
}

impl ErrorResponse {
	fn single(message: String) -> Self {
		Self {
			success: false,
			errors: vec![message],
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response<Body> {
		match self {
			Error::Validation(errors) => (
				StatusCode::BAD_REQUEST,
				Json(ErrorResponse {
					errors: errors
						.field_errors()
						.into_iter()
						.flat_map(move |(field, errors)| {
							errors
								.iter()
								.map(move |error| format!("{field}: {error}"))
								.collect::<Vec<_>>()
						})
						.collect(),
					success: false,
				}),
			)
				.into_response(),
			Error::Json(error) => (
				StatusCode::BAD_REQUEST,
				Json(ErrorResponse::single(error.to_string())),
			)
				.into_response(),
			Error::Query(error) => (
				StatusCode::BAD_REQUEST,
				Json(ErrorResponse::single(error.to_string())),
			)
				.into_response(),
			Error::Auth(error) => (
				StatusCode::UNAUTHORIZED,
				Json(ErrorResponse::single(error.to_string())),
			)
				.into_response(),
			Error::Forbidden => (
				StatusCode::FORBIDDEN,
				Json(ErrorResponse::single("forbidden".to_string())),
			)
				.into_response(),
			ref error @ (Error::UnknownPost(..) | Error::UnknownUser(..)) => (
				StatusCode::NOT_FOUND,
				Json(ErrorResponse::single(error.to_string())),
			)
				.into_response(),
			Error::Upstream(error) => {
				tracing::error!("upstream request failed: {error}");

				(
					StatusCode::INTERNAL_SERVER_ERROR,
					Json(ErrorResponse::single("upstream unavailable".to_string())),
				)
					.into_response()
			}
			Error::Store(error) => {
				tracing::error!("store error: {error}");

				(
					StatusCode::INTERNAL_SERVER_ERROR,
					Json(ErrorResponse {
						errors: Vec::new(),
						success: false,
					}),
				)
					.into_response()
			}
		}
	}
}

use std::sync::Arc;

use axum::{
	extract::State,
	http::header,
	response::{IntoResponse, Response},
};

use crate::{Config, Error};

/// Relays the caller's Monkeytype personal bests.
///
/// The upstream status code and body are passed through verbatim; the only
/// thing added server-side is the API key. No retry, no transformation.
pub async fn personal_bests(
	State(http): State<reqwest::Client>,
	State(config): State<Arc<Config>>,
) -> Result<Response, Error> {
	let mut request = http.get(format!(
		"{}/users/personalBests?mode=time",
		config.monkeytype_url
	));

	if let Some(key) = &config.monkeytype_api_key {
		request = request.header(header::AUTHORIZATION, format!("ApeKey {key}"));
	}

	let response = request.send().await?;

	let status = response.status();
	let body = response.bytes().await?;

	Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod route;
pub mod session;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::Error;

/// The store handle shared across handlers.
///
/// Handlers only see the [`store::Store`] trait, so the Postgres store can be
/// swapped for the in-memory one in tests.
pub type SharedStore = Arc<dyn store::Store>;

pub type AppState = State;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access,
/// such as the store handle, an outbound HTTP client, or the process
/// configuration.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub store: SharedStore,
	pub http: reqwest::Client,
	pub config: Arc<Config>,
}

/// Assembles the application router.
///
/// The unauthenticated "list everything" route is only mounted when the
/// config explicitly asks for it; it has no place in a default deployment.
pub fn router(state: State) -> Router {
	let mut app = Router::new()
		.nest("/posts", route::posts::routes())
		.route("/users/:username/posts", get(route::posts::get_user_posts))
		.route("/stats", get(route::stats::personal_bests));

	if state.config.expose_debug_routes {
		tracing::warn!("debug routes are enabled, /debug/posts is unauthenticated");
		app = app.route("/debug/posts", get(route::posts::all_posts));
	}

	app.layer(TraceLayer::new_for_http()).with_state(state)
}

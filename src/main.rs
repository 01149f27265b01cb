use std::sync::Arc;

use scribe::{store::PgStore, Config, State};

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt::init();
	dotenvy::dotenv().ok();

	let config = Config::from_env();

	let store = PgStore::connect(
		&std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
	)
	.await
	.expect("failed to connect to database");

	let state = State {
		store: Arc::new(store),
		http: reqwest::Client::new(),
		config: Arc::new(config),
	};

	let port = std::env::var("PORT").map_or_else(
		|_| 3000,
		|port| port.parse().expect("PORT must be a number"),
	);

	let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on port {}", port);

	axum::serve(listener, scribe::router(state)).await.unwrap();
}

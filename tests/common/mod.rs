use std::sync::Arc;

use axum_test::TestServer;
use cookie::Cookie;
use scribe::{
	model::User,
	store::MemoryStore,
	Config, SharedStore, State,
};

pub fn server_with_config(config: Config) -> (TestServer, Arc<MemoryStore>) {
	let store = Arc::new(MemoryStore::new());
	let shared: SharedStore = store.clone();

	let state = State {
		store: shared,
		http: reqwest::Client::new(),
		config: Arc::new(config),
	};

	(
		TestServer::new(scribe::router(state)).unwrap(),
		store,
	)
}

pub fn server() -> (TestServer, Arc<MemoryStore>) {
	server_with_config(Config::default())
}

/// Seeds a user with a live session, as the external auth flow would.
pub fn login(store: &MemoryStore, username: &str) -> (User, Cookie<'static>) {
	let user = store.add_user(username);
	let session_id = store.add_session(user.id);

	(user, Cookie::new("session", session_id.to_string()))
}

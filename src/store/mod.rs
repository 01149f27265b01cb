mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{Post, User};

/// An error produced by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

/// The persistence backend for users, sessions and posts.
///
/// Handlers receive this as a trait object so tests can substitute the
/// in-memory implementation.
///
/// Mutations that require ownership take the owner's id as part of the
/// operation and filter on `id AND user_id` in one call. There must be no
/// separate check-then-act step, otherwise a concurrent delete could slip
/// between the check and the write.
#[async_trait]
pub trait Store: Send + Sync + 'static {
	/// Resolves a session id to the user that owns the session.
	async fn user_by_session(&self, session_id: Uuid) -> Result<Option<User>, Error>;

	/// Fetches a user by their unique username.
	async fn user_by_username(&self, username: &str) -> Result<Option<User>, Error>;

	/// Creates a post owned by `user_id`, returning the stored row.
	async fn create_post(&self, user_id: Uuid, title: &str, body: &str) -> Result<Post, Error>;

	/// Fetches a post by its unique id.
	async fn post(&self, post_id: Uuid) -> Result<Option<Post>, Error>;

	/// Returns a page of a user's posts, newest first.
	async fn posts_by_owner(
		&self,
		user_id: Uuid,
		limit: i64,
		offset: i64,
	) -> Result<Vec<Post>, Error>;

	/// Returns every post, newest first. Only reachable from the debug route.
	async fn all_posts(&self) -> Result<Vec<Post>, Error>;

	/// Updates a post's title and/or body, keeping the stored value for
	/// fields passed as `None`. Filtered by owner; returns `None` when no
	/// row matches both the post id and the owner.
	async fn update_post(
		&self,
		post_id: Uuid,
		user_id: Uuid,
		title: Option<&str>,
		body: Option<&str>,
	) -> Result<Option<Post>, Error>;

	/// Deletes a post, filtered by owner. Returns whether a row was deleted.
	async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, Error>;
}

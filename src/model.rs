use serde::Serialize;
use uuid::Uuid;

/// A model representing a single user.
///
/// Users are created by the authentication service, never by this API; here
/// they only anchor post ownership.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
	pub id: Uuid,
	pub username: String,
	pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A model representing a single post, created by a user.
///
/// The owning user is never serialized to the client.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Post {
	pub id: Uuid,
	#[serde(skip_serializing)]
	pub user_id: Uuid,
	pub title: String,
	pub body: String,
	pub created_at: chrono::DateTime<chrono::Utc>,
}

use async_trait::async_trait;
use uuid::Uuid;

use super::{Error, Store};
use crate::model::{Post, User};

/// The Postgres-backed store.
///
/// Connection pooling and transactional isolation come from the pool; every
/// operation here is a single statement.
pub struct PgStore {
	pool: sqlx::Pool<sqlx::Postgres>,
}

impl PgStore {
	pub async fn connect(url: &str) -> Result<Self, Error> {
		Ok(Self {
			pool: sqlx::Pool::connect(url).await?,
		})
	}
}

#[async_trait]
impl Store for PgStore {
	async fn user_by_session(&self, session_id: Uuid) -> Result<Option<User>, Error> {
		let user = sqlx::query_as::<_, User>(
			r#"
				SELECT id, username, created_at FROM "user" WHERE id = (
					SELECT user_id FROM session WHERE id = $1
				)
			"#,
		)
		.bind(session_id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(user)
	}

	async fn user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
		let user = sqlx::query_as::<_, User>(
			r#"SELECT id, username, created_at FROM "user" WHERE username = $1"#,
		)
		.bind(username)
		.fetch_optional(&self.pool)
		.await?;

		Ok(user)
	}

	async fn create_post(&self, user_id: Uuid, title: &str, body: &str) -> Result<Post, Error> {
		let post = sqlx::query_as::<_, Post>(
			r"
				INSERT INTO post (user_id, title, body)
				VALUES ($1, $2, $3)
				RETURNING id, user_id, title, body, created_at
			",
		)
		.bind(user_id)
		.bind(title)
		.bind(body)
		.fetch_one(&self.pool)
		.await?;

		Ok(post)
	}

	async fn post(&self, post_id: Uuid) -> Result<Option<Post>, Error> {
		let post = sqlx::query_as::<_, Post>(
			r"SELECT id, user_id, title, body, created_at FROM post WHERE id = $1",
		)
		.bind(post_id)
		.fetch_optional(&self.pool)
		.await?;

		Ok(post)
	}

	async fn posts_by_owner(
		&self,
		user_id: Uuid,
		limit: i64,
		offset: i64,
	) -> Result<Vec<Post>, Error> {
		let posts = sqlx::query_as::<_, Post>(
			r"
				SELECT id, user_id, title, body, created_at FROM post
				WHERE user_id = $1
				ORDER BY created_at DESC
				LIMIT $2 OFFSET $3
			",
		)
		.bind(user_id)
		.bind(limit)
		.bind(offset)
		.fetch_all(&self.pool)
		.await?;

		Ok(posts)
	}

	async fn all_posts(&self) -> Result<Vec<Post>, Error> {
		let posts = sqlx::query_as::<_, Post>(
			r"
				SELECT id, user_id, title, body, created_at FROM post
				ORDER BY created_at DESC
			",
		)
		.fetch_all(&self.pool)
		.await?;

		Ok(posts)
	}

	async fn update_post(
		&self,
		post_id: Uuid,
		user_id: Uuid,
		title: Option<&str>,
		body: Option<&str>,
	) -> Result<Option<Post>, Error> {
		// Ownership is part of the WHERE clause, so a non-owner caller and a
		// missing post are indistinguishable here.
		let post = sqlx::query_as::<_, Post>(
			r"
				UPDATE post
				SET title = COALESCE($3, title), body = COALESCE($4, body)
				WHERE id = $1 AND user_id = $2
				RETURNING id, user_id, title, body, created_at
			",
		)
		.bind(post_id)
		.bind(user_id)
		.bind(title)
		.bind(body)
		.fetch_optional(&self.pool)
		.await?;

		Ok(post)
	}

	async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, Error> {
		let result = sqlx::query(r"DELETE FROM post WHERE id = $1 AND user_id = $2")
			.bind(post_id)
			.bind(user_id)
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}
}

use axum::{
	extract::{Path, State},
	routing::{get, post},
	Router,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
	extract::{Json, Query, Session},
	model,
	store::Store,
	AppState, Error, SharedStore,
};

use super::model::Paginate;

pub fn routes() -> Router<AppState> {
	Router::new()
		.route("/", post(create_post))
		.route("/me/:id", get(get_own_post))
		.route(
			"/:id",
			get(get_post).put(update_post).delete(delete_post),
		)
}

#[derive(Deserialize, Validate)]
pub struct CreatePostInput {
	#[validate(length(min = 1, max = 128))]
	pub title: String,
	#[validate(length(min = 1, max = 4096))]
	pub body: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdatePostInput {
	#[validate(length(min = 1, max = 128))]
	pub title: Option<String>,
	#[validate(length(min = 1, max = 4096))]
	pub body: Option<String>,
}

/// Fetches a post and proves the caller owns it.
///
/// A post that exists but belongs to someone else answers the same as a
/// missing one, so callers cannot probe which ids exist. Evaluated on every
/// request; ownership is never cached.
async fn owned_post(store: &dyn Store, post_id: Uuid, owner_id: Uuid) -> Result<model::Post, Error> {
	let post = store.post(post_id).await?.ok_or(Error::UnknownPost(post_id))?;

	if post.user_id != owner_id {
		return Err(Error::UnknownPost(post_id));
	}

	Ok(post)
}

/// Creates a new post owned by the authenticated user.
async fn create_post(
	State(store): State<SharedStore>,
	session: Session,
	Json(input): Json<CreatePostInput>,
) -> Result<Json<model::Post>, Error> {
	let post = store
		.create_post(session.user.id, &input.title, &input.body)
		.await?;

	tracing::info!(post = %post.id, user = %session.user.id, "created post");

	Ok(Json(post))
}

/// Returns a single post by its unique id. Unauthenticated.
async fn get_post(
	State(store): State<SharedStore>,
	Path(post_id): Path<Uuid>,
) -> Result<Json<model::Post>, Error> {
	let post = store.post(post_id).await?;

	Ok(Json(post.ok_or(Error::UnknownPost(post_id))?))
}

/// Returns one of the authenticated user's own posts.
async fn get_own_post(
	State(store): State<SharedStore>,
	session: Session,
	Path(post_id): Path<Uuid>,
) -> Result<Json<model::Post>, Error> {
	let post = owned_post(store.as_ref(), post_id, session.user.id).await?;

	Ok(Json(post))
}

/// Returns a paginated response of a user's posts, newest first.
///
/// The username in the path must resolve to the authenticated user; anyone
/// else gets a 403 rather than another user's posts.
pub async fn get_user_posts(
	State(store): State<SharedStore>,
	session: Session,
	Path(username): Path<String>,
	Query(paginate): Query<Paginate>,
) -> Result<Json<Vec<model::Post>>, Error> {
	let user = store
		.user_by_username(&username)
		.await?
		.ok_or(Error::UnknownUser(username))?;

	if user.id != session.user.id {
		return Err(Error::Forbidden);
	}

	let posts = store
		.posts_by_owner(user.id, paginate.limit(), paginate.offset())
		.await?;

	Ok(Json(posts))
}

/// Updates an existing post by its unique id.
///
/// Ownership is enforced inside the store as a single filtered update, so
/// there is no window between the check and the write.
async fn update_post(
	State(store): State<SharedStore>,
	session: Session,
	Path(post_id): Path<Uuid>,
	Json(input): Json<UpdatePostInput>,
) -> Result<Json<model::Post>, Error> {
	let post = store
		.update_post(
			post_id,
			session.user.id,
			input.title.as_deref(),
			input.body.as_deref(),
		)
		.await?;

	Ok(Json(post.ok_or(Error::UnknownPost(post_id))?))
}

/// Deletes an existing post by its unique id, filtered by owner.
async fn delete_post(
	State(store): State<SharedStore>,
	session: Session,
	Path(post_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, Error> {
	if !store.delete_post(post_id, session.user.id).await? {
		return Err(Error::UnknownPost(post_id));
	}

	tracing::info!(post = %post_id, user = %session.user.id, "deleted post");

	Ok(Json(json!({ "message": "deleted" })))
}

/// Returns every post in the store.
///
/// Unauthenticated. Only mounted when `EXPOSE_DEBUG_ROUTES` is set.
pub async fn all_posts(
	State(store): State<SharedStore>,
) -> Result<Json<Vec<model::Post>>, Error> {
	Ok(Json(store.all_posts().await?))
}

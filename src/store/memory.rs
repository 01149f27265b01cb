use std::{
	collections::HashMap,
	sync::RwLock,
};

use async_trait::async_trait;
use uuid::Uuid;

use super::{Error, Store};
use crate::model::{Post, User};

/// An in-memory store, used as a stand-in for Postgres in tests.
///
/// Implements the same ownership-filtered mutations as [`super::PgStore`];
/// the handler tests rely on that equivalence.
#[derive(Default)]
pub struct MemoryStore {
	users: RwLock<HashMap<Uuid, User>>,
	sessions: RwLock<HashMap<Uuid, Uuid>>,
	posts: RwLock<HashMap<Uuid, Post>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a user, as the external registration flow would.
	pub fn add_user(&self, username: &str) -> User {
		let user = User {
			id: Uuid::new_v4(),
			username: username.to_string(),
			created_at: chrono::Utc::now(),
		};

		self.users
			.write()
			.expect("store lock poisoned")
			.insert(user.id, user.clone());

		user
	}

	/// Inserts a session for a user, as the external login flow would.
	pub fn add_session(&self, user_id: Uuid) -> Uuid {
		let session_id = Uuid::new_v4();

		self.sessions
			.write()
			.expect("store lock poisoned")
			.insert(session_id, user_id);

		session_id
	}
}

#[async_trait]
impl Store for MemoryStore {
	async fn user_by_session(&self, session_id: Uuid) -> Result<Option<User>, Error> {
		let user_id = self
			.sessions
			.read()
			.expect("store lock poisoned")
			.get(&session_id)
			.copied();

		Ok(user_id.and_then(|id| {
			self.users
				.read()
				.expect("store lock poisoned")
				.get(&id)
				.cloned()
		}))
	}

	async fn user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
		Ok(self
			.users
			.read()
			.expect("store lock poisoned")
			.values()
			.find(|user| user.username == username)
			.cloned())
	}

	async fn create_post(&self, user_id: Uuid, title: &str, body: &str) -> Result<Post, Error> {
		let post = Post {
			id: Uuid::new_v4(),
			user_id,
			title: title.to_string(),
			body: body.to_string(),
			created_at: chrono::Utc::now(),
		};

		self.posts
			.write()
			.expect("store lock poisoned")
			.insert(post.id, post.clone());

		Ok(post)
	}

	async fn post(&self, post_id: Uuid) -> Result<Option<Post>, Error> {
		Ok(self
			.posts
			.read()
			.expect("store lock poisoned")
			.get(&post_id)
			.cloned())
	}

	async fn posts_by_owner(
		&self,
		user_id: Uuid,
		limit: i64,
		offset: i64,
	) -> Result<Vec<Post>, Error> {
		let mut posts: Vec<Post> = self
			.posts
			.read()
			.expect("store lock poisoned")
			.values()
			.filter(|post| post.user_id == user_id)
			.cloned()
			.collect();

		posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

		Ok(posts
			.into_iter()
			.skip(usize::try_from(offset).unwrap_or(0))
			.take(usize::try_from(limit).unwrap_or(0))
			.collect())
	}

	async fn all_posts(&self) -> Result<Vec<Post>, Error> {
		let mut posts: Vec<Post> = self
			.posts
			.read()
			.expect("store lock poisoned")
			.values()
			.cloned()
			.collect();

		posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

		Ok(posts)
	}

	async fn update_post(
		&self,
		post_id: Uuid,
		user_id: Uuid,
		title: Option<&str>,
		body: Option<&str>,
	) -> Result<Option<Post>, Error> {
		let mut posts = self.posts.write().expect("store lock poisoned");

		// Single guarded mutation under one lock, mirroring the filtered
		// UPDATE in the Postgres store.
		let Some(post) = posts
			.get_mut(&post_id)
			.filter(|post| post.user_id == user_id)
		else {
			return Ok(None);
		};

		if let Some(title) = title {
			post.title = title.to_string();
		}

		if let Some(body) = body {
			post.body = body.to_string();
		}

		Ok(Some(post.clone()))
	}

	async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool, Error> {
		let mut posts = self.posts.write().expect("store lock poisoned");

		if posts
			.get(&post_id)
			.is_some_and(|post| post.user_id == user_id)
		{
			posts.remove(&post_id);
			return Ok(true);
		}

		Ok(false)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[tokio::test]
	async fn test_update_is_filtered_by_owner() {
		let store = MemoryStore::new();
		let owner = store.add_user("alice");
		let intruder = store.add_user("mallory");

		let post = store.create_post(owner.id, "title", "body").await.unwrap();

		let updated = store
			.update_post(post.id, intruder.id, Some("changed"), None)
			.await
			.unwrap();
		assert!(updated.is_none());

		// The post must be untouched after the failed update.
		let stored = store.post(post.id).await.unwrap().unwrap();
		assert_eq!(stored.title, "title");

		let updated = store
			.update_post(post.id, owner.id, Some("changed"), None)
			.await
			.unwrap()
			.unwrap();
		assert_eq!(updated.title, "changed");
		assert_eq!(updated.body, "body");
	}

	#[tokio::test]
	async fn test_delete_is_filtered_by_owner() {
		let store = MemoryStore::new();
		let owner = store.add_user("alice");
		let intruder = store.add_user("mallory");

		let post = store.create_post(owner.id, "title", "body").await.unwrap();

		assert!(!store.delete_post(post.id, intruder.id).await.unwrap());
		assert!(store.post(post.id).await.unwrap().is_some());

		assert!(store.delete_post(post.id, owner.id).await.unwrap());
		assert!(store.post(post.id).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_user_lookups() {
		let store = MemoryStore::new();
		let user = store.add_user("alice");
		let session_id = store.add_session(user.id);

		let resolved = store.user_by_session(session_id).await.unwrap().unwrap();
		assert_eq!(resolved.id, user.id);

		assert!(store
			.user_by_session(Uuid::new_v4())
			.await
			.unwrap()
			.is_none());

		let by_name = store.user_by_username("alice").await.unwrap().unwrap();
		assert_eq!(by_name.id, user.id);

		assert!(store.user_by_username("bob").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_posts_by_owner_pages_newest_first() {
		let store = MemoryStore::new();
		let user = store.add_user("alice");

		for i in 0..5 {
			store
				.create_post(user.id, &format!("post {i}"), "body")
				.await
				.unwrap();
		}

		let page = store.posts_by_owner(user.id, 3, 0).await.unwrap();
		assert_eq!(page.len(), 3);

		let rest = store.posts_by_owner(user.id, 3, 3).await.unwrap();
		assert_eq!(rest.len(), 2);

		assert!(store
			.posts_by_owner(Uuid::new_v4(), 10, 0)
			.await
			.unwrap()
			.is_empty());
	}
}

//! In-memory store used by unit and integration tests.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{Blog, BlogSummary, OwnerSummary, UpdateBlogRequest, User};

use super::{BlogStore, NewBlog, NewUser, UserStore};

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    blogs: Vec<Blog>,
}

/// Implements both store traits over a single lock so blog listings can
/// resolve owners without crossing store boundaries.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> ApiError {
        ApiError::Internal("store lock poisoned".to_string())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create(&self, new: NewUser) -> Result<User> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        if inner.users.iter().any(|u| u.username == new.username) {
            return Err(ApiError::DuplicateUsername);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            name: new.name,
            password_hash: new.password_hash,
            blogs: Vec::new(),
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn append_blog(&self, user_id: Uuid, blog_id: Uuid) -> Result<User> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;
        user.blogs.push(blog_id);
        Ok(user.clone())
    }

    async fn list_with_blogs(&self) -> Result<Vec<(User, Vec<BlogSummary>)>> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        let listed = inner
            .users
            .iter()
            .map(|user| {
                let summaries = user
                    .blogs
                    .iter()
                    .filter_map(|blog_id| inner.blogs.iter().find(|b| b.id == *blog_id))
                    .map(BlogSummary::from)
                    .collect();
                (user.clone(), summaries)
            })
            .collect();
        Ok(listed)
    }
}

#[async_trait]
impl BlogStore for InMemoryStore {
    async fn create(&self, new: NewBlog) -> Result<Blog> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        let blog = Blog {
            id: Uuid::new_v4(),
            title: new.title,
            author: new.author,
            url: new.url,
            likes: new.likes,
            user_id: new.user_id,
            created_at: Utc::now(),
        };
        inner.blogs.push(blog.clone());
        Ok(blog)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        Ok(inner.blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn update(&self, id: Uuid, changes: UpdateBlogRequest) -> Result<Option<Blog>> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        let Some(blog) = inner.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            blog.title = title;
        }
        if let Some(author) = changes.author {
            blog.author = Some(author);
        }
        if let Some(url) = changes.url {
            blog.url = url;
        }
        if let Some(likes) = changes.likes {
            blog.likes = likes;
        }
        Ok(Some(blog.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        let before = inner.blogs.len();
        inner.blogs.retain(|b| b.id != id);
        Ok(inner.blogs.len() < before)
    }

    async fn list_with_owners(&self) -> Result<Vec<(Blog, OwnerSummary)>> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        let listed = inner
            .blogs
            .iter()
            .filter_map(|blog| {
                inner
                    .users
                    .iter()
                    .find(|u| u.id == blog.user_id)
                    .map(|owner| (blog.clone(), OwnerSummary::from(owner)))
            })
            .collect();
        Ok(listed)
    }
}

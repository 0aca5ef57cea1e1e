//! Ownership orchestration for blogs.
//!
//! Creation is a two-step saga without compensation: the blog row is
//! persisted first, then the owner's back-reference list is appended. A
//! failure between the steps surfaces to the caller and leaves a blog
//! reachable by id but missing from the owner's listing (accepted
//! consistency gap, not masked).

use std::sync::Arc;

use uuid::Uuid;

use crate::db::{BlogStore, NewBlog, UserStore};
use crate::error::{ApiError, Result};
use crate::models::{Blog, CreateBlogRequest, UpdateBlogRequest, User};

#[derive(Clone)]
pub struct BlogService {
    blogs: Arc<dyn BlogStore>,
    users: Arc<dyn UserStore>,
}

impl BlogService {
    pub fn new(blogs: Arc<dyn BlogStore>, users: Arc<dyn UserStore>) -> Self {
        Self { blogs, users }
    }

    /// Create a blog owned by `owner` and link it to the owner's
    /// back-reference list.
    pub async fn create_blog(&self, owner: &User, req: CreateBlogRequest) -> Result<Blog> {
        let title = req.title.filter(|t| !t.is_empty());
        let url = req.url.filter(|u| !u.is_empty());
        let (Some(title), Some(url)) = (title, url) else {
            return Err(ApiError::Validation("title and url are required".to_string()));
        };

        let blog = self
            .blogs
            .create(NewBlog {
                title,
                author: req.author,
                url,
                likes: req.likes.unwrap_or(0),
                user_id: owner.id,
            })
            .await?;

        self.users.append_blog(owner.id, blog.id).await?;

        tracing::info!(blog_id = %blog.id, owner = %owner.username, "blog created");
        Ok(blog)
    }

    /// Update any subset of a blog's fields. Deliberately not
    /// ownership-checked, unlike delete.
    pub async fn update_blog(&self, id: Uuid, changes: UpdateBlogRequest) -> Result<Blog> {
        self.blogs
            .update(id, changes)
            .await?
            .ok_or_else(|| ApiError::NotFound("blog not found".to_string()))
    }

    /// Delete a blog; only its creator may do so. Deleting an id that is
    /// already gone reports `NotFound` rather than silent success.
    pub async fn delete_blog(&self, requester: &User, id: Uuid) -> Result<()> {
        let blog = self
            .blogs
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("blog not found".to_string()))?;

        if blog.user_id != requester.id {
            return Err(ApiError::Forbidden(
                "only the creator may delete a blog".to_string(),
            ));
        }

        if !self.blogs.delete(id).await? {
            return Err(ApiError::NotFound("blog not found".to_string()));
        }

        tracing::info!(blog_id = %id, requester = %requester.username, "blog deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{InMemoryStore, NewUser};

    fn service_with_store() -> (BlogService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let service = BlogService::new(store.clone(), store.clone());
        (service, store)
    }

    async fn register(store: &Arc<InMemoryStore>, username: &str) -> User {
        UserStore::create(
            store.as_ref(),
            NewUser {
                username: username.to_string(),
                name: None,
                password_hash: "$argon2id$stub".to_string(),
            },
        )
        .await
        .unwrap()
    }

    // InMemoryStore implements both store traits, so lookups need the
    // trait spelled out.
    async fn user_by_id(store: &InMemoryStore, id: Uuid) -> Option<User> {
        UserStore::find_by_id(store, id).await.unwrap()
    }

    async fn blog_by_id(store: &InMemoryStore, id: Uuid) -> Option<Blog> {
        BlogStore::find_by_id(store, id).await.unwrap()
    }

    fn scrumban(likes: Option<i64>) -> CreateBlogRequest {
        CreateBlogRequest {
            title: Some("Benefits of Scrumban".to_string()),
            author: Some("Kalle Ilves".to_string()),
            url: Some("www.google.com".to_string()),
            likes,
        }
    }

    #[tokio::test]
    async fn create_blog_attaches_owner_and_back_reference() {
        let (service, store) = service_with_store();
        let owner = register(&store, "root").await;

        let blog = service.create_blog(&owner, scrumban(Some(7))).await.unwrap();

        assert_eq!(blog.user_id, owner.id);
        assert_eq!(blog.likes, 7);

        let owner = user_by_id(&store, owner.id).await.unwrap();
        assert_eq!(owner.blogs, vec![blog.id]);
    }

    #[tokio::test]
    async fn create_blog_defaults_likes_to_zero() {
        let (service, store) = service_with_store();
        let owner = register(&store, "root").await;

        let blog = service.create_blog(&owner, scrumban(None)).await.unwrap();
        assert_eq!(blog.likes, 0);
    }

    // No clamping: a caller-supplied negative value passes through.
    #[tokio::test]
    async fn create_blog_passes_negative_likes_through() {
        let (service, store) = service_with_store();
        let owner = register(&store, "root").await;

        let blog = service.create_blog(&owner, scrumban(Some(-3))).await.unwrap();
        assert_eq!(blog.likes, -3);
    }

    #[tokio::test]
    async fn create_blog_without_title_or_url_persists_nothing() {
        let (service, store) = service_with_store();
        let owner = register(&store, "root").await;

        for req in [
            CreateBlogRequest {
                title: None,
                author: Some("Kalle Ilves".to_string()),
                url: Some("www.google.com".to_string()),
                likes: Some(7),
            },
            CreateBlogRequest {
                title: Some("Benefits of Scrumban".to_string()),
                author: None,
                url: None,
                likes: None,
            },
            CreateBlogRequest {
                title: Some(String::new()),
                author: None,
                url: Some(String::new()),
                likes: None,
            },
        ] {
            let err = service.create_blog(&owner, req).await.unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }

        assert!(store.list_with_owners().await.unwrap().is_empty());
        let owner = user_by_id(&store, owner.id).await.unwrap();
        assert!(owner.blogs.is_empty());
    }

    #[tokio::test]
    async fn delete_blog_succeeds_only_for_owner() {
        let (service, store) = service_with_store();
        let owner = register(&store, "root").await;
        let intruder = register(&store, "mallory").await;

        let blog = service.create_blog(&owner, scrumban(Some(7))).await.unwrap();

        let err = service.delete_blog(&intruder, blog.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert!(blog_by_id(&store, blog.id).await.is_some());

        service.delete_blog(&owner, blog.id).await.unwrap();
        assert!(blog_by_id(&store, blog.id).await.is_none());
    }

    #[tokio::test]
    async fn delete_blog_twice_reports_not_found() {
        let (service, store) = service_with_store();
        let owner = register(&store, "root").await;
        let blog = service.create_blog(&owner, scrumban(None)).await.unwrap();

        service.delete_blog(&owner, blog.id).await.unwrap();
        let err = service.delete_blog(&owner, blog.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_unknown_blog_reports_not_found_for_any_requester() {
        let (service, store) = service_with_store();
        let owner = register(&store, "root").await;

        let err = service.delete_blog(&owner, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    // Update intentionally skips the ownership check that delete enforces.
    #[tokio::test]
    async fn update_blog_is_not_ownership_checked() {
        let (service, store) = service_with_store();
        let owner = register(&store, "root").await;
        let blog = service.create_blog(&owner, scrumban(Some(7))).await.unwrap();

        let updated = service
            .update_blog(
                blog.id,
                UpdateBlogRequest {
                    likes: Some(8),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.likes, 8);
        assert_eq!(updated.title, blog.title);
    }

    #[tokio::test]
    async fn update_unknown_blog_reports_not_found() {
        let (service, _store) = service_with_store();
        let err = service
            .update_blog(Uuid::new_v4(), UpdateBlogRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}

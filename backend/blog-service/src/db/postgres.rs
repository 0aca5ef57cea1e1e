//! Postgres-backed stores.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{Blog, BlogSummary, OwnerSummary, UpdateBlogRequest, User};

use super::{BlogStore, NewBlog, NewUser, UserStore};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PG_UNIQUE_VIOLATION: &str = "23505";

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, new: NewUser) -> Result<User> {
        // The unique constraint on username is the authoritative guard;
        // handler-level pre-checks only produce a friendlier fast path.
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, name, password_hash, blogs, created_at)
            VALUES ($1, $2, $3, $4, '{}', CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.username)
        .bind(&new.name)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(PG_UNIQUE_VIOLATION) => {
                ApiError::DuplicateUsername
            }
            _ => ApiError::from(e),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn append_blog(&self, user_id: Uuid, blog_id: Uuid) -> Result<User> {
        // Single-statement array_append keeps concurrent creations by the
        // same user from losing back-references to a read-modify-write race.
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET blogs = array_append(blogs, $2)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(blog_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))
    }

    async fn list_with_blogs(&self) -> Result<Vec<(User, Vec<BlogSummary>)>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        let blogs = sqlx::query_as::<_, Blog>("SELECT * FROM blogs")
            .fetch_all(&self.pool)
            .await?;

        let by_id: HashMap<Uuid, &Blog> = blogs.iter().map(|b| (b.id, b)).collect();
        let listed = users
            .into_iter()
            .map(|user| {
                let summaries = user
                    .blogs
                    .iter()
                    .filter_map(|blog_id| by_id.get(blog_id))
                    .map(|blog| BlogSummary::from(*blog))
                    .collect();
                (user, summaries)
            })
            .collect();
        Ok(listed)
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn create(&self, new: NewBlog) -> Result<Blog> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            INSERT INTO blogs (id, title, author, url, likes, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, CURRENT_TIMESTAMP)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.author)
        .bind(&new.url)
        .bind(new.likes)
        .bind(new.user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(blog)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>> {
        let blog = sqlx::query_as::<_, Blog>("SELECT * FROM blogs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(blog)
    }

    async fn update(&self, id: Uuid, changes: UpdateBlogRequest) -> Result<Option<Blog>> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            UPDATE blogs
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                url = COALESCE($4, url),
                likes = COALESCE($5, likes)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.url)
        .bind(changes.likes)
        .fetch_optional(&self.pool)
        .await?;
        Ok(blog)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_with_owners(&self) -> Result<Vec<(Blog, OwnerSummary)>> {
        let blogs = sqlx::query_as::<_, Blog>("SELECT * FROM blogs ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        let users = sqlx::query_as::<_, User>("SELECT * FROM users")
            .fetch_all(&self.pool)
            .await?;

        let by_id: HashMap<Uuid, &User> = users.iter().map(|u| (u.id, u)).collect();
        let listed = blogs
            .into_iter()
            .filter_map(|blog| {
                by_id
                    .get(&blog.user_id)
                    .map(|owner| (blog, OwnerSummary::from(*owner)))
            })
            .collect();
        Ok(listed)
    }
}

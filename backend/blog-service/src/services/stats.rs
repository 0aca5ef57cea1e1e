//! Aggregations over blog collections.

use serde::Serialize;

use crate::models::Blog;

/// Projection of the most-liked blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: Option<String>,
    pub likes: i64,
}

impl From<&Blog> for FavoriteBlog {
    fn from(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            author: blog.author.clone(),
            likes: blog.likes,
        }
    }
}

/// Sum of likes across all blogs; zero for an empty list.
pub fn total_likes(blogs: &[Blog]) -> i64 {
    blogs.iter().map(|b| b.likes).sum()
}

/// The blog with the most likes, `None` for an empty list. Ties go to
/// the later entry.
pub fn favorite_blog(blogs: &[Blog]) -> Option<FavoriteBlog> {
    blogs.iter().max_by_key(|b| b.likes).map(FavoriteBlog::from)
}

/// Blog CRUD handlers
use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::{
    BlogResponse, BlogWithOwnerResponse, CreateBlogRequest, UpdateBlogRequest,
};
use crate::AppState;

/// GET /blogs
pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse> {
    let blogs = state.blogs.list_with_owners().await?;

    let body: Vec<BlogWithOwnerResponse> = blogs
        .into_iter()
        .map(|(blog, owner)| BlogWithOwnerResponse {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: owner,
        })
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /blogs (requires auth)
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    payload: web::Json<CreateBlogRequest>,
) -> Result<HttpResponse> {
    let blog = state
        .blog_service
        .create_blog(&user.0, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(BlogResponse::from(&blog)))
}

/// PUT /blogs/{id} (no auth required, unlike delete)
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateBlogRequest>,
) -> Result<HttpResponse> {
    let blog = state
        .blog_service
        .update_blog(path.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(BlogResponse::from(&blog)))
}

/// DELETE /blogs/{id} (requires auth; owner only)
pub async fn delete(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state
        .blog_service
        .delete_blog(&user.0, path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub mod blog;
pub mod user;

pub use blog::{
    Blog, BlogResponse, BlogSummary, BlogWithOwnerResponse, CreateBlogRequest, UpdateBlogRequest,
};
pub use user::{
    CreateUserRequest, LoginRequest, LoginResponse, OwnerSummary, User, UserResponse,
    UserWithBlogsResponse,
};

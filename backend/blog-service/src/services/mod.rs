pub mod blog_service;
pub mod stats;

pub use blog_service::BlogService;

pub mod cache_service;
pub mod legal_service;

pub use cache_service::*;
pub use legal_service::*;

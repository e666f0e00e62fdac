//! Product entity and related services.

mod entity;
mod handlers;
mod service;

pub use entity::Product;
pub use handlers::SendEmailOnProductCreatedHandler;
pub use service::ProductService;

//! Customer entity, its address value object and related services.

mod entity;
mod factory;
mod handlers;
mod service;
mod value_objects;

pub use entity::Customer;
pub use factory::CustomerFactory;
pub use handlers::{
    AnnounceCustomerCreatedHandler, LogAddressChangedHandler, LogCustomerCreatedHandler,
};
pub use service::CustomerService;
pub use value_objects::Address;

pub mod health;
pub mod put;
pub mod get;
pub mod bulk;

pub use health::health_handler;
pub use put::put_handler;
pub use get::get_handler;
pub use bulk::bulk_handler;

pub mod health_handler;
pub mod quiz_handler;

pub use health_handler::health_check;
pub use quiz_handler::configure_routes;

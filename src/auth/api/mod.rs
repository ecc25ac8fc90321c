//! HTTP surface of the auth module

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::require_auth;
pub use routes::create_auth_routes;

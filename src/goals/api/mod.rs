//! HTTP surface of the goals module

pub mod handlers;
pub mod routes;

pub use routes::create_goal_routes;

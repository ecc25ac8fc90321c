// src/api/mod.rs

pub mod handlers;
pub mod server;
pub mod server_config;  // Server limits
pub mod state;          // Shared router state

pub use server::{create_router, ApiServer};
pub use state::AppState;

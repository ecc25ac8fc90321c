// src/lib.rs
//! REST backend: user registration and login with bearer-token sessions,
//! plus a per-user goals resource.

pub mod api;
pub mod auth;
pub mod config;
pub mod goals;
pub mod storage;

pub use api::{create_router, ApiServer, AppState};
pub use config::{AppConfig, ConfigError};

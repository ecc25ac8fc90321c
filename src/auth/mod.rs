//! User authentication
//!
//! ```text
//! auth/
//! ├── types.rs          # request/response and stored-user types
//! ├── errors.rs         # AuthError
//! ├── service.rs        # AuthService: register, login, current user
//! ├── core/
//! │   ├── password_service.rs   # bcrypt
//! │   └── token_service.rs      # JWT
//! ├── storage/          # UserStorage + memory and SQLite backends
//! └── api/              # handlers, routes, bearer middleware
//! ```

pub mod api;
pub mod core;
pub mod errors;
pub mod service;
pub mod storage;
pub mod types;

pub use api::{create_auth_routes, require_auth};
pub use errors::AuthError;
pub use service::AuthService;
pub use storage::{MemoryUserStorage, SqliteUserStorage, UserStorage};
pub use types::{AuthResponse, AuthenticatedUser, LoginRequest, RegisterRequest, UserProfile};

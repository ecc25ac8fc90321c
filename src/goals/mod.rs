//! Goals owned by authenticated users
//!
//! Every operation is scoped to the caller resolved by `require_auth`.

pub mod api;
pub mod errors;
pub mod service;
pub mod storage;
pub mod types;

pub use api::create_goal_routes;
pub use errors::GoalError;
pub use service::GoalService;
pub use storage::{GoalStorage, MemoryGoalStorage, SqliteGoalStorage};
pub use types::{DeletedGoal, Goal, GoalRequest};

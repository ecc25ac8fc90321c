//! Goal store abstraction

pub mod r#trait;
pub mod memory;
pub mod sqlite;

pub use r#trait::GoalStorage;
pub use memory::MemoryGoalStorage;
pub use sqlite::SqliteGoalStorage;

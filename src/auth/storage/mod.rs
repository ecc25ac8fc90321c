//! User store abstraction
//!
//! `insert` is an atomic insert-if-absent on email; every backend enforces it
//! at the store, not in the caller.

pub mod r#trait;
pub mod memory;
pub mod sqlite;

pub use r#trait::UserStorage;
pub use memory::MemoryUserStorage;
pub use sqlite::SqliteUserStorage;

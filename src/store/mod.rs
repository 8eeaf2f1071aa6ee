//! Persistence for users and tasks.
//!
//! Handlers only see the [`Repository`] trait. `postgres` is the production
//! backend; `memory` keeps everything in process and is used for tests and
//! database-less local runs.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use crate::models::{Task, User};

pub use memory::MemoryRepository;
pub use postgres::PostgresRepository;

/// Repository as stored in Rocket's managed state.
pub type SharedRepository = Arc<dyn Repository>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("User {0} already exists")]
    UserAlreadyExists(String),
    #[error("database connection unavailable: {0}")]
    ConnectionUnavailable(String),
    #[error("query failed: {0}")]
    Query(String),
}

pub trait Repository: Send + Sync {
    fn find_user_by_username(&self, name: &str) -> Result<User, StoreError>;

    fn user_exists(&self, name: &str) -> Result<bool, StoreError>;

    fn create_user(&self, name: &str, password_hash: &str) -> Result<(), StoreError>;

    /// Tasks owned by `owner`, oldest first. Empty when the user has none.
    fn list_tasks(&self, owner: i32) -> Result<Vec<Task>, StoreError>;

    fn create_task(&self, owner: i32, description: &str) -> Result<(), StoreError>;

    /// Removes the task only if `owner` owns it; anything else is a no-op.
    fn delete_task(&self, owner: i32, task_id: i32) -> Result<(), StoreError>;
}

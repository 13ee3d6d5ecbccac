//! The authoritative holder of todo state.
//!
//! [`TodoStore`] is the interface the dashboard consumes: four mutations, the
//! `list` query and its live form, `subscribe`. Both implementations share the
//! rules in [`crate::todo_api`] and push the full list to subscribers after
//! every successful mutation. Concurrent writers are not reconciled; the last
//! write wins.

use crate::error::AppError;
use crate::live::Subscription;
use crate::model::{NewTodo, Todo, TodoId, TodoPatch};
use time::OffsetDateTime;

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub trait TodoStore {
    fn create(&mut self, draft: NewTodo) -> Result<TodoId, AppError>;

    fn update(&mut self, id: &TodoId, patch: TodoPatch) -> Result<(), AppError>;

    fn toggle(&mut self, id: &TodoId) -> Result<(), AppError>;

    fn remove(&mut self, id: &TodoId) -> Result<(), AppError>;

    /// All todos, oldest first.
    fn list(&self) -> Result<Vec<Todo>, AppError>;

    fn subscribe(&mut self) -> Result<Subscription, AppError>;

    fn get(&self, id: &TodoId) -> Result<Todo, AppError> {
        self.list()?
            .into_iter()
            .find(|todo| todo.id == *id)
            .ok_or_else(|| AppError::not_found(format!("todo {id} not found")))
    }
}

/// Source of creation timestamps.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

impl<F> Clock for F
where
    F: Fn() -> OffsetDateTime,
{
    fn now(&self) -> OffsetDateTime {
        self()
    }
}

//! Create form and edit dialog state.
//!
//! Both validate the title before any store call, close and report success
//! when the store accepts the change, and stay open with every entered value
//! intact when it does not.

use crate::model::{NewTodo, Priority, Todo, TodoId, TodoPatch};
use crate::notice::Notice;
use crate::store::TodoStore;
use crate::todo_api;
use time::OffsetDateTime;

const MISSING_TITLE: &str = "Please enter a title";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    open: bool,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<OffsetDateTime>,
}

impl TodoForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Cancel. Entered values are kept for the next time the form opens.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn submit(&mut self, store: &mut dyn TodoStore) -> Notice {
        if self.title.trim().is_empty() {
            return Notice::error(MISSING_TITLE);
        }

        let draft = NewTodo {
            title: self.title.trim().to_string(),
            description: todo_api::normalize_description(Some(&self.description)),
            priority: self.priority,
            due_date: self.due_date,
        };

        match store.create(draft) {
            Ok(id) => {
                tracing::debug!(%id, "create form submitted");
                *self = Self::default();
                Notice::success("Todo created successfully!")
            }
            Err(err) => {
                tracing::warn!(error = %err, "create form failed");
                Notice::error("Failed to create todo")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDialog {
    id: TodoId,
    open: bool,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl EditDialog {
    pub fn for_todo(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            open: false,
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
            priority: todo.priority,
        }
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the dialog seeded from `latest`. An already open dialog keeps
    /// its draft, so a front end that holds the dialog across store pushes
    /// never loses typed edits. The terminal session opens a fresh dialog per
    /// line and always sees the seeded values.
    pub fn open_with(&mut self, latest: &Todo) {
        if !self.open {
            *self = Self::for_todo(latest);
        }
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// A blank description leaves the stored one as it is.
    pub fn submit(&mut self, store: &mut dyn TodoStore) -> Notice {
        if self.title.trim().is_empty() {
            return Notice::error(MISSING_TITLE);
        }

        let patch = TodoPatch {
            title: Some(self.title.trim().to_string()),
            description: todo_api::normalize_description(Some(&self.description)),
            priority: Some(self.priority),
        };

        match store.update(&self.id, patch) {
            Ok(()) => {
                tracing::debug!(id = %self.id, "edit dialog submitted");
                self.open = false;
                Notice::success("Todo updated successfully!")
            }
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "edit dialog failed");
                Notice::error("Failed to update todo")
            }
        }
    }
}

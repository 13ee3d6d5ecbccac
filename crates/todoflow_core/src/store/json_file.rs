use crate::error::AppError;
use crate::live::{Subscribers, Subscription};
use crate::model::{NewTodo, Todo, TodoId, TodoPatch};
use crate::storage::json_store;
use crate::store::{Clock, SystemClock, TodoStore};
use crate::todo_api;
use std::path::{Path, PathBuf};

/// Store backed by a JSON document on disk. Every mutation re-reads the file,
/// so other processes writing the same file are picked up (last write wins).
pub struct JsonFileStore {
    path: PathBuf,
    clock: Box<dyn Clock>,
    subscribers: Subscribers,
}

impl JsonFileStore {
    pub fn open() -> Result<Self, AppError> {
        Ok(Self::at(json_store::store_path()?))
    }

    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_clock(path, SystemClock)
    }

    pub fn with_clock<P: Into<PathBuf>, C: Clock + 'static>(path: P, clock: C) -> Self {
        Self {
            path: path.into(),
            clock: Box::new(clock),
            subscribers: Subscribers::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate<T>(
        &mut self,
        action: &'static str,
        apply: impl FnOnce(&mut Vec<Todo>) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut todos = json_store::load_todos(&self.path)?;
        let outcome = apply(&mut todos).inspect_err(|err| {
            tracing::warn!(action, error = %err, "todo mutation rejected");
        })?;
        json_store::save_todos(&self.path, &todos)?;
        tracing::debug!(action, path = %self.path.display(), "todo store saved");

        self.subscribers
            .publish(&todo_api::in_creation_order(&todos));
        Ok(outcome)
    }
}

impl TodoStore for JsonFileStore {
    fn create(&mut self, draft: NewTodo) -> Result<TodoId, AppError> {
        let created_at = self.clock.now();
        self.mutate("create", |todos| {
            todo_api::create_todo(todos, draft, created_at).map(|todo| todo.id)
        })
    }

    fn update(&mut self, id: &TodoId, patch: TodoPatch) -> Result<(), AppError> {
        self.mutate("update", |todos| {
            todo_api::update_todo(todos, id, patch).map(|_| ())
        })
    }

    fn toggle(&mut self, id: &TodoId) -> Result<(), AppError> {
        self.mutate("toggle", |todos| todo_api::toggle_todo(todos, id).map(|_| ()))
    }

    fn remove(&mut self, id: &TodoId) -> Result<(), AppError> {
        self.mutate("remove", |todos| todo_api::remove_todo(todos, id).map(|_| ()))
    }

    fn list(&self) -> Result<Vec<Todo>, AppError> {
        let todos = json_store::load_todos(&self.path)?;
        Ok(todo_api::in_creation_order(&todos))
    }

    fn subscribe(&mut self) -> Result<Subscription, AppError> {
        let current = self.list()?;
        Ok(self.subscribers.subscribe(current))
    }
}

use crate::error::AppError;
use crate::live::{Subscribers, Subscription};
use crate::model::{NewTodo, Todo, TodoId, TodoPatch};
use crate::store::{Clock, SystemClock, TodoStore};
use crate::todo_api;

pub struct MemoryStore {
    todos: Vec<Todo>,
    clock: Box<dyn Clock>,
    subscribers: Subscribers,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock<C: Clock + 'static>(clock: C) -> Self {
        Self {
            todos: Vec::new(),
            clock: Box::new(clock),
            subscribers: Subscribers::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn publish(&mut self) {
        let ordered = todo_api::in_creation_order(&self.todos);
        self.subscribers.publish(&ordered);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore for MemoryStore {
    fn create(&mut self, draft: NewTodo) -> Result<TodoId, AppError> {
        let created_at = self.clock.now();
        let todo = todo_api::create_todo(&mut self.todos, draft, created_at)?;
        tracing::debug!(id = %todo.id, "todo created");
        self.publish();
        Ok(todo.id)
    }

    fn update(&mut self, id: &TodoId, patch: TodoPatch) -> Result<(), AppError> {
        todo_api::update_todo(&mut self.todos, id, patch)?;
        tracing::debug!(%id, "todo updated");
        self.publish();
        Ok(())
    }

    fn toggle(&mut self, id: &TodoId) -> Result<(), AppError> {
        let todo = todo_api::toggle_todo(&mut self.todos, id)?;
        tracing::debug!(%id, completed = todo.completed, "todo toggled");
        self.publish();
        Ok(())
    }

    fn remove(&mut self, id: &TodoId) -> Result<(), AppError> {
        todo_api::remove_todo(&mut self.todos, id)?;
        tracing::debug!(%id, "todo removed");
        self.publish();
        Ok(())
    }

    fn list(&self) -> Result<Vec<Todo>, AppError> {
        Ok(todo_api::in_creation_order(&self.todos))
    }

    fn subscribe(&mut self) -> Result<Subscription, AppError> {
        let current = todo_api::in_creation_order(&self.todos);
        Ok(self.subscribers.subscribe(current))
    }
}

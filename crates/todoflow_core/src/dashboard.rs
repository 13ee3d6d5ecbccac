//! Everything the dashboard shows is derived from the latest pushed list and
//! the two filter selectors. Nothing here talks to the store except the item
//! actions at the bottom.

use crate::live::Subscription;
use crate::model::{PriorityFilter, StatusFilter, Todo, TodoId};
use crate::notice::Notice;
use crate::store::TodoStore;

/// Todos passing both filters, in store order.
pub fn visible_todos(
    todos: &[Todo],
    status: StatusFilter,
    priority: PriorityFilter,
) -> Vec<&Todo> {
    todos
        .iter()
        .filter(|todo| status.matches(todo) && priority.matches(todo))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoCounts {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

impl TodoCounts {
    pub fn of(todos: &[Todo]) -> Self {
        let total = todos.len();
        let completed = todos.iter().filter(|todo| todo.completed).count();
        Self {
            total,
            completed,
            remaining: total - completed,
        }
    }

    /// Badge count shown on a status tab.
    pub fn count_for(&self, status: StatusFilter) -> usize {
        match status {
            StatusFilter::All => self.total,
            StatusFilter::Active => self.remaining,
            StatusFilter::Completed => self.completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
    /// Whether to offer a shortcut to the create form.
    pub offers_create: bool,
}

impl EmptyState {
    pub fn for_status(status: StatusFilter) -> Self {
        match status {
            StatusFilter::All => Self {
                title: "No todos yet",
                hint: "Create your first todo to get started.",
                offers_create: true,
            },
            StatusFilter::Active => Self {
                title: "No active tasks",
                hint: "All your tasks are completed!",
                offers_create: true,
            },
            StatusFilter::Completed => Self {
                title: "No completed tasks yet",
                hint: "Complete some tasks to see them here.",
                offers_create: false,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    todos: Option<Vec<Todo>>,
    status_filter: StatusFilter,
    priority_filter: PriorityFilter,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(status_filter: StatusFilter, priority_filter: PriorityFilter) -> Self {
        Self {
            todos: None,
            status_filter,
            priority_filter,
        }
    }

    /// No list has been pushed yet.
    pub fn is_loading(&self) -> bool {
        self.todos.is_none()
    }

    pub fn apply_push(&mut self, todos: Vec<Todo>) {
        tracing::trace!(count = todos.len(), "dashboard received push");
        self.todos = Some(todos);
    }

    /// Pulls the newest push from `subscription`. Returns whether anything
    /// changed.
    pub fn sync(&mut self, subscription: &Subscription) -> bool {
        match subscription.latest() {
            Some(todos) => {
                self.apply_push(todos);
                true
            }
            None => false,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        self.todos.as_deref().unwrap_or(&[])
    }

    pub fn find(&self, id: &TodoId) -> Option<&Todo> {
        self.todos().iter().find(|todo| todo.id == *id)
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn priority_filter(&self) -> PriorityFilter {
        self.priority_filter
    }

    pub fn set_status_filter(&mut self, status_filter: StatusFilter) {
        self.status_filter = status_filter;
    }

    pub fn set_priority_filter(&mut self, priority_filter: PriorityFilter) {
        self.priority_filter = priority_filter;
    }

    pub fn visible(&self) -> Vec<&Todo> {
        visible_todos(self.todos(), self.status_filter, self.priority_filter)
    }

    pub fn counts(&self) -> TodoCounts {
        TodoCounts::of(self.todos())
    }

    /// Status tabs with their badge counts.
    pub fn tabs(&self) -> [(StatusFilter, usize); 3] {
        let counts = self.counts();
        StatusFilter::ALL.map(|status| (status, counts.count_for(status)))
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.visible().is_empty() {
            Some(EmptyState::for_status(self.status_filter))
        } else {
            None
        }
    }
}

/// Flips a todo's completion and words the outcome from its prior state.
pub fn toggle_item(store: &mut dyn TodoStore, todo: &Todo) -> Notice {
    match store.toggle(&todo.id) {
        Ok(()) if todo.completed => Notice::info("No worries! It's back on the list."),
        Ok(()) => Notice::success("Woohoo! Another task conquered!"),
        Err(err) => {
            tracing::warn!(id = %todo.id, error = %err, "toggle failed");
            Notice::error("Something went wrong!")
        }
    }
}

pub fn delete_item(store: &mut dyn TodoStore, todo: &Todo) -> Notice {
    match store.remove(&todo.id) {
        Ok(()) => Notice::success("Todo deleted successfully!"),
        Err(err) => {
            tracing::warn!(id = %todo.id, error = %err, "delete failed");
            Notice::error("Failed to delete todo")
        }
    }
}

//! Validation and mutation rules shared by every store implementation.
//!
//! Each function works on the store's authoritative list and either applies
//! the whole change or leaves the list untouched.

use crate::error::AppError;
use crate::model::{NewTodo, Todo, TodoId, TodoPatch};
use time::OffsetDateTime;

pub fn validate_title(title: &str) -> Result<String, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("title is required"));
    }
    Ok(trimmed.to_string())
}

/// Blank descriptions are stored as absent.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub fn create_todo(
    todos: &mut Vec<Todo>,
    draft: NewTodo,
    created_at: OffsetDateTime,
) -> Result<Todo, AppError> {
    let title = validate_title(&draft.title)?;

    let mut id = TodoId::generate();
    while todos.iter().any(|todo| todo.id == id) {
        id = TodoId::generate();
    }

    let todo = Todo {
        id,
        title,
        description: normalize_description(draft.description.as_deref()),
        priority: draft.priority,
        due_date: draft.due_date,
        completed: false,
        created_at,
    };

    todos.push(todo.clone());
    Ok(todo)
}

pub fn update_todo(todos: &mut [Todo], id: &TodoId, patch: TodoPatch) -> Result<Todo, AppError> {
    let title = patch.title.as_deref().map(validate_title).transpose()?;
    let todo = find_mut(todos, id)?;

    if let Some(title) = title {
        todo.title = title;
    }
    if let Some(description) = patch.description {
        todo.description = normalize_description(Some(&description));
    }
    if let Some(priority) = patch.priority {
        todo.priority = priority;
    }

    Ok(todo.clone())
}

pub fn toggle_todo(todos: &mut [Todo], id: &TodoId) -> Result<Todo, AppError> {
    let todo = find_mut(todos, id)?;
    todo.completed = !todo.completed;
    Ok(todo.clone())
}

pub fn remove_todo(todos: &mut Vec<Todo>, id: &TodoId) -> Result<Todo, AppError> {
    let index = todos
        .iter()
        .position(|todo| todo.id == *id)
        .ok_or_else(|| not_found(id))?;
    Ok(todos.remove(index))
}

/// Creation order, oldest first. Equal timestamps keep insertion order.
pub fn in_creation_order(todos: &[Todo]) -> Vec<Todo> {
    let mut ordered = todos.to_vec();
    ordered.sort_by_key(|todo| todo.created_at);
    ordered
}

fn find_mut<'a>(todos: &'a mut [Todo], id: &TodoId) -> Result<&'a mut Todo, AppError> {
    todos
        .iter_mut()
        .find(|todo| todo.id == *id)
        .ok_or_else(|| not_found(id))
}

fn not_found(id: &TodoId) -> AppError {
    AppError::not_found(format!("todo {id} not found"))
}

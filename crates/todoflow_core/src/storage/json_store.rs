use crate::config;
use crate::error::AppError;
use crate::model::Todo;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
const STORE_FILE_NAME: &str = "todos.json";
const STORE_ENV_VAR: &str = "TODOFLOW_STORE_PATH";

#[derive(Debug, Serialize, Deserialize)]
struct StoredTodos {
    schema_version: u32,
    #[serde(default)]
    todos: Vec<Todo>,
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(config::app_dir()?.join(STORE_FILE_NAME))
}

pub fn load_todos(path: &Path) -> Result<Vec<Todo>, AppError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    let stored: StoredTodos = serde_json::from_str(&content)?;

    if stored.schema_version != SCHEMA_VERSION {
        return Err(AppError::invalid_data(format!(
            "unsupported schema_version {} in {}",
            stored.schema_version,
            path.display()
        )));
    }

    for (index, todo) in stored.todos.iter().enumerate() {
        if todo.title.trim().is_empty() {
            return Err(AppError::invalid_data(format!("todo {} has an empty title", todo.id)));
        }
        if stored.todos[..index].iter().any(|other| other.id == todo.id) {
            return Err(AppError::invalid_data(format!("duplicate todo id {}", todo.id)));
        }
    }

    Ok(stored.todos)
}

pub fn save_todos(path: &Path, todos: &[Todo]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let stored = StoredTodos {
        schema_version: SCHEMA_VERSION,
        todos: todos.to_vec(),
    };
    let content = serde_json::to_string_pretty(&stored)?;
    std::fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)?;
    }

    Ok(())
}

mod filter;
mod todo;

pub use filter::{PriorityFilter, StatusFilter};
pub use todo::{NewTodo, Priority, Todo, TodoId, TodoPatch, parse_due_date};

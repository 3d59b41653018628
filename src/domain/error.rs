use super::{item::TodoItemId, list::TodoListId};

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("Todo list not found")]
    ListNotFound(TodoListId),

    #[error("Todo item not found")]
    ItemNotFound(TodoListId, TodoItemId),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type TodoResult<T> = Result<T, TodoError>;

use async_trait::async_trait;

use super::item::{NewTodoItem, TodoItem, TodoItemId, UpdateTodoItem};
use super::list::{NewTodoList, TodoList, TodoListId, UpdateTodoList};
use super::pagination::Page;

/// Storage for lists. `Ok(None)` / `Ok(false)` mean the row does not exist.
#[async_trait]
pub trait TodoListRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn create(&self, input: NewTodoList) -> anyhow::Result<TodoList>;
    async fn get(&self, id: TodoListId) -> anyhow::Result<Option<TodoList>>;
    async fn list(&self, page: Page) -> anyhow::Result<Vec<TodoList>>;
    async fn update(&self, id: TodoListId, input: UpdateTodoList) -> anyhow::Result<Option<TodoList>>;
    /// Removes the list together with its items.
    async fn delete(&self, id: TodoListId) -> anyhow::Result<bool>;
}

/// Storage for items, always addressed through their parent list.
#[async_trait]
pub trait TodoItemRepository: Send + Sync + 'static {
    /// Returns `Ok(None)` when the parent list does not exist.
    async fn create(&self, list_id: TodoListId, input: NewTodoItem) -> anyhow::Result<Option<TodoItem>>;
    async fn get(&self, list_id: TodoListId, id: TodoItemId) -> anyhow::Result<Option<TodoItem>>;
    async fn list(&self, list_id: TodoListId, page: Page) -> anyhow::Result<Vec<TodoItem>>;
    async fn update(&self, list_id: TodoListId, id: TodoItemId, input: UpdateTodoItem) -> anyhow::Result<Option<TodoItem>>;
    async fn delete(&self, list_id: TodoListId, id: TodoItemId) -> anyhow::Result<bool>;
}

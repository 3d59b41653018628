use async_trait::async_trait;

use crate::domain::error::{TodoError, TodoResult};
use crate::domain::item::{NewTodoItem, TodoItem, TodoItemId, UpdateTodoItem};
use crate::domain::list::TodoListId;
use crate::domain::pagination::Page;
use crate::domain::repository::TodoItemRepository;

#[async_trait]
pub trait TodoItemService: Send + Sync + 'static {
    async fn create(&self, list_id: TodoListId, input: NewTodoItem) -> TodoResult<TodoItem>;
    async fn get(&self, list_id: TodoListId, id: TodoItemId) -> TodoResult<TodoItem>;
    async fn list(&self, list_id: TodoListId, page: Page) -> TodoResult<Vec<TodoItem>>;
    async fn update(&self, list_id: TodoListId, id: TodoItemId, input: UpdateTodoItem) -> TodoResult<TodoItem>;
    async fn delete(&self, list_id: TodoListId, id: TodoItemId) -> TodoResult<()>;
}

#[derive(Clone)]
pub struct TodoItemServiceImpl<R: TodoItemRepository> {
    repo: R,
}

impl<R: TodoItemRepository> TodoItemServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoItemRepository> TodoItemService for TodoItemServiceImpl<R> {
    async fn create(&self, list_id: TodoListId, input: NewTodoItem) -> TodoResult<TodoItem> {
        let item = self.repo.create(list_id, input).await?.ok_or(TodoError::ListNotFound(list_id))?;
        tracing::info!(list_id = list_id.0, item_id = item.id.0, "created todo item");
        Ok(item)
    }

    async fn get(&self, list_id: TodoListId, id: TodoItemId) -> TodoResult<TodoItem> {
        self.repo.get(list_id, id).await?.ok_or(TodoError::ItemNotFound(list_id, id))
    }

    async fn list(&self, list_id: TodoListId, page: Page) -> TodoResult<Vec<TodoItem>> {
        Ok(self.repo.list(list_id, page).await?)
    }

    async fn update(&self, list_id: TodoListId, id: TodoItemId, input: UpdateTodoItem) -> TodoResult<TodoItem> {
        self.repo.update(list_id, id, input).await?.ok_or(TodoError::ItemNotFound(list_id, id))
    }

    async fn delete(&self, list_id: TodoListId, id: TodoItemId) -> TodoResult<()> {
        if !self.repo.delete(list_id, id).await? {
            return Err(TodoError::ItemNotFound(list_id, id));
        }
        tracing::info!(list_id = list_id.0, item_id = id.0, "deleted todo item");
        Ok(())
    }
}

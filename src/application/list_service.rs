use async_trait::async_trait;

use crate::domain::error::{TodoError, TodoResult};
use crate::domain::list::{NewTodoList, TodoList, TodoListId, UpdateTodoList};
use crate::domain::pagination::Page;
use crate::domain::repository::TodoListRepository;

#[async_trait]
pub trait TodoListService: Send + Sync + 'static {
    async fn create(&self, input: NewTodoList) -> TodoResult<TodoList>;
    async fn get(&self, id: TodoListId) -> TodoResult<TodoList>;
    async fn list(&self, page: Page) -> TodoResult<Vec<TodoList>>;
    async fn update(&self, id: TodoListId, input: UpdateTodoList) -> TodoResult<TodoList>;
    async fn delete(&self, id: TodoListId) -> TodoResult<()>;
}

#[derive(Clone)]
pub struct TodoListServiceImpl<R: TodoListRepository> {
    repo: R,
}

impl<R: TodoListRepository> TodoListServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoListRepository> TodoListService for TodoListServiceImpl<R> {
    async fn create(&self, input: NewTodoList) -> TodoResult<TodoList> {
        let list = self.repo.create(input).await?;
        tracing::info!(list_id = list.id.0, "created todo list");
        Ok(list)
    }

    async fn get(&self, id: TodoListId) -> TodoResult<TodoList> {
        self.repo.get(id).await?.ok_or(TodoError::ListNotFound(id))
    }

    async fn list(&self, page: Page) -> TodoResult<Vec<TodoList>> { Ok(self.repo.list(page).await?) }

    async fn update(&self, id: TodoListId, input: UpdateTodoList) -> TodoResult<TodoList> {
        self.repo.update(id, input).await?.ok_or(TodoError::ListNotFound(id))
    }

    async fn delete(&self, id: TodoListId) -> TodoResult<()> {
        if !self.repo.delete(id).await? {
            return Err(TodoError::ListNotFound(id));
        }
        tracing::info!(list_id = id.0, "deleted todo list and its items");
        Ok(())
    }
}

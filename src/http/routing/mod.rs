use axum::Router;

use super::middleware;
use super::routes::{items, lists, system};
use crate::application::{item_service::TodoItemServiceImpl, list_service::TodoListServiceImpl};
use crate::domain::repository::{TodoItemRepository, TodoListRepository};

pub fn app(router: Router) -> Router {
    Router::new()
        .merge(system::router())
        .merge(router)
}

/// Wires both services over one storage handle and applies the middleware stack.
pub fn build<R>(repo: R, debug: bool) -> Router
where
    R: TodoListRepository + TodoItemRepository + Clone,
{
    let lists = lists::router(lists::ListState { service: TodoListServiceImpl::new(repo.clone()) });
    let items = items::router(items::ItemState { service: TodoItemServiceImpl::new(repo) });
    middleware::apply(app(lists.merge(items)), debug)
}

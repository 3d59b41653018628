use axum::{extract::State, routing::{get, post}, Json, Router};
use serde_json::{json, Value};

use crate::application::item_service::TodoItemService;
use crate::domain::item::{NewTodoItem, TodoItem, TodoItemId, UpdateTodoItem};
use crate::domain::list::TodoListId;
use crate::domain::pagination::PageParams;
use crate::http::extract::{ValidJson, ValidPath, ValidQuery};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct ItemState<S: TodoItemService> { pub service: S }

pub fn router<S: TodoItemService + Clone>(state: ItemState<S>) -> Router {
    Router::new()
        .route("/lists/:list_id/items", post(create_item::<S>).get(list_items::<S>))
        .route("/lists/:list_id/items/:item_id", get(get_item::<S>).put(update_item::<S>).delete(delete_item::<S>))
        .with_state(state)
}

async fn create_item<S: TodoItemService>(State(state): State<ItemState<S>>, ValidPath(list_id): ValidPath<i64>, ValidJson(payload): ValidJson<NewTodoItem>) -> Result<Json<TodoItem>, ApiError> {
    Ok(Json(state.service.create(TodoListId(list_id), payload).await?))
}

async fn list_items<S: TodoItemService>(State(state): State<ItemState<S>>, ValidPath(list_id): ValidPath<i64>, ValidQuery(params): ValidQuery<PageParams>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    Ok(Json(state.service.list(TodoListId(list_id), params.into()).await?))
}

async fn get_item<S: TodoItemService>(State(state): State<ItemState<S>>, ValidPath((list_id, item_id)): ValidPath<(i64, i64)>) -> Result<Json<TodoItem>, ApiError> {
    Ok(Json(state.service.get(TodoListId(list_id), TodoItemId(item_id)).await?))
}

async fn update_item<S: TodoItemService>(State(state): State<ItemState<S>>, ValidPath((list_id, item_id)): ValidPath<(i64, i64)>, ValidJson(payload): ValidJson<UpdateTodoItem>) -> Result<Json<TodoItem>, ApiError> {
    Ok(Json(state.service.update(TodoListId(list_id), TodoItemId(item_id), payload).await?))
}

async fn delete_item<S: TodoItemService>(State(state): State<ItemState<S>>, ValidPath((list_id, item_id)): ValidPath<(i64, i64)>) -> Result<Json<Value>, ApiError> {
    state.service.delete(TodoListId(list_id), TodoItemId(item_id)).await?;
    Ok(Json(json!({})))
}

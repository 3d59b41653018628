use axum::{extract::State, routing::{get, post}, Json, Router};
use serde_json::{json, Value};

use crate::application::list_service::TodoListService;
use crate::domain::list::{NewTodoList, TodoList, TodoListId, UpdateTodoList};
use crate::domain::pagination::PageParams;
use crate::http::extract::{ValidJson, ValidPath, ValidQuery};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct ListState<S: TodoListService> { pub service: S }

pub fn router<S: TodoListService + Clone>(state: ListState<S>) -> Router {
    Router::new()
        .route("/lists", post(create_list::<S>).get(list_lists::<S>))
        .route("/lists/:list_id", get(get_list::<S>).put(update_list::<S>).delete(delete_list::<S>))
        .with_state(state)
}

async fn create_list<S: TodoListService>(State(state): State<ListState<S>>, ValidJson(payload): ValidJson<NewTodoList>) -> Result<Json<TodoList>, ApiError> {
    Ok(Json(state.service.create(payload).await?))
}

async fn list_lists<S: TodoListService>(State(state): State<ListState<S>>, ValidQuery(params): ValidQuery<PageParams>) -> Result<Json<Vec<TodoList>>, ApiError> {
    Ok(Json(state.service.list(params.into()).await?))
}

async fn get_list<S: TodoListService>(State(state): State<ListState<S>>, ValidPath(id): ValidPath<i64>) -> Result<Json<TodoList>, ApiError> {
    Ok(Json(state.service.get(TodoListId(id)).await?))
}

async fn update_list<S: TodoListService>(State(state): State<ListState<S>>, ValidPath(id): ValidPath<i64>, ValidJson(payload): ValidJson<UpdateTodoList>) -> Result<Json<TodoList>, ApiError> {
    Ok(Json(state.service.update(TodoListId(id), payload).await?))
}

async fn delete_list<S: TodoListService>(State(state): State<ListState<S>>, ValidPath(id): ValidPath<i64>) -> Result<Json<Value>, ApiError> {
    state.service.delete(TodoListId(id)).await?;
    Ok(Json(json!({})))
}

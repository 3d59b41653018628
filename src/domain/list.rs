use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoListId(pub i64);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoList {
    pub id: TodoListId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTodoList {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub description: Option<String>,
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTodoList {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub description: Option<String>,
}

impl TodoList {
    /// Applies the supplied fields and stamps `updated_at`.
    pub fn apply(&mut self, update: UpdateTodoList, now: DateTime<Utc>) {
        if let Some(t) = update.title { self.title = t; }
        if let Some(d) = update.description { self.description = Some(d); }
        self.updated_at = now;
    }
}

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::list::TodoListId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoItemId(pub i64);

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoItemStatus {
    #[default]
    NotCompleted,
    Completed,
}

impl TodoItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TodoItemStatus::NotCompleted => "NOT_COMPLETED",
            TodoItemStatus::Completed => "COMPLETED",
        }
    }
}

impl From<bool> for TodoItemStatus {
    fn from(complete: bool) -> Self {
        if complete { TodoItemStatus::Completed } else { TodoItemStatus::NotCompleted }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown status code: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for TodoItemStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_COMPLETED" => Ok(TodoItemStatus::NotCompleted),
            "COMPLETED" => Ok(TodoItemStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoItemId,
    pub todo_list_id: TodoListId,
    pub title: String,
    pub description: Option<String>,
    pub status_code: TodoItemStatus,
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTodoItem {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_due_at")]
    pub due_at: Option<DateTime<Utc>>,
}

/// Partial update. `complete` maps onto [`TodoItemStatus`] when present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTodoItem {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_due_at")]
    pub due_at: Option<DateTime<Utc>>,
    pub complete: Option<bool>,
}

/// Parses an RFC 3339 timestamp; one without an offset is taken as UTC.
pub fn parse_due_at(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
}

fn deserialize_due_at<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(deserializer)? else { return Ok(None) };
    parse_due_at(&raw).map(Some).map_err(|e| de::Error::custom(format!("invalid due_at {raw:?}: {e}")))
}

impl TodoItem {
    pub fn apply(&mut self, update: UpdateTodoItem, now: DateTime<Utc>) {
        if let Some(t) = update.title { self.title = t; }
        if let Some(d) = update.description { self.description = Some(d); }
        if let Some(due) = update.due_at { self.due_at = Some(due); }
        if let Some(c) = update.complete { self.status_code = c.into(); }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item() -> TodoItem {
        let now = Utc::now();
        TodoItem {
            id: TodoItemId(7),
            todo_list_id: TodoListId(1),
            title: "Milk".into(),
            description: None,
            status_code: TodoItemStatus::default(),
            due_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn status_serializes_as_screaming_case() {
        assert_eq!(serde_json::to_value(TodoItemStatus::NotCompleted).unwrap(), json!("NOT_COMPLETED"));
        assert_eq!(serde_json::to_value(TodoItemStatus::Completed).unwrap(), json!("COMPLETED"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_value::<TodoItemStatus>(json!("DONE")).is_err());
        assert!("done".parse::<TodoItemStatus>().is_err());
        assert_eq!("COMPLETED".parse::<TodoItemStatus>().unwrap(), TodoItemStatus::Completed);
    }

    #[test]
    fn complete_flag_toggles_both_ways() {
        let mut it = item();
        let now = Utc::now();
        it.apply(UpdateTodoItem { complete: Some(true), ..Default::default() }, now);
        assert_eq!(it.status_code, TodoItemStatus::Completed);
        it.apply(UpdateTodoItem { complete: Some(false), ..Default::default() }, now);
        assert_eq!(it.status_code, TodoItemStatus::NotCompleted);
        it.apply(UpdateTodoItem::default(), now);
        assert_eq!(it.status_code, TodoItemStatus::NotCompleted);
    }

    #[test]
    fn update_payload_accepts_nulls() {
        let update: UpdateTodoItem = serde_json::from_value(json!({
            "title": null,
            "description": null,
            "due_at": "2030-01-02T03:04:05Z",
            "complete": true
        }))
        .unwrap();
        assert!(update.validate().is_ok());
        assert!(update.title.is_none());
        assert_eq!(update.due_at.unwrap().to_rfc3339(), "2030-01-02T03:04:05+00:00");
    }

    #[test]
    fn due_at_without_offset_is_utc() {
        let item: NewTodoItem = serde_json::from_value(json!({ "title": "t", "due_at": "2030-05-01T12:00:00" })).unwrap();
        assert_eq!(item.due_at.unwrap().to_rfc3339(), "2030-05-01T12:00:00+00:00");
        let shifted = parse_due_at("2030-05-01T12:00:00+02:00").unwrap();
        assert_eq!(shifted.to_rfc3339(), "2030-05-01T10:00:00+00:00");
        assert_eq!(parse_due_at("2030-05-01T12:00:00.250").unwrap().timestamp_subsec_millis(), 250);
        assert!(parse_due_at("tomorrow").is_err());
        let absent: NewTodoItem = serde_json::from_value(json!({ "title": "t" })).unwrap();
        assert!(absent.due_at.is_none());
    }

    #[test]
    fn new_item_title_required() {
        assert!(serde_json::from_value::<NewTodoItem>(json!({ "description": "x" })).is_err());
        let blank = NewTodoItem { title: String::new(), description: None, due_at: None };
        assert!(blank.validate().is_err());
    }
}

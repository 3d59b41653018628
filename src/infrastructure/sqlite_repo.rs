use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};

use crate::domain::{
    item::{NewTodoItem, TodoItem, TodoItemId, TodoItemStatus, UpdateTodoItem},
    list::{NewTodoList, TodoList, TodoListId, UpdateTodoList},
    pagination::Page,
    repository::{TodoItemRepository, TodoListRepository},
};

const LIST_COLUMNS: &str = "id, title, description, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, todo_list_id, title, description, status_code, due_at, created_at, updated_at";

/// SQLite-backed storage for both lists and items.
///
/// Every mutation runs inside its own transaction: it is committed on the
/// success path and rolled back when dropped on any early return.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        prepare_sqlite_file(database_url)?;
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        // An in-memory database lives only as long as its connection.
        let pool_options = if is_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("connecting to {database_url}"))?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoListRepository for SqliteRepository {
    async fn init(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS lists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                todo_list_id INTEGER NOT NULL REFERENCES lists (id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                description TEXT,
                status_code TEXT NOT NULL CHECK (status_code IN ('NOT_COMPLETED', 'COMPLETED')),
                due_at TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&mut *tx)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_todo_list_id ON items (todo_list_id)")
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn create(&self, input: NewTodoList) -> Result<TodoList> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;
        let id = sqlx::query(
            "INSERT INTO lists (title, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
        let list = fetch_list(&mut tx, TodoListId(id))
            .await?
            .context("inserted list could not be reloaded")?;
        tx.commit().await?;
        Ok(list)
    }

    async fn get(&self, id: TodoListId) -> Result<Option<TodoList>> {
        let mut conn = self.pool.acquire().await?;
        fetch_list(&mut conn, id).await
    }

    async fn list(&self, page: Page) -> Result<Vec<TodoList>> {
        let rows = sqlx::query(&format!("SELECT {LIST_COLUMNS} FROM lists ORDER BY id ASC LIMIT ?1 OFFSET ?2"))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(row_to_list).collect()
    }

    async fn update(&self, id: TodoListId, input: UpdateTodoList) -> Result<Option<TodoList>> {
        let mut tx = self.pool.begin().await?;
        let Some(mut list) = fetch_list(&mut tx, id).await? else { return Ok(None) };

        list.apply(input, Utc::now());

        sqlx::query("UPDATE lists SET title = ?2, description = ?3, updated_at = ?4 WHERE id = ?1")
            .bind(list.id.0)
            .bind(&list.title)
            .bind(&list.description)
            .bind(list.updated_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;
        let list = fetch_list(&mut tx, id)
            .await?
            .context("updated list could not be reloaded")?;
        tx.commit().await?;
        Ok(Some(list))
    }

    async fn delete(&self, id: TodoListId) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM items WHERE todo_list_id = ?1")
            .bind(id.0)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM lists WHERE id = ?1")
            .bind(id.0)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }
}

#[async_trait]
impl TodoItemRepository for SqliteRepository {
    async fn create(&self, list_id: TodoListId, input: NewTodoItem) -> Result<Option<TodoItem>> {
        let mut tx = self.pool.begin().await?;
        let parent = sqlx::query("SELECT id FROM lists WHERE id = ?1")
            .bind(list_id.0)
            .fetch_optional(&mut *tx)
            .await?;
        if parent.is_none() {
            return Ok(None);
        }

        let now = Utc::now().to_rfc3339();
        let id = sqlx::query(
            "INSERT INTO items (todo_list_id, title, description, status_code, due_at, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(list_id.0)
        .bind(&input.title)
        .bind(&input.description)
        .bind(TodoItemStatus::NotCompleted.as_str())
        .bind(input.due_at.map(|d| d.to_rfc3339()))
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
        let item = fetch_item(&mut tx, list_id, TodoItemId(id))
            .await?
            .context("inserted item could not be reloaded")?;
        tx.commit().await?;
        Ok(Some(item))
    }

    async fn get(&self, list_id: TodoListId, id: TodoItemId) -> Result<Option<TodoItem>> {
        let mut conn = self.pool.acquire().await?;
        fetch_item(&mut conn, list_id, id).await
    }

    async fn list(&self, list_id: TodoListId, page: Page) -> Result<Vec<TodoItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE todo_list_id = ?1 ORDER BY id ASC LIMIT ?2 OFFSET ?3"
        ))
        .bind(list_id.0)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&*self.pool)
        .await?;
        rows.iter().map(row_to_item).collect()
    }

    async fn update(&self, list_id: TodoListId, id: TodoItemId, input: UpdateTodoItem) -> Result<Option<TodoItem>> {
        let mut tx = self.pool.begin().await?;
        let Some(mut item) = fetch_item(&mut tx, list_id, id).await? else { return Ok(None) };

        item.apply(input, Utc::now());

        sqlx::query(
            "UPDATE items SET title = ?3, description = ?4, status_code = ?5, due_at = ?6, updated_at = ?7
             WHERE id = ?1 AND todo_list_id = ?2",
        )
        .bind(item.id.0)
        .bind(item.todo_list_id.0)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.status_code.as_str())
        .bind(item.due_at.map(|d| d.to_rfc3339()))
        .bind(item.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;
        let item = fetch_item(&mut tx, list_id, id)
            .await?
            .context("updated item could not be reloaded")?;
        tx.commit().await?;
        Ok(Some(item))
    }

    async fn delete(&self, list_id: TodoListId, id: TodoItemId) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM items WHERE id = ?1 AND todo_list_id = ?2")
            .bind(id.0)
            .bind(list_id.0)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }
}

async fn fetch_list(conn: &mut SqliteConnection, id: TodoListId) -> Result<Option<TodoList>> {
    let row = sqlx::query(&format!("SELECT {LIST_COLUMNS} FROM lists WHERE id = ?1"))
        .bind(id.0)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(row_to_list).transpose()
}

async fn fetch_item(conn: &mut SqliteConnection, list_id: TodoListId, id: TodoItemId) -> Result<Option<TodoItem>> {
    let row = sqlx::query(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1 AND todo_list_id = ?2"))
        .bind(id.0)
        .bind(list_id.0)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(row_to_item).transpose()
}

fn row_to_list(row: &SqliteRow) -> Result<TodoList> {
    Ok(TodoList {
        id: TodoListId(row.try_get("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
    })
}

fn row_to_item(row: &SqliteRow) -> Result<TodoItem> {
    let status: String = row.try_get("status_code")?;
    let due_at: Option<String> = row.try_get("due_at")?;
    Ok(TodoItem {
        id: TodoItemId(row.try_get("id")?),
        todo_list_id: TodoListId(row.try_get("todo_list_id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status_code: status.parse()?,
        due_at: due_at.as_deref().map(parse_timestamp).transpose()?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(s).with_context(|| format!("invalid timestamp {s:?}"))?;
    Ok(parsed.with_timezone(&Utc))
}

fn is_memory(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

/// Creates the parent directory of a file-backed database URL.
fn prepare_sqlite_file(database_url: &str) -> Result<()> {
    if is_memory(database_url) { return Ok(()); }
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        let path = path.split('?').next().unwrap_or(path);
        // On Windows, absolute paths may look like /C:/path; strip the leading slash
        let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
            &path[1..]
        } else {
            path
        };
        let p = std::path::Path::new(path);
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)?; }
        }
    }
    Ok(())
}

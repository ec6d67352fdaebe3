mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use crate::models::*;

/// Persistence seam for the todo collection.
///
/// The handlers only see this trait, so the backend can be swapped (or
/// faked in tests) without touching the API layer. `update_by_id` and
/// `delete_by_id` return `None` for an unknown id.
pub trait TodoStore: Send + Sync {
    fn create(&self, text: String) -> Result<Todo>;
    fn list(&self) -> Result<Vec<Todo>>;
    fn update_by_id(&self, id: Uuid, input: UpdateTodoInput) -> Result<Option<Todo>>;
    fn delete_by_id(&self, id: Uuid) -> Result<Option<Todo>>;
}

/// Shared handle the router carries as state.
pub type DynStore = Arc<dyn TodoStore>;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the store at `TICKLIST_DB`, or the per-user data directory.
    pub fn open_default() -> Result<Self> {
        if let Ok(path) = std::env::var("TICKLIST_DB") {
            return Self::open(PathBuf::from(path));
        }
        let dirs = directories::ProjectDirs::from("", "", "ticklist")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("ticklist.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    fn get_todo(conn: &Connection, id: Uuid) -> Result<Option<Todo>> {
        let mut stmt = conn.prepare(
            "SELECT id, text, completed, created_at FROM todos WHERE id = ?",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row_to_todo(row)?))
        } else {
            Ok(None)
        }
    }
}

impl TodoStore for Database {
    fn create(&self, text: String) -> Result<Todo> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO todos (id, text, completed, created_at) VALUES (?, ?, ?, ?)",
            (id.to_string(), &text, 0, now.to_rfc3339()),
        )?;

        Ok(Todo {
            id,
            text,
            completed: false,
            created_at: now,
        })
    }

    fn list(&self) -> Result<Vec<Todo>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, text, completed, created_at FROM todos ORDER BY created_at",
        )?;

        let todos = stmt
            .query_map([], |row| {
                Ok(Todo {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    text: row.get(1)?,
                    completed: row.get::<_, i32>(2)? != 0,
                    created_at: parse_datetime(row.get::<_, String>(3)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(todos)
    }

    fn update_by_id(&self, id: Uuid, input: UpdateTodoInput) -> Result<Option<Todo>> {
        // Lock held across lookup and write so a concurrent delete cannot
        // slip in between them.
        let conn = self.conn.lock().expect("database lock poisoned");
        let Some(existing) = Self::get_todo(&conn, id)? else {
            return Ok(None);
        };

        let text = input.text.unwrap_or(existing.text);
        let completed = input.completed.unwrap_or(existing.completed);

        conn.execute(
            "UPDATE todos SET text = ?, completed = ? WHERE id = ?",
            (&text, if completed { 1 } else { 0 }, id.to_string()),
        )?;

        Ok(Some(Todo {
            id,
            text,
            completed,
            created_at: existing.created_at,
        }))
    }

    fn delete_by_id(&self, id: Uuid) -> Result<Option<Todo>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let Some(existing) = Self::get_todo(&conn, id)? else {
            return Ok(None);
        };

        conn.execute("DELETE FROM todos WHERE id = ?", [id.to_string()])?;

        Ok(Some(existing))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn row_to_todo(row: &rusqlite::Row<'_>) -> Result<Todo> {
    Ok(Todo {
        id: parse_uuid(row.get::<_, String>(0)?),
        text: row.get(1)?,
        completed: row.get::<_, i32>(2)? != 0,
        created_at: parse_datetime(row.get::<_, String>(3)?),
    })
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

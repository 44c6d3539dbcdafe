use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use super::{Storage, StoreError, StoreResult, Survey, SurveyRead, SurveyWrite};

const DB_SCHEMA_VERSION: i64 = 1;

/// SQLite-backed document store. Cloning shares the cached handle.
#[derive(Clone)]
pub struct SqliteStorage {
    pub path: String,
    pub container: String,
    handle: Arc<Mutex<Option<SqliteHandle>>>,
}

/// Open connection scoped to one container.
#[derive(Clone)]
pub struct SqliteHandle {
    conn: Arc<Mutex<Connection>>,
    container: Arc<str>,
}

impl SqliteHandle {
    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))
    }
}

fn db_list_surveys(conn: &Connection, container: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM surveys WHERE container = ?1 ORDER BY name")?;
    let names = stmt
        .query_map(params![container], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}

fn db_load_survey(
    conn: &Connection,
    container: &str,
    name: &str,
) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT content FROM surveys WHERE container = ?1 AND name = ?2",
        params![container, name],
        |row| row.get(0),
    )
    .optional()
}

fn db_save_survey(
    conn: &Connection,
    container: &str,
    name: &str,
    content: &str,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO surveys (container, name, content) VALUES (?1, ?2, ?3)
                 ON CONFLICT(container, name) DO UPDATE SET content=excluded.content",
        params![container, name, content],
    )?;
    Ok(())
}

impl SurveyRead for SqliteHandle {
    fn list_surveys(&self) -> StoreResult<Vec<String>> {
        let conn = self.lock()?;
        db_list_surveys(&conn, &self.container).map_err(|err| StoreError::Query(err.to_string()))
    }

    fn get_survey(&self, name: &str) -> StoreResult<Option<Survey>> {
        let raw = {
            let conn = self.lock()?;
            db_load_survey(&conn, &self.container, name)
                .map_err(|err| StoreError::Query(err.to_string()))?
        };
        let Some(raw) = raw else {
            return Ok(None);
        };
        let content = serde_json::from_str(&raw).map_err(|err| {
            StoreError::Query(format!("stored survey {name:?} is not valid JSON: {err}"))
        })?;
        Ok(Some(Survey {
            name: name.to_string(),
            content,
        }))
    }
}

impl SurveyWrite for SqliteHandle {
    fn put_survey(&self, name: &str, content: &Value) -> StoreResult<()> {
        let encoded =
            serde_json::to_string(content).map_err(|err| StoreError::Write(err.to_string()))?;
        let conn = self.lock()?;
        db_save_survey(&conn, &self.container, name, &encoded)
            .map_err(|err| StoreError::Write(err.to_string()))
    }
}

impl Storage for SqliteStorage {
    type Handle = SqliteHandle;

    fn get_client(&self) -> StoreResult<SqliteHandle> {
        let mut cached = self
            .handle
            .lock()
            .map_err(|_| StoreError::Unavailable("store handle lock poisoned".to_string()))?;
        if let Some(handle) = cached.as_ref() {
            return Ok(handle.clone());
        }

        let handle = self.connect()?;
        *cached = Some(handle.clone());
        Ok(handle)
    }
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P, container: &str) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().to_string(),
            container: container.to_string(),
            handle: Arc::new(Mutex::new(None)),
        }
    }

    pub fn reset_all(&self) -> Result<()> {
        if let Ok(mut cached) = self.handle.lock() {
            *cached = None;
        }
        if !std::path::Path::new(&self.path).exists() {
            return Ok(());
        }
        std::fs::remove_file(&self.path)?;
        Ok(())
    }

    pub fn init(&self) -> Result<()> {
        self.get_client()?;
        Ok(())
    }

    fn connect(&self) -> StoreResult<SqliteHandle> {
        if self.path.trim().is_empty() {
            return Err(StoreError::Unavailable(
                "no database path configured".to_string(),
            ));
        }
        if self.container.trim().is_empty() {
            return Err(StoreError::Unavailable(
                "no container name configured".to_string(),
            ));
        }

        let conn = Self::open(&self.path)
            .map_err(|err| StoreError::Unavailable(format!("opening {}: {}", self.path, err)))?;
        log::debug!(
            "Opened survey store {} (container {})",
            self.path,
            self.container
        );

        Ok(SqliteHandle {
            conn: Arc::new(Mutex::new(conn)),
            container: Arc::from(self.container.as_str()),
        })
    }

    fn open(path: &str) -> rusqlite::Result<Connection> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(std::time::Duration::from_millis(500))?;

        Self::migrate(&conn)?;
        Ok(conn)
    }

    fn migrate(conn: &Connection) -> rusqlite::Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if version == DB_SCHEMA_VERSION {
            return Ok(());
        }

        log::info!(
            "SQLite schema migration: {} -> {}",
            version,
            DB_SCHEMA_VERSION
        );

        if version == 0 {
            conn.execute_batch(
                r#"
            CREATE TABLE surveys (
                container TEXT NOT NULL,
                name TEXT NOT NULL,
                content TEXT NOT NULL,
                PRIMARY KEY (container, name)
            );
        "#,
            )?;
            conn.pragma_update(None, "user_version", DB_SCHEMA_VERSION)?;
            return Ok(());
        }

        Err(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::ErrorCode::SchemaChanged as i32),
            Some("database schema version mismatch; please run with --reset option".to_string()),
        ))
    }
}

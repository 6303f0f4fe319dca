//! Database query implementations

use crate::error::{Result, StoreError};
use crate::types::StoredThread;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

// ===== Thread Queries =====

/// Insert a thread
pub fn insert_thread(conn: &Connection, thread: &StoredThread) -> Result<()> {
    let values_json = thread
        .values
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    conn.execute(
        r#"
        INSERT INTO threads (id, values_json, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        "#,
        params![
            thread.id,
            values_json,
            format_timestamp(&thread.created_at),
            format_timestamp(&thread.updated_at),
        ],
    )?;

    Ok(())
}

/// Bump a thread's `updated_at` so it sorts first
pub fn touch_thread(conn: &Connection, thread_id: &str) -> Result<()> {
    let changed = conn.execute(
        "UPDATE threads SET updated_at = ? WHERE id = ?",
        params![format_timestamp(&Utc::now()), thread_id],
    )?;

    if changed == 0 {
        return Err(StoreError::NotFound(thread_id.to_string()).into());
    }
    Ok(())
}

/// Get thread by ID
pub fn get_thread(conn: &Connection, thread_id: &str) -> Result<Option<StoredThread>> {
    let result = conn
        .query_row(
            r#"
            SELECT id, values_json, created_at, updated_at
            FROM threads
            WHERE id = ?
            "#,
            params![thread_id],
            thread_from_row,
        )
        .optional()?;

    Ok(result)
}

/// List threads, most recently updated first
pub fn list_threads(conn: &Connection, limit: usize, offset: usize) -> Result<Vec<StoredThread>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, values_json, created_at, updated_at
        FROM threads
        ORDER BY updated_at DESC, rowid DESC
        LIMIT ? OFFSET ?
        "#,
    )?;

    let threads = stmt
        .query_map(params![limit as i64, offset as i64], thread_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(threads)
}

/// Delete a thread; errors if it does not exist
pub fn delete_thread(conn: &Connection, thread_id: &str) -> Result<()> {
    let changed = conn.execute("DELETE FROM threads WHERE id = ?", params![thread_id])?;

    if changed == 0 {
        return Err(StoreError::NotFound(thread_id.to_string()).into());
    }
    Ok(())
}

fn thread_from_row(row: &Row<'_>) -> rusqlite::Result<StoredThread> {
    let values_json: Option<String> = row.get(1)?;
    let values = values_json
        .map(|json| serde_json::from_str(&json))
        .transpose()
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(StoredThread {
        id: row.get(0)?,
        values,
        created_at: parse_timestamp(2, &row.get::<_, String>(2)?)?,
        updated_at: parse_timestamp(3, &row.get::<_, String>(3)?)?,
    })
}

// ===== Settings Queries =====

/// Get a setting value
pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let result = conn
        .query_row(
            "SELECT value FROM settings WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()?;

    Ok(result)
}

/// Set a setting value
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO settings (key, value, updated_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
        "#,
        params![key, value],
    )?;

    Ok(())
}

/// Remove a setting
pub fn delete_setting(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key = ?", params![key])?;
    Ok(())
}

// ===== Helper Functions =====

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        crate::storage::run_migrations(&conn).unwrap();
        conn
    }

    fn thread_at(id: &str, minute: u32) -> StoredThread {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 12, minute, 0).unwrap();
        StoredThread {
            id: id.to_string(),
            values: Some(json!({ "messages": [{ "content": id }] })),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_thread_crud() {
        let conn = setup_db();
        let thread = thread_at("t-1", 0);

        insert_thread(&conn, &thread).unwrap();

        let retrieved = get_thread(&conn, "t-1").unwrap();
        assert_eq!(retrieved, Some(thread));

        delete_thread(&conn, "t-1").unwrap();
        assert!(get_thread(&conn, "t-1").unwrap().is_none());
    }

    #[test]
    fn test_list_most_recent_first() {
        let conn = setup_db();
        insert_thread(&conn, &thread_at("old", 0)).unwrap();
        insert_thread(&conn, &thread_at("new", 30)).unwrap();
        insert_thread(&conn, &thread_at("mid", 15)).unwrap();

        let ids: Vec<String> = list_threads(&conn, 10, 0)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);

        touch_thread(&conn, "old").unwrap();
        let first = list_threads(&conn, 1, 0).unwrap();
        assert_eq!(first[0].id, "old");
    }

    #[test]
    fn test_thread_without_values() {
        let conn = setup_db();
        let mut thread = thread_at("bare", 0);
        thread.values = None;
        insert_thread(&conn, &thread).unwrap();

        assert_eq!(get_thread(&conn, "bare").unwrap().unwrap().values, None);
    }

    #[test]
    fn test_delete_missing_thread() {
        let conn = setup_db();
        let err = delete_thread(&conn, "ghost").unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::NotFound(id)) if id == "ghost"));
        assert!(touch_thread(&conn, "ghost").is_err());
    }

    #[test]
    fn test_settings() {
        let conn = setup_db();

        set_setting(&conn, "threadHistoryPanelWidth", "320").unwrap();
        set_setting(&conn, "threadHistoryPanelWidth", "450").unwrap();

        let value = get_setting(&conn, "threadHistoryPanelWidth").unwrap();
        assert_eq!(value, Some("450".to_string()));

        delete_setting(&conn, "threadHistoryPanelWidth").unwrap();
        assert!(get_setting(&conn, "threadHistoryPanelWidth").unwrap().is_none());
    }
}

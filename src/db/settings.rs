use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// Initialize the app_settings key/value table
pub fn init_settings_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create app_settings table")?;
    Ok(())
}

/// Upsert a setting value
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO app_settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )
    .context("Failed to set setting")?;
    Ok(())
}

/// Read a setting, falling back to `default` for missing keys
pub fn get_setting(conn: &Connection, key: &str, default: &str) -> Result<String> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM app_settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .context("Failed to read setting")?;
    Ok(value.unwrap_or_else(|| default.to_string()))
}

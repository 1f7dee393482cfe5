use anyhow::{Context, Result};
use log::info;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

/// A stored user profile row. Profiles are append-only; the newest row is
/// the current one and pre-fills the profile form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    /// "m" / "f" or unspecified.
    pub gender: Option<String>,
    /// Birth date as `DD.MM.YYYY` text.
    pub birth: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

/// Insertion payload for a profile row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProfile {
    pub name: String,
    pub gender: Option<String>,
    pub birth: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

/// Initialize the user_profile table
pub fn init_profile_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS user_profile (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            gender TEXT,
            birth TEXT,
            height_cm REAL,
            weight_kg REAL
        )",
        [],
    )
    .context("Failed to create user_profile table")?;
    Ok(())
}

/// Insert a profile row, returning its id
pub fn insert_profile(conn: &Connection, profile: &NewProfile) -> Result<i64> {
    conn.execute(
        "INSERT INTO user_profile (name, gender, birth, height_cm, weight_kg)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            profile.name,
            profile.gender,
            profile.birth,
            profile.height_cm,
            profile.weight_kg
        ],
    )
    .context("Failed to insert profile")?;

    let profile_id = conn.last_insert_rowid();
    info!("Profile saved with ID: {}", profile_id);
    Ok(profile_id)
}

/// List profile rows, newest first
pub fn list_profiles(conn: &Connection, limit: usize) -> Result<Vec<UserProfile>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, gender, birth, height_cm, weight_kg
             FROM user_profile ORDER BY id DESC LIMIT ?1",
        )
        .context("Failed to prepare profile listing")?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(UserProfile {
                id: row.get(0)?,
                name: row.get(1)?,
                gender: row.get(2)?,
                birth: row.get(3)?,
                height_cm: row.get(4)?,
                weight_kg: row.get(5)?,
            })
        })
        .context("Failed to list profiles")?;

    let mut profiles = Vec::new();
    for row in rows {
        profiles.push(row.context("Failed to read profile row")?);
    }
    Ok(profiles)
}

/// The newest profile, or an empty one to pre-fill the form
pub fn last_profile_or_default(conn: &Connection) -> Result<UserProfile> {
    let mut profiles = list_profiles(conn, 1)?;
    Ok(profiles.pop().unwrap_or(UserProfile {
        id: 0,
        name: String::new(),
        gender: None,
        birth: None,
        height_cm: None,
        weight_kg: None,
    }))
}

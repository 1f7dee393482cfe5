use std::env;

use anyhow::Result;
use log::info;
use rusqlite::Connection;

use fridgemate::db;
use fridgemate::recommend::suggest_recipes;
use fridgemate::stats::inventory_stats;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    info!("Starting FridgeMate");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Get database path from environment
    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "fridgemate.db".to_string());

    info!("Initializing database at: {}", database_url);

    let conn = Connection::open(&database_url)?;
    db::init_all_schemas(&conn)?;

    // Ship the built-in catalog; all seeders skip what already exists.
    db::recipes::seed_demo_if_empty(&conn)?;
    let added =
        db::recipes::seed_world_recipes(&conn)? + db::recipes::seed_more_world_recipes(&conn)?;
    if added > 0 {
        info!("Seeded {} catalog recipes", added);
    }

    let stats = inventory_stats(&conn)?;
    info!(
        "Inventory: {} products, {} expired, {} expiring soon",
        stats.total,
        stats.expired,
        stats.soon.len()
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);

    let suggestions = suggest_recipes(&conn, &conn, 10);
    info!("Computed {} suggestions", suggestions.len());
    println!("{}", serde_json::to_string_pretty(&suggestions)?);

    Ok(())
}

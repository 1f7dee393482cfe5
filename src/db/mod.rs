//! SQLite storage collaborators.
//!
//! Each submodule owns one table (or table pair) and exposes plain functions
//! over a [`rusqlite::Connection`]. All tables live in the same database
//! file; every schema initializer is idempotent.

pub mod products;
pub mod profile;
pub mod recipes;
pub mod settings;

pub use products::{delete_product, insert_product, list_products, NewProduct, Product};
pub use profile::{insert_profile, last_profile_or_default, list_profiles, NewProfile, UserProfile};
pub use recipes::{add_recipe, add_recipe_if_absent, get_all_recipes, Recipe, RecipeIngredient};
pub use settings::{get_setting, set_setting};

use anyhow::Result;
use rusqlite::Connection;

/// Create every table the application uses. Safe to call repeatedly.
pub fn init_all_schemas(conn: &Connection) -> Result<()> {
    products::init_products_schema(conn)?;
    recipes::init_recipes_schema(conn)?;
    profile::init_profile_schema(conn)?;
    settings::init_settings_schema(conn)?;
    Ok(())
}

//! # Recipe Recommendation Engine
//!
//! Ranks the recipe catalog by how well the current inventory covers each
//! recipe's ingredient list, with a bonus for using up products that expire
//! soon. The engine is a pure read-and-compute pass: it never mutates the
//! inventory or the catalog, and collaborator failures degrade to an empty
//! result instead of propagating.
//!
//! ## Scoring
//!
//! For a recipe with at least one ingredient:
//!
//! - `coverage` = matched ingredients / total ingredients, matching through
//!   canonical keys ([`crate::alias::normalize`]);
//! - each matched product with a parseable expiry adds
//!   `max(0, 10 - days_until_expiry)` to the bonus (already-expired
//!   products keep earning, with negative days growing the term);
//! - `score` = the integer truncation of `coverage * 100 + bonus`, truncated
//!   once over the whole sum.
//!
//! Ranking puts recipes with coverage >= 0.7 ahead of the rest, then sorts
//! by score descending; ties keep catalog order. Recipes with no
//! ingredients are never scored or returned.

use std::cmp::Reverse;
use std::collections::HashMap;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::alias::normalize;
use crate::dates::{days_until, parse_app_date};
use crate::db::products::{list_products, Product};
use crate::db::recipes::{get_all_recipes, Recipe, RecipeIngredient};

/// Coverage at or above this fraction ranks a recipe into the top band.
pub const COVERAGE_THRESHOLD: f64 = 0.7;

/// How many inventory rows the engine pulls per evaluation.
const PRODUCT_FETCH_LIMIT: usize = 2000;

/// One ranked recommendation, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub recipe: Recipe,
    /// Fraction of the recipe's ingredients present in inventory, in [0, 1].
    pub coverage: f64,
    pub score: i64,
    /// Ingredient lines covered by the inventory.
    pub have: Vec<RecipeIngredient>,
    /// Ingredient lines that would need to be bought.
    pub missing: Vec<RecipeIngredient>,
}

/// Read-only source of the current inventory snapshot.
pub trait InventoryProvider {
    fn list_products(&self, limit: usize) -> Result<Vec<Product>>;
}

/// Read-only source of the recipe catalog.
pub trait CatalogProvider {
    fn all_recipes(&self) -> Result<Vec<Recipe>>;
}

impl InventoryProvider for rusqlite::Connection {
    fn list_products(&self, limit: usize) -> Result<Vec<Product>> {
        list_products(self, limit)
    }
}

impl CatalogProvider for rusqlite::Connection {
    fn all_recipes(&self) -> Result<Vec<Recipe>> {
        get_all_recipes(self)
    }
}

/// Expiry bonus for one matched product: the closer (or further past) the
/// expiry, the bigger; zero once the expiry is ten or more days away.
fn expiry_bonus(days_until_expiry: i64) -> i64 {
    (10 - days_until_expiry).max(0)
}

/// Rank recipes against today's inventory, best first, at most `top_n`.
pub fn suggest_recipes(
    inventory: &dyn InventoryProvider,
    catalog: &dyn CatalogProvider,
    top_n: usize,
) -> Vec<Suggestion> {
    suggest_recipes_on(inventory, catalog, top_n, Local::now().date_naive())
}

/// Deterministic core of [`suggest_recipes`]: evaluate as of `today`.
pub fn suggest_recipes_on(
    inventory: &dyn InventoryProvider,
    catalog: &dyn CatalogProvider,
    top_n: usize,
    today: NaiveDate,
) -> Vec<Suggestion> {
    // Fail soft: a broken inventory read means an empty fridge, not an error.
    let products = inventory.list_products(PRODUCT_FETCH_LIMIT).unwrap_or_else(|e| {
        warn!("Inventory snapshot unavailable, treating as empty: {:#}", e);
        Vec::new()
    });

    // Canonical key -> product, last write wins when two products share a key.
    let mut have_map: HashMap<String, Product> = HashMap::new();
    for product in products {
        if product.name.trim().is_empty() {
            continue;
        }
        have_map.insert(normalize(&product.name), product);
    }

    // Nothing owned means nothing to rank.
    if have_map.is_empty() {
        return Vec::new();
    }

    let recipes = catalog.all_recipes().unwrap_or_else(|e| {
        warn!("Recipe catalog unavailable, treating as empty: {:#}", e);
        Vec::new()
    });

    let mut out = Vec::new();
    for recipe in recipes {
        if recipe.ingredients.is_empty() {
            debug!("Skipping recipe '{}' with no ingredients", recipe.title);
            continue;
        }

        let mut have = Vec::new();
        let mut missing = Vec::new();
        let mut bonus: i64 = 0;
        for ingredient in &recipe.ingredients {
            let key = normalize(&ingredient.name);
            match have_map.get(&key) {
                Some(product) => {
                    have.push(ingredient.clone());
                    if let Some(date) =
                        product.exp_date.as_deref().and_then(parse_app_date)
                    {
                        bonus += expiry_bonus(days_until(date, today));
                    }
                }
                None => missing.push(ingredient.clone()),
            }
        }

        let coverage = have.len() as f64 / recipe.ingredients.len() as f64;
        // One truncation over the whole sum, not a rounded percentage.
        let score = (coverage * 100.0 + bonus as f64) as i64;
        out.push(Suggestion {
            recipe,
            coverage,
            score,
            have,
            missing,
        });
    }

    // Stable sort keeps catalog order for exact ties.
    out.sort_by_key(|s| (Reverse(s.coverage >= COVERAGE_THRESHOLD), Reverse(s.score)));
    out.truncate(top_n);
    out
}

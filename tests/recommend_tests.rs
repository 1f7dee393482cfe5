//! Recommendation engine tests over the real SQLite collaborators.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

use fridgemate::db::products::{init_products_schema, insert_product, NewProduct};
use fridgemate::db::recipes::{add_recipe, init_recipes_schema, RecipeIngredient};
use fridgemate::recommend::{suggest_recipes_on, COVERAGE_THRESHOLD};

fn setup_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_products_schema(&conn)?;
    init_recipes_schema(&conn)?;
    Ok(conn)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
}

fn add_product(conn: &Connection, name: &str, exp_date: Option<&str>) -> Result<i64> {
    insert_product(
        conn,
        &NewProduct {
            name: name.to_string(),
            category: None,
            exp_date: exp_date.map(|s| s.to_string()),
        },
    )
}

fn ings(names: &[&str]) -> Vec<RecipeIngredient> {
    names
        .iter()
        .map(|name| RecipeIngredient {
            name: name.to_string(),
            qty: None,
            unit: None,
        })
        .collect()
}

#[test]
fn test_ranking_prefers_covered_recipes() -> Result<()> {
    let conn = setup_db()?;

    add_product(&conn, "Яйца", None)?;
    add_product(&conn, "Сыр", None)?;
    add_product(&conn, "Молоко", None)?;

    // Fully stocked.
    add_recipe(&conn, "Омлет с сыром", "", &ings(&["яйца", "сыр", "молоко"]), Some(10), None)?;
    // One of four present.
    add_recipe(
        &conn,
        "Салат греческий",
        "",
        &ings(&["помидоры", "огурец", "сыр фета", "маслины"]),
        Some(12),
        None,
    )?;
    // No ingredients at all, must never appear.
    add_recipe(&conn, "Вода", "", &[], None, None)?;

    let out = suggest_recipes_on(&conn, &conn, 10, today());
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].recipe.title, "Омлет с сыром");
    assert_eq!(out[0].coverage, 1.0);
    assert!(out[0].coverage >= COVERAGE_THRESHOLD);
    assert_eq!(out[1].recipe.title, "Салат греческий");
    assert_eq!(out[1].coverage, 0.25);
    Ok(())
}

#[test]
fn test_expiring_products_boost_their_recipes() -> Result<()> {
    let conn = setup_db()?;

    // Same coverage; the cheese expires today, the milk in a month.
    add_product(&conn, "Сыр", Some("10.09.2025"))?;
    add_product(&conn, "Молоко", Some("10.10.2025"))?;

    add_recipe(&conn, "Молочный суп", "", &ings(&["молоко", "рис"]), None, None)?;
    add_recipe(&conn, "Сырные палочки", "", &ings(&["сыр", "мука"]), None, None)?;

    let out = suggest_recipes_on(&conn, &conn, 10, today());
    assert_eq!(out[0].recipe.title, "Сырные палочки");
    assert_eq!(out[0].score, 60); // trunc(50) + bonus 10
    assert_eq!(out[1].score, 50);
    Ok(())
}

#[test]
fn test_alias_matching_joins_inventory_and_catalog() -> Result<()> {
    let conn = setup_db()?;

    add_product(&conn, "Помидоры", Some("12.09.2025"))?;
    add_product(&conn, "спагетти", None)?;
    add_recipe(&conn, "Паста", "", &ings(&["томат", "макароны"]), Some(20), None)?;

    let out = suggest_recipes_on(&conn, &conn, 10, today());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].coverage, 1.0);
    // Coverage 100 plus the tomato bonus of max(0, 10 - 2).
    assert_eq!(out[0].score, 108);
    assert!(out[0].missing.is_empty());
    Ok(())
}

#[test]
fn test_duplicate_products_follow_snapshot_order() -> Result<()> {
    let conn = setup_db()?;

    // Both normalize to "томаты". The snapshot is newest-first, so the
    // older row is inserted into the key map last and wins.
    add_product(&conn, "томат", Some("10.09.2025"))?;
    add_product(&conn, "Помидоры", None)?;
    add_recipe(&conn, "Соус", "", &ings(&["томаты"]), None, None)?;

    let out = suggest_recipes_on(&conn, &conn, 10, today());
    assert_eq!(out[0].score, 110);
    Ok(())
}

#[test]
fn test_prefix_property_over_real_catalog() -> Result<()> {
    let conn = setup_db()?;

    add_product(&conn, "Яйца", Some("11.09.2025"))?;
    add_product(&conn, "Томаты", None)?;
    fridgemate::db::recipes::seed_demo_if_empty(&conn)?;
    fridgemate::db::recipes::seed_world_recipes(&conn)?;

    let five = suggest_recipes_on(&conn, &conn, 5, today());
    let ten = suggest_recipes_on(&conn, &conn, 10, today());
    assert_eq!(five.len(), 5);
    assert_eq!(five.as_slice(), &ten[..5]);
    Ok(())
}

#[test]
fn test_empty_sides_yield_empty_suggestions() -> Result<()> {
    let conn = setup_db()?;

    // Catalog but no inventory.
    add_recipe(&conn, "Тост", "", &ings(&["хлеб"]), None, None)?;
    assert!(suggest_recipes_on(&conn, &conn, 10, today()).is_empty());

    // Inventory but no catalog.
    let conn = setup_db()?;
    add_product(&conn, "Хлеб", None)?;
    assert!(suggest_recipes_on(&conn, &conn, 10, today()).is_empty());
    Ok(())
}

#[test]
fn test_expired_products_still_count_and_still_boost() -> Result<()> {
    let conn = setup_db()?;

    add_product(&conn, "Молоко", Some("08.09.2025"))?;
    add_recipe(&conn, "Блины", "", &ings(&["молоко"]), None, None)?;

    let out = suggest_recipes_on(&conn, &conn, 10, today());
    // Two days past expiry: bonus 10 - (-2) = 12.
    assert_eq!(out[0].score, 112);
    Ok(())
}

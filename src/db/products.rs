use anyhow::{Context, Result};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

/// A stored inventory product. Expiry travels as `DD.MM.YYYY` text and may
/// be absent or unparseable; the recommendation engine treats both as
/// "unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub exp_date: Option<String>,
}

/// Insertion payload; ids are storage-assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: Option<String>,
    pub exp_date: Option<String>,
}

/// Initialize the products table
pub fn init_products_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category TEXT,
            exp_date TEXT
        )",
        [],
    )
    .context("Failed to create products table")?;
    Ok(())
}

/// Insert a product and return its new id
pub fn insert_product(conn: &Connection, product: &NewProduct) -> Result<i64> {
    conn.execute(
        "INSERT INTO products (name, category, exp_date) VALUES (?1, ?2, ?3)",
        params![product.name, product.category, product.exp_date],
    )
    .context("Failed to insert product")?;

    let product_id = conn.last_insert_rowid();
    info!("Product '{}' inserted with ID: {}", product.name, product_id);
    Ok(product_id)
}

/// List products, most recently added first
pub fn list_products(conn: &Connection, limit: usize) -> Result<Vec<Product>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, category, exp_date FROM products
             ORDER BY id DESC LIMIT ?1",
        )
        .context("Failed to prepare product listing")?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok(Product {
                id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
                exp_date: row.get(3)?,
            })
        })
        .context("Failed to list products")?;

    let mut products = Vec::new();
    for row in rows {
        products.push(row.context("Failed to read product row")?);
    }
    Ok(products)
}

/// Fetch a single product by id
pub fn get_product(conn: &Connection, product_id: i64) -> Result<Option<Product>> {
    conn.query_row(
        "SELECT id, name, category, exp_date FROM products WHERE id = ?1",
        params![product_id],
        |row| {
            Ok(Product {
                id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
                exp_date: row.get(3)?,
            })
        },
    )
    .optional()
    .context("Failed to read product")
}

/// Delete a product by id, returning whether a row was removed
pub fn delete_product(conn: &Connection, product_id: i64) -> Result<bool> {
    let rows_affected = conn
        .execute("DELETE FROM products WHERE id = ?1", params![product_id])
        .context("Failed to delete product")?;

    if rows_affected > 0 {
        info!("Product deleted with ID: {}", product_id);
        Ok(true)
    } else {
        info!("No product found with ID: {}", product_id);
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_db() -> Result<Connection> {
        let conn = Connection::open_in_memory()?;
        init_products_schema(&conn)?;
        Ok(conn)
    }

    fn sample(name: &str, exp: Option<&str>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: Some("Овощи".to_string()),
            exp_date: exp.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_insert_and_get_product() -> Result<()> {
        let conn = setup_test_db()?;

        let id = insert_product(&conn, &sample("Томаты", Some("18.09.2025")))?;
        assert!(id > 0);

        let product = get_product(&conn, id)?.unwrap();
        assert_eq!(product.name, "Томаты");
        assert_eq!(product.exp_date.as_deref(), Some("18.09.2025"));
        Ok(())
    }

    #[test]
    fn test_list_products_most_recent_first() -> Result<()> {
        let conn = setup_test_db()?;

        let first = insert_product(&conn, &sample("Молоко", None))?;
        let second = insert_product(&conn, &sample("Сыр", None))?;

        let products = list_products(&conn, 100)?;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, second);
        assert_eq!(products[1].id, first);
        Ok(())
    }

    #[test]
    fn test_list_products_respects_limit() -> Result<()> {
        let conn = setup_test_db()?;

        for i in 0..5 {
            insert_product(&conn, &sample(&format!("Продукт {}", i), None))?;
        }

        assert_eq!(list_products(&conn, 3)?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_nullable_fields_round_trip() -> Result<()> {
        let conn = setup_test_db()?;

        let id = insert_product(
            &conn,
            &NewProduct {
                name: "Соль".to_string(),
                category: None,
                exp_date: None,
            },
        )?;

        let product = get_product(&conn, id)?.unwrap();
        assert_eq!(product.category, None);
        assert_eq!(product.exp_date, None);
        Ok(())
    }

    #[test]
    fn test_delete_product() -> Result<()> {
        let conn = setup_test_db()?;

        let id = insert_product(&conn, &sample("Огурец", None))?;
        assert!(delete_product(&conn, id)?);
        assert!(get_product(&conn, id)?.is_none());

        // Second deletion of the same id is a no-op.
        assert!(!delete_product(&conn, id)?);
        Ok(())
    }

    #[test]
    fn test_delete_nonexistent_product() -> Result<()> {
        let conn = setup_test_db()?;
        assert!(!delete_product(&conn, 99999)?);
        Ok(())
    }
}

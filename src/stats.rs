//! Inventory statistics for the dashboard: the total product count, how
//! many have already expired, and a short "use these first" list of
//! products expiring within the next few days.

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::dates::parse_app_date;
use crate::db::products::list_products;

/// Window, in days from today, within which a product counts as soon-expiring.
pub const SOON_WINDOW_DAYS: i64 = 3;

/// At most this many entries in the soon-expiring list.
pub const SOON_LIST_CAP: usize = 6;

/// Placeholder text when nothing expires within the window.
pub const NO_EXPIRING_PLACEHOLDER: &str = "Нет товаров с истекающим сроком";

/// How many inventory rows the snapshot pulls per evaluation.
const PRODUCT_FETCH_LIMIT: usize = 2000;

/// One soon-expiring product as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoonItem {
    pub name: String,
    pub exp_date: String,
}

impl SoonItem {
    /// Dashboard row text, e.g. `Молоко — до 12.09.2025`.
    pub fn label(&self) -> String {
        format!("{} — до {}", self.name, self.exp_date)
    }
}

/// Dashboard snapshot of the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryStats {
    /// Every stored product, parseable expiry or not.
    pub total: usize,
    /// Products whose expiry is strictly before today.
    pub expired: usize,
    /// Products expiring between today and [`SOON_WINDOW_DAYS`] days out,
    /// soonest first, at most [`SOON_LIST_CAP`] entries.
    pub soon: Vec<SoonItem>,
}

/// Compute today's inventory statistics.
pub fn inventory_stats(conn: &Connection) -> Result<InventoryStats> {
    inventory_stats_on(conn, Local::now().date_naive())
}

/// Deterministic core of [`inventory_stats`]: evaluate as of `today`.
pub fn inventory_stats_on(conn: &Connection, today: NaiveDate) -> Result<InventoryStats> {
    let products = list_products(conn, PRODUCT_FETCH_LIMIT)?;
    let soon_limit = today + Duration::days(SOON_WINDOW_DAYS);

    let total = products.len();
    let mut expired = 0;
    let mut soon: Vec<(NaiveDate, SoonItem)> = Vec::new();
    for product in &products {
        // Products without a parseable expiry count toward the total only.
        let Some(raw) = product.exp_date.as_deref() else {
            continue;
        };
        let Some(date) = parse_app_date(raw) else {
            continue;
        };
        if date < today {
            expired += 1;
        } else if date <= soon_limit {
            let name = if product.name.is_empty() {
                "—".to_string()
            } else {
                product.name.clone()
            };
            soon.push((
                date,
                SoonItem {
                    name,
                    exp_date: raw.to_string(),
                },
            ));
        }
    }

    // Soonest first; stable sort keeps snapshot order for same-day expiries.
    soon.sort_by_key(|(date, _)| *date);
    soon.truncate(SOON_LIST_CAP);

    Ok(InventoryStats {
        total,
        expired,
        soon: soon.into_iter().map(|(_, item)| item).collect(),
    })
}

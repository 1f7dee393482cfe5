//! View controllers for the search, recipe-browsing and form pages.
//!
//! These hold the non-visual state of each page: the pager, the active
//! filter, and the storage handles. Rendering happens elsewhere; every
//! mutation returns the data a renderer needs (page slices, pager labels,
//! [`Notice`] toast texts).
//!
//! Deletion and insertion follow an explicit optimistic-UI policy carried
//! in the controller config: storage failures on those paths are logged and
//! the user still sees the success notice. Validation failures, by
//! contrast, reject the submission outright with no partial write.

use anyhow::Result;
use log::warn;
use rusqlite::Connection;

use crate::dates::is_valid_app_date;
use crate::db::products::{
    delete_product, init_products_schema, insert_product, list_products, NewProduct, Product,
};
use crate::db::profile::{insert_profile, NewProfile};
use crate::db::recipes::{
    init_recipes_schema, seed_demo_if_empty, seed_more_world_recipes, seed_world_recipes,
};
use crate::pager::Pager;
use crate::recommend::{suggest_recipes, Suggestion};

/// User-facing transient notification text.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Behaviour knobs of the product search view.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Products per page.
    pub page_size: usize,
    /// How many rows to pull from storage per refresh.
    pub fetch_limit: usize,
    /// Optimistic UI: swallow storage errors on delete/insert, log them,
    /// and still report success to the user.
    pub optimistic_writes: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            fetch_limit: 500,
            optimistic_writes: true,
        }
    }
}

/// Placeholder card text for an empty search result page.
pub const NO_RESULTS_PLACEHOLDER: &str = "Ничего не найдено";

/// Controller behind the product search page: substring filtering,
/// pagination and deletion over the inventory store.
pub struct SearchController<'c> {
    conn: &'c Connection,
    pager: Pager<Product>,
    config: SearchConfig,
}

impl<'c> SearchController<'c> {
    pub fn new(conn: &'c Connection, config: SearchConfig) -> Result<Self> {
        init_products_schema(conn)?;
        let mut controller = Self {
            conn,
            pager: Pager::new(config.page_size),
            config,
        };
        controller.refresh()?;
        Ok(controller)
    }

    /// Re-read the inventory so added/deleted rows become visible.
    pub fn refresh(&mut self) -> Result<()> {
        let products = list_products(self.conn, self.config.fetch_limit)?;
        self.pager.set_items(products);
        Ok(())
    }

    /// Install the search query: case-insensitive substring over name,
    /// category and expiry text, OR-combined. Resets to the first page.
    pub fn set_query(&mut self, query: &str) {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            self.pager.set_filter(None);
        } else {
            self.pager.set_filter(Some(Box::new(move |p: &Product| {
                p.name.to_lowercase().contains(&q)
                    || p.category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&q))
                    || p.exp_date
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&q))
            })));
        }
    }

    /// Delete a product and re-render. Under the optimistic policy the
    /// notice reports success even when storage failed or the id was
    /// already gone; the failure is only logged.
    pub fn delete_product(&mut self, product_id: i64) -> Result<Notice> {
        match delete_product(self.conn, product_id) {
            Ok(true) => {}
            Ok(false) => warn!("Delete of missing product {} reported as success", product_id),
            Err(e) => {
                if self.config.optimistic_writes {
                    warn!("Product {} delete failed, reporting success anyway: {:#}", product_id, e);
                } else {
                    return Err(e);
                }
            }
        }

        // Step back if that was the last item of a non-first page.
        self.pager.note_removed();
        self.refresh()?;
        Ok(Notice::new("Удалено"))
    }

    pub fn page_items(&self) -> Vec<&Product> {
        self.pager.page_items()
    }

    pub fn label(&self) -> String {
        self.pager.label()
    }

    pub fn page_index(&self) -> usize {
        self.pager.page_index()
    }

    pub fn has_prev(&self) -> bool {
        self.pager.has_prev()
    }

    pub fn has_next(&self) -> bool {
        self.pager.has_next()
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev_page()
    }

    /// Placeholder for the empty filtered set, `None` when there are rows.
    pub fn placeholder(&self) -> Option<&'static str> {
        if self.pager.filtered().is_empty() {
            Some(NO_RESULTS_PLACEHOLDER)
        } else {
            None
        }
    }
}

/// Add-product form input, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub exp_date: String,
}

impl ProductForm {
    /// Validate the submission; a rejected form writes nothing.
    pub fn validate(&self) -> std::result::Result<NewProduct, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Укажи название");
        }
        let exp_date = self.exp_date.trim();
        if !is_valid_app_date(exp_date) {
            return Err("Дата: ДД.ММ.ГГГГ");
        }
        let category = self.category.trim();
        Ok(NewProduct {
            name: name.to_string(),
            category: (!category.is_empty()).then(|| category.to_string()),
            exp_date: Some(exp_date.to_string()),
        })
    }
}

/// Validate and save a product. Validation errors come back as the
/// user-facing rejection text; storage errors follow the optimistic policy.
pub fn save_product(
    conn: &Connection,
    form: &ProductForm,
    config: &SearchConfig,
) -> Result<std::result::Result<Notice, &'static str>> {
    let product = match form.validate() {
        Ok(product) => product,
        Err(msg) => return Ok(Err(msg)),
    };

    match insert_product(conn, &product) {
        Ok(id) => Ok(Ok(Notice::new(format!("Продукт сохранён (id={})", id)))),
        Err(e) if config.optimistic_writes => {
            warn!("Product insert failed, reporting success anyway: {:#}", e);
            Ok(Ok(Notice::new("Данные сохранены")))
        }
        Err(e) => Err(e),
    }
}

/// Placeholder card text when no recipe qualifies.
pub const NO_RECIPES_PLACEHOLDER: &str =
    "Пока нет подходящих рецептов. Добавь продукты или рецепты.";

/// Controller behind the recipe browser: ranked suggestions in pages of 3.
pub struct RecipeBrowser<'c> {
    conn: &'c Connection,
    pager: Pager<Suggestion>,
    top_n: usize,
}

impl<'c> RecipeBrowser<'c> {
    pub const PAGE_SIZE: usize = 3;
    pub const TOP_N: usize = 100;

    /// Open the browser over a database, seeding the built-in catalog on
    /// first use, and compute the initial ranking.
    pub fn new(conn: &'c Connection) -> Result<Self> {
        init_products_schema(conn)?;
        init_recipes_schema(conn)?;
        seed_demo_if_empty(conn)?;
        seed_world_recipes(conn)?;
        seed_more_world_recipes(conn)?;

        let mut browser = Self {
            conn,
            pager: Pager::new(Self::PAGE_SIZE),
            top_n: Self::TOP_N,
        };
        browser.refresh();
        Ok(browser)
    }

    /// Recompute the ranking against the current inventory snapshot.
    pub fn refresh(&mut self) {
        let items = suggest_recipes(self.conn, self.conn, self.top_n);
        self.pager.set_items(items);
    }

    pub fn page_items(&self) -> Vec<&Suggestion> {
        self.pager.page_items()
    }

    pub fn label(&self) -> String {
        self.pager.label()
    }

    pub fn has_prev(&self) -> bool {
        self.pager.has_prev()
    }

    pub fn has_next(&self) -> bool {
        self.pager.has_next()
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev_page()
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        if self.pager.filtered().is_empty() {
            Some(NO_RECIPES_PLACEHOLDER)
        } else {
            None
        }
    }
}

/// Profile form input, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub gender: String,
    pub birth: String,
    pub height_cm: String,
    pub weight_kg: String,
}

/// Lenient float parsing for the height/weight fields: comma accepted as
/// the decimal separator, anything unparseable treated as not entered.
fn to_float(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.replace(',', ".").parse().ok()
}

impl ProfileForm {
    pub fn validate(&self) -> std::result::Result<NewProfile, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Укажи имя");
        }
        let birth = self.birth.trim();
        if !birth.is_empty() && !is_valid_app_date(birth) {
            return Err("Некорректная дата (ДД.ММ.ГГГГ)");
        }
        let gender = match self.gender.trim() {
            g @ ("m" | "f") => Some(g.to_string()),
            _ => None,
        };
        Ok(NewProfile {
            name: name.to_string(),
            gender,
            birth: (!birth.is_empty()).then(|| birth.to_string()),
            height_cm: to_float(&self.height_cm),
            weight_kg: to_float(&self.weight_kg),
        })
    }
}

/// Validate and save a profile row. Validation errors come back as the
/// user-facing rejection text; storage errors follow the optimistic policy.
pub fn save_profile(
    conn: &Connection,
    form: &ProfileForm,
    config: &SearchConfig,
) -> Result<std::result::Result<Notice, &'static str>> {
    let profile = match form.validate() {
        Ok(profile) => profile,
        Err(msg) => return Ok(Err(msg)),
    };

    match insert_profile(conn, &profile) {
        Ok(id) => Ok(Ok(Notice::new(format!("Профиль сохранён (id={})", id)))),
        Err(e) if config.optimistic_writes => {
            warn!("Profile insert failed, reporting success anyway: {:#}", e);
            Ok(Ok(Notice::new("Данные сохранены")))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_form_requires_name_and_date() {
        let empty = ProductForm::default();
        assert_eq!(empty.validate(), Err("Укажи название"));

        let bad_date = ProductForm {
            name: "Молоко".to_string(),
            exp_date: "завтра".to_string(),
            ..Default::default()
        };
        assert_eq!(bad_date.validate(), Err("Дата: ДД.ММ.ГГГГ"));
    }

    #[test]
    fn test_product_form_trims_and_drops_empty_category() {
        let form = ProductForm {
            name: "  Молоко ".to_string(),
            category: "".to_string(),
            exp_date: " 01.10.2025 ".to_string(),
        };
        let product = form.validate().unwrap();
        assert_eq!(product.name, "Молоко");
        assert_eq!(product.category, None);
        assert_eq!(product.exp_date.as_deref(), Some("01.10.2025"));
    }

    #[test]
    fn test_profile_form_accepts_comma_decimals() {
        let form = ProfileForm {
            name: "Аня".to_string(),
            gender: "f".to_string(),
            birth: "01.02.1990".to_string(),
            height_cm: "168,5".to_string(),
            weight_kg: "не скажу".to_string(),
        };
        let profile = form.validate().unwrap();
        assert_eq!(profile.height_cm, Some(168.5));
        assert_eq!(profile.weight_kg, None);
        assert_eq!(profile.gender.as_deref(), Some("f"));
    }

    #[test]
    fn test_profile_form_rejects_bad_birth_date() {
        let form = ProfileForm {
            name: "Аня".to_string(),
            birth: "1990-02-01".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err("Некорректная дата (ДД.ММ.ГГГГ)"));
    }

    #[test]
    fn test_profile_form_empty_birth_is_fine() {
        let form = ProfileForm {
            name: "Аня".to_string(),
            ..Default::default()
        };
        let profile = form.validate().unwrap();
        assert_eq!(profile.birth, None);
        assert_eq!(profile.gender, None);
    }
}

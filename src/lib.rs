//! # FridgeMate
//!
//! Inventory-and-recipe-suggestion application core: users record food
//! items with expiry dates, browse and delete them, and get recipe
//! suggestions ranked by how much of each recipe their current inventory
//! covers, with a boost for using up products that expire soon.

pub mod alias;
pub mod controller;
pub mod dates;
pub mod db;
pub mod pager;
pub mod recommend;
pub mod stats;

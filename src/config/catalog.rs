//! Catalog seed configuration loading from catalog.toml
//!
//! This module provides functionality to load the initial catalog dataset
//! from a TOML configuration file. The categories and products defined there
//! are used to seed the database on first run or when rows are missing.

use crate::entities::product::Unit;
use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Categories to seed, referenced by products via slug
    pub categories: Vec<CategoryConfig>,
    /// Products to seed
    pub products: Vec<ProductConfig>,
}

/// Configuration for a single category
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Display name of the category
    pub name: String,
    /// URL-stable identifier
    pub slug: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Configuration for a single product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Display name of the product
    pub name: String,
    /// URL-stable identifier
    pub slug: String,
    /// Slug of the category this product belongs to
    pub category: String,
    /// Free-text description
    pub description: String,
    /// Price per unit
    pub price: Decimal,
    /// Unit of sale (`kg`, `g`, `piece`, `bundle`, `pack`)
    pub unit: Unit,
    /// Advisory stock level
    #[serde(default)]
    pub stock_quantity: i32,
    /// Whether the product is promoted on the home page
    #[serde(default)]
    pub is_featured: bool,
    /// Optional region of origin
    #[serde(default)]
    pub origin: Option<String>,
}

/// Loads the catalog configuration from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog.toml: {e}"),
    })
}

/// Loads the catalog configuration from the default location (./catalog.toml)
pub fn load_default_config() -> Result<CatalogConfig> {
    load_config("catalog.toml")
}

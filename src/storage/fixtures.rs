//! Loading canned product rows for the mock server

use crate::core::error::ConfigError;
use crate::core::product::{PRODUCTS_ENTITY_SET, Product};
use serde::Deserialize;
use std::path::Path;

const GENERATED_CATEGORIES: [&str; 7] = [
    "Dairy",
    "Beverages",
    "Grains",
    "Proteins",
    "Produce",
    "Snacks",
    "Condiments",
];

/// Fixture files are either a bare array or an OData envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Rows(Vec<Product>),
    Envelope { d: Envelope },
}

#[derive(Deserialize)]
struct Envelope {
    results: Vec<Product>,
}

/// Path of the fixture file for the products entity set
pub fn products_fixture_path(mockdata_dir: &Path) -> std::path::PathBuf {
    mockdata_dir.join(format!("{}.json", PRODUCTS_ENTITY_SET))
}

/// Parse fixture rows from JSON text
pub fn parse_products(json: &str, origin: &str) -> Result<Vec<Product>, ConfigError> {
    let file: FixtureFile = serde_json::from_str(json).map_err(|e| ConfigError::FixtureLoad {
        path: origin.to_string(),
        message: e.to_string(),
    })?;
    Ok(match file {
        FixtureFile::Rows(rows) => rows,
        FixtureFile::Envelope { d } => d.results,
    })
}

/// Load `Products.json` from `mockdata_dir`
///
/// A missing file yields `Ok(None)` so the caller can decide whether to
/// generate rows instead. An unreadable or malformed file is an error.
pub fn load_products(mockdata_dir: &Path) -> Result<Option<Vec<Product>>, ConfigError> {
    let path = products_fixture_path(mockdata_dir);
    let origin = path.display().to_string();
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_products(&content, &origin).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::FixtureLoad {
            path: origin,
            message: e.to_string(),
        }),
    }
}

/// Placeholder rows for when no fixture file exists
pub fn generate_products(count: usize) -> Vec<Product> {
    (1..=count)
        .map(|i| {
            let mut product = Product::new(i as i64, format!("Name {}", i));
            product.description = format!("Description {}", i);
            product.category = GENERATED_CATEGORIES[(i - 1) % GENERATED_CATEGORIES.len()].to_string();
            product.supplier = format!("Supplier {}", (i - 1) % 3 + 1);
            product.stock = ((i % 4) * 7) as u32;
            product.available = i % 2 == 1;
            product
        })
        .collect()
}

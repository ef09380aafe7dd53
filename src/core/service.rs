//! Service trait for product data

use crate::core::error::Result;
use crate::core::product::Product;
use async_trait::async_trait;

/// Service trait for the `Products` entity set
///
/// The mock data server talks to products only through this trait, so a
/// fixture-backed store and any other backend are interchangeable.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// List all products in insertion order
    async fn list(&self) -> Result<Vec<Product>>;

    /// Get a product by its key
    async fn get(&self, id: i64) -> Result<Option<Product>>;

    /// Create a new product; fails if the key is taken
    async fn create(&self, product: Product) -> Result<Product>;
}

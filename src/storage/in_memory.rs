//! In-memory implementation of ProductService for the mock server and tests

use crate::core::error::{EntityError, Result, WorklistError};
use crate::core::product::{PRODUCTS_ENTITY_SET, Product};
use crate::core::service::ProductService;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// In-memory product service
///
/// Rows keep their insertion order, which is the order fixtures list them in.
/// Uses RwLock for thread-safe access from concurrent handlers.
#[derive(Clone, Default)]
pub struct InMemoryProductService {
    products: Arc<RwLock<IndexMap<i64, Product>>>,
}

fn lock_error(e: impl std::fmt::Display) -> WorklistError {
    WorklistError::Internal(format!("Failed to acquire product lock: {}", e))
}

impl InMemoryProductService {
    /// Create an empty service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service seeded with `products`; later duplicates win
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            products: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert a new product, rejecting a taken key
    pub fn insert(&self, product: Product) -> Result<Product> {
        let mut products = self.products.write().map_err(lock_error)?;

        if products.contains_key(&product.id) {
            return Err(EntityError::AlreadyExists {
                entity_set: PRODUCTS_ENTITY_SET.to_string(),
                id: product.id,
            }
            .into());
        }
        products.insert(product.id, product.clone());

        Ok(product)
    }

    pub fn find(&self, id: i64) -> Result<Option<Product>> {
        let products = self.products.read().map_err(lock_error)?;
        Ok(products.get(&id).cloned())
    }

    /// All products in insertion order
    pub fn snapshot(&self) -> Result<Vec<Product>> {
        let products = self.products.read().map_err(lock_error)?;
        Ok(products.values().cloned().collect())
    }

    pub fn len(&self) -> Result<usize> {
        let products = self.products.read().map_err(lock_error)?;
        Ok(products.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl ProductService for InMemoryProductService {
    async fn list(&self) -> Result<Vec<Product>> {
        let products = self.products.read().map_err(lock_error)?;
        Ok(products.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Product>> {
        self.find(id)
    }

    async fn create(&self, product: Product) -> Result<Product> {
        self.insert(product)
    }
}

//! Product storage and fixture loading

pub mod fixtures;
pub mod in_memory;

pub use fixtures::{generate_products, load_products};
pub use in_memory::InMemoryProductService;

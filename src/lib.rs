//! # Worklist
//!
//! View-controller logic of a product worklist plus a mock data service to run
//! it against.
//!
//! ## Features
//!
//! - **Composable Filters**: search, category, stock level and availability
//!   filters managed in independent slots and AND-ed into one query filter
//! - **Grouping**: rows grouped by category, supplier or stock status
//! - **Formatters**: stock status texts, value states, icons and unit numbers
//! - **Entry Creation**: draft products submitted or discarded as a unit
//! - **Mock Server**: OData v2 style JSON service backed by fixture files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use worklist::prelude::*;
//!
//! let service = Arc::new(InMemoryProductService::with_products(rows));
//! let mut worklist = WorklistController::new(
//!     ResourceBundle::english(),
//!     InMemoryListBinding::new(service.clone()),
//!     StoreEntryModel::new(service),
//!     RecordingHost::new(),
//!     "http://localhost:8080/index.html",
//! );
//!
//! worklist.on_category_filter(Some("Dairy"));
//! worklist.on_stock_filter(Some("lowStock"));
//! worklist.on_group_dialog_confirm(Some("Supplier"), false);
//! ```

pub mod config;
pub mod controller;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        binding::{InMemoryListBinding, ListBinding, UpdateFinished},
        error::{ConfigError, EntityError, RequestError, WorklistError},
        field::{FieldValue, ProductField},
        filter::{CompositeFilter, FilterCoordinator, FilterCriterion, FilterMode, RangeBound},
        formatter,
        group::{GroupDirective, GroupField, GroupingSelector, Sorter},
        i18n::ResourceBundle,
        model::{EntryContext, EntryModel, Properties, StoreEntryModel},
        product::Product,
        service::ProductService,
        stock::{StockBucket, ValueState},
    };

    // === Controller ===
    pub use crate::controller::{
        HostAction, RecordingHost, ViewHost, WorklistController, WorklistViewModel,
    };

    // === Storage ===
    pub use crate::storage::InMemoryProductService;

    // === Config ===
    pub use crate::config::{Manifest, MockServerConfig};

    // === Server ===
    pub use crate::server::{MockServerBuilder, MockServerHost};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}

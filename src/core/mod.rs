//! Core module containing the product model, filtering, grouping and formatting

pub mod binding;
pub mod error;
pub mod field;
pub mod filter;
pub mod formatter;
pub mod group;
pub mod i18n;
pub mod model;
pub mod product;
pub mod service;
pub mod stock;

pub use binding::{InMemoryListBinding, ListBinding, RowSource, UpdateFinished};
pub use error::{ConfigError, EntityError, ErrorResponse, RequestError, WorklistError};
pub use field::{FieldValue, ProductField};
pub use filter::{CompositeFilter, FilterCoordinator, FilterCriterion, FilterMode, FilterSlot};
pub use group::{GroupDirective, GroupField, GroupingSelector, Sorter};
pub use i18n::ResourceBundle;
pub use model::{EntryContext, EntryModel, Properties, StoreEntryModel};
pub use product::Product;
pub use service::ProductService;
pub use stock::{StockBucket, ValueState};

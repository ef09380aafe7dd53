//! Draft entries and their submission
//!
//! The create dialog edits a draft entry held by an [`EntryModel`]. Nothing
//! reaches the product store until [`EntryModel::submit_changes`] runs, and
//! [`EntryModel::reset_changes`] discards drafts without side effects.

use crate::core::error::{EntityError, Result};
use crate::core::field::{FieldValue, ProductField};
use crate::core::product::{PRODUCTS_ENTITY_SET, Product};
use crate::storage::InMemoryProductService;
use indexmap::IndexMap;
use std::sync::Arc;

/// Property values of a draft entry
pub type Properties = IndexMap<ProductField, FieldValue>;

/// Handle to a draft entry, bound to the dialog editing it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryContext {
    pub path: String,
}

/// Model holding draft entries until they are submitted
pub trait EntryModel {
    /// Start a draft in the entity set at `path` (e.g. `/Products`)
    fn create_entry(&mut self, path: &str, properties: Properties) -> EntryContext;

    fn property(&self, context: &EntryContext, field: ProductField) -> Option<&FieldValue>;

    fn set_property(
        &mut self,
        context: &EntryContext,
        field: ProductField,
        value: FieldValue,
    ) -> Result<()>;

    fn has_pending_changes(&self) -> bool;

    /// Submit all drafts
    ///
    /// Returns the created rows, or the first failure. Failed drafts stay
    /// pending so they can be corrected or reset.
    fn submit_changes(&mut self) -> Result<Vec<Product>>;

    /// Discard all drafts
    fn reset_changes(&mut self);
}

#[derive(Debug, Clone)]
struct PendingEntry {
    entity_set: String,
    properties: Properties,
}

/// Entry model that submits into an [`InMemoryProductService`]
pub struct StoreEntryModel {
    service: Arc<InMemoryProductService>,
    pending: IndexMap<String, PendingEntry>,
    next_draft: usize,
}

impl StoreEntryModel {
    pub fn new(service: Arc<InMemoryProductService>) -> Self {
        Self {
            service,
            pending: IndexMap::new(),
            next_draft: 0,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn entry_mut(&mut self, context: &EntryContext) -> Result<&mut PendingEntry> {
        self.pending.get_mut(&context.path).ok_or_else(|| {
            EntityError::NoPendingEntry {
                path: context.path.clone(),
            }
            .into()
        })
    }

    fn submit_one(&self, entry: &PendingEntry) -> Result<Product> {
        if entry.entity_set != PRODUCTS_ENTITY_SET {
            return Err(EntityError::SubmitFailed {
                entity_set: entry.entity_set.clone(),
                message: "unknown entity set".to_string(),
            }
            .into());
        }
        let product = Product::from_properties(&entry.properties)?;
        self.service.insert(product)
    }
}

impl EntryModel for StoreEntryModel {
    fn create_entry(&mut self, path: &str, properties: Properties) -> EntryContext {
        let entity_set = path.trim_matches('/').to_string();
        self.next_draft += 1;
        let context = EntryContext {
            path: format!("/{}('draft-{}')", entity_set, self.next_draft),
        };
        self.pending.insert(
            context.path.clone(),
            PendingEntry {
                entity_set,
                properties,
            },
        );
        context
    }

    fn property(&self, context: &EntryContext, field: ProductField) -> Option<&FieldValue> {
        self.pending
            .get(&context.path)
            .and_then(|entry| entry.properties.get(&field))
    }

    fn set_property(
        &mut self,
        context: &EntryContext,
        field: ProductField,
        value: FieldValue,
    ) -> Result<()> {
        self.entry_mut(context)?.properties.insert(field, value);
        Ok(())
    }

    fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    fn submit_changes(&mut self) -> Result<Vec<Product>> {
        let mut created = Vec::new();
        let mut first_error = None;

        for (path, entry) in std::mem::take(&mut self.pending) {
            match self.submit_one(&entry) {
                Ok(product) => created.push(product),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "draft entry rejected");
                    self.pending.insert(path, entry);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                tracing::info!(created = created.len(), "submitted draft entries");
                Ok(created)
            }
        }
    }

    fn reset_changes(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(discarded = self.pending.len(), "reset draft entries");
        }
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::WorklistError;

    fn draft(id: i64) -> Properties {
        let mut properties = Properties::new();
        properties.insert(ProductField::Id, FieldValue::Integer(id));
        properties
    }

    #[test]
    fn test_submit_creates_product() {
        let service = Arc::new(InMemoryProductService::new());
        let mut model = StoreEntryModel::new(service.clone());

        let context = model.create_entry("/Products", draft(10));
        model
            .set_property(&context, ProductField::Name, FieldValue::from("Kefir"))
            .unwrap();
        assert!(model.has_pending_changes());

        let created = model.submit_changes().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(service.find(10).unwrap().unwrap().name, "Kefir");
        assert!(!model.has_pending_changes());
    }

    #[test]
    fn test_invalid_draft_stays_pending() {
        let service = Arc::new(InMemoryProductService::new());
        let mut model = StoreEntryModel::new(service.clone());
        let context = model.create_entry("/Products", draft(11));

        let err = model.submit_changes().unwrap_err();
        assert!(matches!(
            err,
            WorklistError::Entity(EntityError::MissingProperty { .. })
        ));
        assert_eq!(model.pending_count(), 1);
        assert!(service.is_empty().unwrap());

        model
            .set_property(&context, ProductField::Name, FieldValue::from("Ghee"))
            .unwrap();
        assert!(model.submit_changes().is_ok());
    }

    #[test]
    fn test_duplicate_key_is_reported() {
        let service = Arc::new(InMemoryProductService::with_products([Product::new(5, "Tea")]));
        let mut model = StoreEntryModel::new(service);
        let context = model.create_entry("/Products", draft(5));
        model
            .set_property(&context, ProductField::Name, FieldValue::from("Coffee"))
            .unwrap();

        let err = model.submit_changes().unwrap_err();
        assert_eq!(err.error_code(), "ENTITY_ALREADY_EXISTS");
    }

    #[test]
    fn test_reset_discards_drafts() {
        let service = Arc::new(InMemoryProductService::new());
        let mut model = StoreEntryModel::new(service.clone());
        let context = model.create_entry("/Products", draft(12));
        model.reset_changes();

        assert!(!model.has_pending_changes());
        assert!(model.property(&context, ProductField::Id).is_none());
        assert!(
            model
                .set_property(&context, ProductField::Name, FieldValue::from("x"))
                .is_err()
        );
        assert!(model.submit_changes().unwrap().is_empty());
        assert!(service.is_empty().unwrap());
    }

    #[test]
    fn test_unknown_entity_set_fails() {
        let service = Arc::new(InMemoryProductService::new());
        let mut model = StoreEntryModel::new(service);
        model.create_entry("/Orders", draft(1));
        assert!(model.submit_changes().is_err());
    }
}

//! Filter criteria and their composition into one query filter
//!
//! Each filter control of the worklist owns a [`FilterSlot`]. A slot holds the
//! criteria that control currently contributes; [`FilterState::apply_all`]
//! concatenates every non-empty slot into a [`CompositeFilter`] whose entries
//! are AND-ed together. The only OR inside a composite is the one within a
//! [`FilterCriterion::TextMatch`].

use crate::core::field::{FieldValue, ProductField};
use crate::core::product::Product;
use crate::core::stock::{LOW_STOCK_LIMIT, StockBucket};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One end of a range predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBound {
    pub value: FieldValue,
    #[serde(default)]
    pub inclusive: bool,
}

impl RangeBound {
    pub fn inclusive(value: impl Into<FieldValue>) -> Self {
        Self {
            value: value.into(),
            inclusive: true,
        }
    }

    pub fn exclusive(value: impl Into<FieldValue>) -> Self {
        Self {
            value: value.into(),
            inclusive: false,
        }
    }
}

/// A predicate over product fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterCriterion {
    /// Case-insensitive "contains" on any of `fields`
    TextMatch {
        fields: Vec<ProductField>,
        query: String,
    },

    /// Field equals value
    EqualityMatch {
        field: ProductField,
        value: FieldValue,
    },

    /// Field lies within the given bounds; a missing bound is unbounded
    RangeMatch {
        field: ProductField,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lower: Option<RangeBound>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upper: Option<RangeBound>,
    },
}

impl FilterCriterion {
    pub fn text(fields: impl Into<Vec<ProductField>>, query: impl Into<String>) -> Self {
        FilterCriterion::TextMatch {
            fields: fields.into(),
            query: query.into(),
        }
    }

    pub fn equals(field: ProductField, value: impl Into<FieldValue>) -> Self {
        FilterCriterion::EqualityMatch {
            field,
            value: value.into(),
        }
    }

    pub fn range(field: ProductField, lower: Option<RangeBound>, upper: Option<RangeBound>) -> Self {
        FilterCriterion::RangeMatch { field, lower, upper }
    }

    /// The criterion selecting every product of a stock bucket
    pub fn stock_bucket(bucket: StockBucket) -> Self {
        match bucket {
            StockBucket::OutOfStock => Self::equals(ProductField::Stock, 0u32),
            StockBucket::LowStock => Self::range(
                ProductField::Stock,
                Some(RangeBound::exclusive(0u32)),
                Some(RangeBound::inclusive(LOW_STOCK_LIMIT)),
            ),
            StockBucket::InStock => Self::range(
                ProductField::Stock,
                Some(RangeBound::exclusive(LOW_STOCK_LIMIT)),
                None,
            ),
        }
    }

    /// Evaluate against a product
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            FilterCriterion::TextMatch { fields, query } => fields
                .iter()
                .any(|field| product.value(*field).contains_ignore_case(query)),
            FilterCriterion::EqualityMatch { field, value } => {
                product.value(*field).loosely_equals(value)
            }
            FilterCriterion::RangeMatch { field, lower, upper } => {
                let actual = product.value(*field);
                let above = lower.as_ref().is_none_or(|bound| {
                    match actual.compare(&bound.value) {
                        Some(Ordering::Greater) => true,
                        Some(Ordering::Equal) => bound.inclusive,
                        _ => false,
                    }
                });
                let below = upper.as_ref().is_none_or(|bound| {
                    match actual.compare(&bound.value) {
                        Some(Ordering::Less) => true,
                        Some(Ordering::Equal) => bound.inclusive,
                        _ => false,
                    }
                });
                above && below
            }
        }
    }
}

/// Which filter set of a binding a composite is installed into
///
/// Application filters come from the controller; control filters from the
/// table itself (column filters). Both sets apply together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterMode {
    #[default]
    Application,
    Control,
}

/// AND-combination of criteria, installed on a binding as one query filter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeFilter {
    pub criteria: Vec<FilterCriterion>,
}

impl CompositeFilter {
    pub fn new(criteria: Vec<FilterCriterion>) -> Self {
        Self { criteria }
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// True when the product satisfies every criterion
    pub fn matches(&self, product: &Product) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(product))
    }
}

/// Independently managed subsets of the worklist filter
///
/// The declaration order is the order slots appear in a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterSlot {
    Search,
    Category,
    Stock,
    Availability,
}

/// Current criteria per slot
///
/// Only non-empty slots are stored, so a cleared slot is indistinguishable
/// from one that was never set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    slots: BTreeMap<FilterSlot, Vec<FilterCriterion>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a slot's criteria; an empty list clears the slot
    pub fn set_slot(&mut self, slot: FilterSlot, criteria: Vec<FilterCriterion>) {
        if criteria.is_empty() {
            self.slots.remove(&slot);
        } else {
            self.slots.insert(slot, criteria);
        }
    }

    pub fn clear_slot(&mut self, slot: FilterSlot) {
        self.slots.remove(&slot);
    }

    pub fn slot(&self, slot: FilterSlot) -> &[FilterCriterion] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn active_slots(&self) -> impl Iterator<Item = FilterSlot> + '_ {
        self.slots.keys().copied()
    }

    pub fn is_active(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Concatenate all active slots, in slot order, into one composite
    pub fn apply_all(&self) -> CompositeFilter {
        CompositeFilter::new(self.slots.values().flatten().cloned().collect())
    }
}

/// Translates filter control selections into slot updates
#[derive(Debug, Clone, Default)]
pub struct FilterCoordinator {
    state: FilterState,
}

impl FilterCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Free-text search over Name and Description
    ///
    /// A blank query clears the slot instead of installing a vacuous match.
    pub fn set_search(&mut self, query: Option<&str>) {
        let criteria = match query {
            Some(q) if !q.trim().is_empty() => vec![FilterCriterion::text(
                [ProductField::Name, ProductField::Description],
                q,
            )],
            _ => Vec::new(),
        };
        self.state.set_slot(FilterSlot::Search, criteria);
    }

    pub fn set_category(&mut self, key: Option<&str>) {
        let criteria = match key {
            Some(k) if !k.is_empty() => vec![FilterCriterion::equals(ProductField::Category, k)],
            _ => Vec::new(),
        };
        self.state.set_slot(FilterSlot::Category, criteria);
    }

    /// Stock bucket by control key; unknown or missing keys clear the slot
    pub fn set_stock(&mut self, key: Option<&str>) {
        let bucket = key.and_then(|k| k.parse::<StockBucket>().ok());
        self.set_stock_bucket(bucket);
    }

    pub fn set_stock_bucket(&mut self, bucket: Option<StockBucket>) {
        let criteria = bucket
            .map(|b| vec![FilterCriterion::stock_bucket(b)])
            .unwrap_or_default();
        self.state.set_slot(FilterSlot::Stock, criteria);
    }

    /// Checked restricts to available products; unchecked removes the restriction
    pub fn set_availability(&mut self, selected: bool) {
        let criteria = if selected {
            vec![FilterCriterion::equals(ProductField::Available, true)]
        } else {
            Vec::new()
        };
        self.state.set_slot(FilterSlot::Availability, criteria);
    }

    pub fn set_slot(&mut self, slot: FilterSlot, criteria: Vec<FilterCriterion>) {
        self.state.set_slot(slot, criteria);
    }

    pub fn apply_all(&self) -> CompositeFilter {
        self.state.apply_all()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

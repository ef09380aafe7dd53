//! Grouping directives and sorters
//!
//! The worklist can cluster rows by one of a fixed set of keys. A
//! [`GroupDirective`] is turned into a [`Sorter`] that orders rows so equal
//! keys are adjacent; a grouped table then renders one header per run.

use crate::core::error::RequestError;
use crate::core::field::ProductField;
use crate::core::product::Product;
use crate::core::stock::StockBucket;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Key and display label of a row's group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub key: String,
    pub label: String,
}

impl GroupKey {
    fn same(value: &str) -> Self {
        Self {
            key: value.to_string(),
            label: value.to_string(),
        }
    }
}

/// The registry of grouping keys offered by the group dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupField {
    Category,
    Supplier,
    StockStatus,
}

impl GroupField {
    pub const ALL: [GroupField; 3] = [
        GroupField::Category,
        GroupField::Supplier,
        GroupField::StockStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupField::Category => "Category",
            GroupField::Supplier => "Supplier",
            GroupField::StockStatus => "StockStatus",
        }
    }

    /// The product property rows are sorted by while grouped
    pub fn sort_field(&self) -> ProductField {
        match self {
            GroupField::Category => ProductField::Category,
            GroupField::Supplier => ProductField::Supplier,
            GroupField::StockStatus => ProductField::Stock,
        }
    }

    pub fn extract(&self, product: &Product) -> GroupKey {
        match self {
            GroupField::Category => GroupKey::same(&product.category),
            GroupField::Supplier => GroupKey::same(&product.supplier),
            GroupField::StockStatus => GroupKey::same(product.stock_bucket().label()),
        }
    }

    /// Order two rows by their group
    ///
    /// Stock status groups follow stock order rather than label order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            GroupField::StockStatus => StockBucket::of(a.stock).cmp(&StockBucket::of(b.stock)),
            _ => self.extract(a).key.cmp(&self.extract(b).key),
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupField {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| RequestError::UnknownField {
                field: s.to_string(),
            })
    }
}

/// The active grouping of the worklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupDirective {
    pub field: GroupField,
    pub descending: bool,
}

impl GroupDirective {
    pub fn extract(&self, product: &Product) -> GroupKey {
        self.field.extract(product)
    }

    pub fn sorter(&self) -> Sorter {
        Sorter {
            field: self.field.sort_field(),
            descending: self.descending,
            group: Some(self.field),
        }
    }
}

/// One ordering directive installed on a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sorter {
    pub field: ProductField,
    pub descending: bool,
    pub group: Option<GroupField>,
}

impl Sorter {
    pub fn ascending(field: ProductField) -> Self {
        Self {
            field,
            descending: false,
            group: None,
        }
    }

    pub fn descending(field: ProductField) -> Self {
        Self {
            field,
            descending: true,
            group: None,
        }
    }

    /// Parse `Field` or `Field:asc` / `Field:desc`
    pub fn parse(raw: &str) -> Result<Self, RequestError> {
        let (field, direction) = raw.split_once(':').unwrap_or((raw, "asc"));
        let field: ProductField = field.trim().parse()?;
        match direction.trim() {
            "asc" => Ok(Self::ascending(field)),
            "desc" => Ok(Self::descending(field)),
            other => Err(RequestError::InvalidParameter {
                name: "sort".to_string(),
                message: format!("unknown direction '{}'", other),
            }),
        }
    }

    /// Compare two rows; groups first, then the field value
    ///
    /// Incomparable values (nulls, mixed types) are treated as equal so a
    /// stable sort keeps their original order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = self
            .group
            .map(|g| g.compare(a, b))
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a.value(self.field)
                    .compare(&b.value(self.field))
                    .unwrap_or(Ordering::Equal)
            });
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Compare with a sorter sequence, first decisive sorter wins
pub fn compare_all(sorters: &[Sorter], a: &Product, b: &Product) -> Ordering {
    sorters
        .iter()
        .map(|sorter| sorter.compare(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// A run of adjacent rows sharing a group key
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: GroupKey,
    pub rows: Vec<Product>,
}

/// Split already sorted rows into runs of equal group keys
pub fn group_consecutive<'a>(
    rows: impl IntoIterator<Item = &'a Product>,
    field: GroupField,
) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for row in rows {
        let key = field.extract(row);
        match groups.last_mut() {
            Some(group) if group.key == key => group.rows.push(row.clone()),
            _ => groups.push(Group {
                key,
                rows: vec![row.clone()],
            }),
        }
    }
    groups
}

/// Resolves the group dialog's choice into at most one directive
#[derive(Debug, Clone, Default)]
pub struct GroupingSelector {
    active: Option<GroupDirective>,
}

impl GroupingSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active directive
    ///
    /// An absent, empty or unknown field clears grouping.
    pub fn set_group(&mut self, field: Option<&str>, descending: bool) -> Option<GroupDirective> {
        self.active = field
            .filter(|f| !f.is_empty())
            .and_then(|f| f.parse::<GroupField>().ok())
            .map(|field| GroupDirective { field, descending });
        self.active
    }

    pub fn active(&self) -> Option<GroupDirective> {
        self.active
    }

    /// Sorters for the binding; empty when nothing is grouped
    pub fn sorters(&self) -> Vec<Sorter> {
        self.active.iter().map(GroupDirective::sorter).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, category: &str, supplier: &str, stock: u32) -> Product {
        let mut p = Product::new(id, format!("Product {id}"));
        p.category = category.to_string();
        p.supplier = supplier.to_string();
        p.stock = stock;
        p
    }

    #[test]
    fn test_empty_field_clears_grouping() {
        let mut selector = GroupingSelector::new();
        assert!(selector.set_group(Some("Category"), false).is_some());
        assert!(selector.set_group(Some(""), false).is_none());
        assert!(selector.active().is_none());
        assert!(selector.sorters().is_empty());

        selector.set_group(Some("Supplier"), true);
        assert!(selector.set_group(None, false).is_none());
    }

    #[test]
    fn test_new_directive_replaces_previous() {
        let mut selector = GroupingSelector::new();
        selector.set_group(Some("Category"), false);
        selector.set_group(Some("StockStatus"), true);
        assert_eq!(
            selector.active(),
            Some(GroupDirective {
                field: GroupField::StockStatus,
                descending: true
            })
        );
        assert_eq!(selector.sorters().len(), 1);
    }

    #[test]
    fn test_extractors() {
        let p = product(1, "Dairy", "Fresh Farms", 7);
        assert_eq!(GroupField::Category.extract(&p).label, "Dairy");
        assert_eq!(GroupField::Supplier.extract(&p).key, "Fresh Farms");
        assert_eq!(GroupField::StockStatus.extract(&p).label, "Low Stock");
    }

    #[test]
    fn test_stock_status_groups() {
        let mut rows = vec![product(3, "a", "s", 15), product(1, "a", "s", 0), product(2, "a", "s", 5)];
        let sorter = GroupDirective {
            field: GroupField::StockStatus,
            descending: false,
        }
        .sorter();
        rows.sort_by(|a, b| sorter.compare(a, b));

        let groups = group_consecutive(&rows, GroupField::StockStatus);
        let summary: Vec<(&str, Vec<u32>)> = groups
            .iter()
            .map(|g| (g.key.label.as_str(), g.rows.iter().map(|r| r.stock).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Out of Stock", vec![0]),
                ("Low Stock", vec![5]),
                ("In Stock", vec![15]),
            ]
        );
    }

    #[test]
    fn test_descending_group_order() {
        let mut rows = vec![product(1, "Beverages", "s", 1), product(2, "Dairy", "s", 1)];
        let sorter = GroupDirective {
            field: GroupField::Category,
            descending: true,
        }
        .sorter();
        rows.sort_by(|a, b| sorter.compare(a, b));
        assert_eq!(rows[0].category, "Dairy");
    }

    #[test]
    fn test_sorter_parse() {
        assert_eq!(Sorter::parse("Stock").unwrap(), Sorter::ascending(ProductField::Stock));
        assert_eq!(Sorter::parse("Name:desc").unwrap(), Sorter::descending(ProductField::Name));
        assert!(Sorter::parse("Name:sideways").is_err());
        assert!(Sorter::parse("Colour").is_err());
    }

    #[test]
    fn test_compare_all_falls_through() {
        let a = product(1, "Dairy", "B", 1);
        let b = product(2, "Dairy", "A", 1);
        let sorters = [
            Sorter::ascending(ProductField::Category),
            Sorter::ascending(ProductField::Supplier),
        ];
        assert_eq!(compare_all(&sorters, &a, &b), Ordering::Greater);
        assert_eq!(compare_all(&[], &a, &b), Ordering::Equal);
    }
}

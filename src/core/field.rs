//! Field value types and product field names

use crate::core::error::RequestError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float, widening integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Whether the value counts as "set" for display purposes
    ///
    /// `Null`, the empty string, zero and `false` are falsy. A non-empty
    /// string is truthy even when it spells a zero ("0").
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::String(s) => !s.is_empty(),
            FieldValue::Integer(i) => *i != 0,
            FieldValue::Float(f) => *f != 0.0 && !f.is_nan(),
            FieldValue::Boolean(b) => *b,
            FieldValue::DateTime(_) => true,
            FieldValue::Null => false,
        }
    }

    /// Order two values of compatible types
    ///
    /// Integers and floats compare numerically with each other. Mixed or
    /// null operands are incomparable.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => Some(a.cmp(b)),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => Some(a.cmp(b)),
            (a, b) => match (a.as_float(), b.as_float()) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            },
        }
    }

    /// Equality with numeric widening (`Integer(3) == Float(3.0)`)
    pub fn loosely_equals(&self, other: &FieldValue) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    /// Case-insensitive substring match on string values
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        match self {
            FieldValue::String(s) => s.to_lowercase().contains(&needle.to_lowercase()),
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::DateTime(d) => write!(f, "{}", d.to_rfc3339()),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Property names of the `Product` entity set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductField {
    #[serde(rename = "ID")]
    Id,
    Name,
    Description,
    Category,
    Supplier,
    Stock,
    Available,
    ReleaseDate,
    Price,
    Currency,
}

impl ProductField {
    pub const ALL: [ProductField; 10] = [
        ProductField::Id,
        ProductField::Name,
        ProductField::Description,
        ProductField::Category,
        ProductField::Supplier,
        ProductField::Stock,
        ProductField::Available,
        ProductField::ReleaseDate,
        ProductField::Price,
        ProductField::Currency,
    ];

    /// The OData property name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Id => "ID",
            ProductField::Name => "Name",
            ProductField::Description => "Description",
            ProductField::Category => "Category",
            ProductField::Supplier => "Supplier",
            ProductField::Stock => "Stock",
            ProductField::Available => "Available",
            ProductField::ReleaseDate => "ReleaseDate",
            ProductField::Price => "Price",
            ProductField::Currency => "Currency",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductField {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| RequestError::UnknownField {
                field: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_string(), Some("test"));
        assert_eq!(value.as_integer(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_integer() {
        let value = FieldValue::Integer(42);
        assert_eq!(value.as_integer(), Some(42));
        assert_eq!(value.as_float(), Some(42.0));
        assert_eq!(value.as_string(), None);
    }

    #[test]
    fn test_field_value_null() {
        let value = FieldValue::Null;
        assert!(value.is_null());
        assert!(!value.is_truthy());
    }

    #[test]
    fn test_truthiness() {
        assert!(!FieldValue::from("").is_truthy());
        assert!(FieldValue::from("0").is_truthy());
        assert!(!FieldValue::Integer(0).is_truthy());
        assert!(!FieldValue::Float(0.0).is_truthy());
        assert!(!FieldValue::Boolean(false).is_truthy());
        assert!(FieldValue::Integer(-1).is_truthy());
    }

    #[test]
    fn test_compare_widens_numbers() {
        assert_eq!(
            FieldValue::Integer(3).compare(&FieldValue::Float(3.5)),
            Some(Ordering::Less)
        );
        assert!(FieldValue::Integer(3).loosely_equals(&FieldValue::Float(3.0)));
        assert_eq!(FieldValue::from("a").compare(&FieldValue::Integer(1)), None);
        assert_eq!(FieldValue::Null.compare(&FieldValue::Null), None);
    }

    #[test]
    fn test_contains_ignore_case() {
        let name = FieldValue::from("Milk 2%");
        assert!(name.contains_ignore_case("milk"));
        assert!(name.contains_ignore_case("MILK 2"));
        assert!(!name.contains_ignore_case("cream"));
        assert!(!FieldValue::Integer(12).contains_ignore_case("1"));
    }

    #[test]
    fn test_untagged_deserialization() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"["Dairy", 10, 2.5, true, null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::from("Dairy"),
                FieldValue::Integer(10),
                FieldValue::Float(2.5),
                FieldValue::Boolean(true),
                FieldValue::Null,
            ]
        );
    }

    #[test]
    fn test_product_field_names() {
        assert_eq!("ID".parse::<ProductField>().unwrap(), ProductField::Id);
        assert_eq!("Stock".parse::<ProductField>().unwrap(), ProductField::Stock);
        assert!("stock".parse::<ProductField>().is_err());
        assert_eq!(ProductField::ReleaseDate.to_string(), "ReleaseDate");
        assert_eq!(serde_json::to_string(&ProductField::Id).unwrap(), "\"ID\"");
    }
}

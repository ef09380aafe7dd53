//! The `Product` entity served by the data service and listed by the worklist

use crate::core::error::EntityError;
use crate::core::field::{FieldValue, ProductField};
use crate::core::stock::StockBucket;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the entity set products live in
pub const PRODUCTS_ENTITY_SET: &str = "Products";

static NULL: FieldValue = FieldValue::Null;

/// A product row, serialized with its OData property names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ID")]
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub supplier: String,

    #[serde(default)]
    pub stock: u32,

    #[serde(default)]
    pub available: bool,

    #[serde(default, with = "odata_date")]
    pub release_date: Option<DateTime<Utc>>,

    #[serde(default, with = "odata_decimal", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Product {
    /// Create a product with the mandatory properties, everything else defaulted
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category: String::new(),
            supplier: String::new(),
            stock: 0,
            available: false,
            release_date: None,
            price: None,
            currency: None,
        }
    }

    /// Read a property as a [`FieldValue`]
    pub fn value(&self, field: ProductField) -> FieldValue {
        match field {
            ProductField::Id => FieldValue::Integer(self.id),
            ProductField::Name => FieldValue::from(self.name.as_str()),
            ProductField::Description => FieldValue::from(self.description.as_str()),
            ProductField::Category => FieldValue::from(self.category.as_str()),
            ProductField::Supplier => FieldValue::from(self.supplier.as_str()),
            ProductField::Stock => FieldValue::from(self.stock),
            ProductField::Available => FieldValue::Boolean(self.available),
            ProductField::ReleaseDate => FieldValue::from(self.release_date),
            ProductField::Price => FieldValue::from(self.price),
            ProductField::Currency => FieldValue::from(self.currency.clone()),
        }
    }

    pub fn stock_bucket(&self) -> StockBucket {
        StockBucket::of(self.stock)
    }

    /// Build a product from a draft's property map
    ///
    /// `ID` and a non-empty `Name` are required. Values of the wrong type are
    /// treated as missing.
    pub fn from_properties(
        properties: &IndexMap<ProductField, FieldValue>,
    ) -> Result<Self, EntityError> {
        let missing = |property: ProductField| EntityError::MissingProperty {
            entity_set: PRODUCTS_ENTITY_SET.to_string(),
            property: property.to_string(),
        };
        let get = |field: ProductField| properties.get(&field).unwrap_or(&NULL);
        let text = |field: ProductField| get(field).as_string().unwrap_or_default().to_string();

        let id = get(ProductField::Id)
            .as_integer()
            .ok_or_else(|| missing(ProductField::Id))?;
        let name = text(ProductField::Name);
        if name.trim().is_empty() {
            return Err(missing(ProductField::Name));
        }

        Ok(Self {
            id,
            name,
            description: text(ProductField::Description),
            category: text(ProductField::Category),
            supplier: text(ProductField::Supplier),
            stock: get(ProductField::Stock)
                .as_integer()
                .and_then(|s| u32::try_from(s).ok())
                .unwrap_or(0),
            available: get(ProductField::Available).as_bool().unwrap_or(false),
            release_date: match get(ProductField::ReleaseDate) {
                FieldValue::DateTime(d) => Some(*d),
                _ => None,
            },
            price: get(ProductField::Price).as_float(),
            currency: get(ProductField::Currency).as_string().map(str::to_string),
        })
    }
}

/// OData v2 JSON date literals (`"/Date(1700000000000)/"`)
///
/// Deserialization also accepts RFC 3339 strings and `null`.
pub mod odata_date {
    use chrono::{DateTime, TimeZone, Utc};
    use regex::Regex;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::sync::OnceLock;

    pub fn format(date: &DateTime<Utc>) -> String {
        format!("/Date({})/", date.timestamp_millis())
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = DATE_REGEX.get_or_init(|| {
            Regex::new(r"^/Date\((-?\d+)(?:[+-]\d{4})?\)/$").expect("valid date regex")
        });

        if let Some(caps) = regex.captures(raw) {
            let millis: i64 = caps[1].parse().ok()?;
            return Utc.timestamp_millis_opt(millis).single();
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }

    pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&format(d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date literal '{}'", raw))),
        }
    }
}

/// `Edm.Decimal` values arrive either as JSON numbers or as strings and are
/// written as strings
mod odata_decimal {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(n) => serializer.serialize_str(&n.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(n)) => Ok(Some(n)),
            Some(Raw::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid decimal '{}'", s))),
        }
    }
}

//! Stock level buckets shared by filtering, grouping and formatting

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest stock count still considered "low"
pub const LOW_STOCK_LIMIT: u32 = 10;

/// Semantic state token used to colour status texts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueState {
    None,
    Success,
    Warning,
    Error,
}

impl ValueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueState::None => "None",
            ValueState::Success => "Success",
            ValueState::Warning => "Warning",
            ValueState::Error => "Error",
        }
    }
}

impl fmt::Display for ValueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three stock-level categories
///
/// Variants are declared in ascending stock order, so the derived `Ord`
/// sorts "Out of Stock" before "Low Stock" before "In Stock".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StockBucket {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockBucket {
    pub const ALL: [StockBucket; 3] = [
        StockBucket::OutOfStock,
        StockBucket::LowStock,
        StockBucket::InStock,
    ];

    /// Classify a stock count
    pub fn of(stock: u32) -> Self {
        match stock {
            0 => StockBucket::OutOfStock,
            s if s <= LOW_STOCK_LIMIT => StockBucket::LowStock,
            _ => StockBucket::InStock,
        }
    }

    /// Whether `stock` falls into this bucket
    pub fn contains(&self, stock: u32) -> bool {
        StockBucket::of(stock) == *self
    }

    /// Selection key used by the stock filter control
    pub fn key(&self) -> &'static str {
        match self {
            StockBucket::OutOfStock => "outOfStock",
            StockBucket::LowStock => "lowStock",
            StockBucket::InStock => "inStock",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            StockBucket::OutOfStock => "Out of Stock",
            StockBucket::LowStock => "Low Stock",
            StockBucket::InStock => "In Stock",
        }
    }

    pub fn state(&self) -> ValueState {
        match self {
            StockBucket::OutOfStock => ValueState::Error,
            StockBucket::LowStock => ValueState::Warning,
            StockBucket::InStock => ValueState::Success,
        }
    }
}

impl fmt::Display for StockBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned for an unrecognized bucket key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stock bucket '{0}'")]
pub struct UnknownBucket(pub String);

impl FromStr for StockBucket {
    type Err = UnknownBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StockBucket::ALL
            .into_iter()
            .find(|bucket| bucket.key() == s)
            .ok_or_else(|| UnknownBucket(s.to_string()))
    }
}

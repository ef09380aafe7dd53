//! Display formatters used when rendering worklist rows
//!
//! All functions are pure. Missing input yields an empty string or the
//! neutral default instead of an error.

use crate::core::field::FieldValue;
use crate::core::stock::{StockBucket, ValueState};
use chrono::{DateTime, Utc};

/// Icon shown for categories without a dedicated one
pub const DEFAULT_CATEGORY_ICON: &str = "sap-icon://product";

/// Round a number (or numeric string) to two decimals
///
/// Falsy input and strings that are not numbers render as `""`.
pub fn number_unit(value: &FieldValue) -> String {
    if !value.is_truthy() {
        return String::new();
    }
    let number = match value {
        FieldValue::String(s) => s.trim().parse::<f64>().ok(),
        other => other.as_float(),
    };
    match number {
        Some(n) if n.is_finite() => format!("{:.2}", n),
        _ => String::new(),
    }
}

fn bucket(stock: Option<u32>) -> StockBucket {
    StockBucket::of(stock.unwrap_or(0))
}

/// "Out of Stock", "Low Stock" or "In Stock"; a missing count is out of stock
pub fn stock_status(stock: Option<u32>) -> &'static str {
    bucket(stock).label()
}

pub fn stock_state(stock: Option<u32>) -> ValueState {
    bucket(stock).state()
}

pub fn availability_text(available: bool) -> &'static str {
    if available { "Available" } else { "Not Available" }
}

pub fn availability_state(available: bool) -> ValueState {
    if available {
        ValueState::Success
    } else {
        ValueState::Error
    }
}

pub fn category_icon(category: Option<&str>) -> &'static str {
    match category.unwrap_or_default() {
        "Dairy" => "sap-icon://nutrition-activity",
        "Beverages" => "sap-icon://cup",
        "Grains" => "sap-icon://meal",
        "Proteins" => "sap-icon://nutrition-activity",
        "Produce" => "sap-icon://tree",
        "Snacks" => "sap-icon://favorite",
        "Condiments" => "sap-icon://meal",
        _ => DEFAULT_CATEGORY_ICON,
    }
}

/// `dd.MM.yyyy`
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_number_unit_falsy_input() {
        assert_eq!(number_unit(&FieldValue::Null), "");
        assert_eq!(number_unit(&FieldValue::from("")), "");
        assert_eq!(number_unit(&FieldValue::Integer(0)), "");
    }

    #[test]
    fn test_number_unit_formats_two_decimals() {
        assert_eq!(number_unit(&FieldValue::from("3")), "3.00");
        assert_eq!(number_unit(&FieldValue::from("0")), "0.00");
        assert_eq!(number_unit(&FieldValue::from("12.346")), "12.35");
        assert_eq!(number_unit(&FieldValue::Float(1.5)), "1.50");
        assert_eq!(number_unit(&FieldValue::Integer(42)), "42.00");
        assert_eq!(number_unit(&FieldValue::from("abc")), "");
    }

    #[test]
    fn test_stock_status_and_state() {
        assert_eq!(stock_status(None), "Out of Stock");
        assert_eq!(stock_status(Some(0)), "Out of Stock");
        assert_eq!(stock_state(Some(0)), ValueState::Error);
        assert_eq!(stock_status(Some(10)), "Low Stock");
        assert_eq!(stock_state(Some(1)), ValueState::Warning);
        assert_eq!(stock_status(Some(11)), "In Stock");
        assert_eq!(stock_state(Some(500)), ValueState::Success);
    }

    #[test]
    fn test_stock_status_agrees_with_buckets() {
        for stock in 0..=100 {
            assert_eq!(stock_status(Some(stock)), StockBucket::of(stock).label());
        }
    }

    #[test]
    fn test_availability() {
        assert_eq!(availability_text(true), "Available");
        assert_eq!(availability_text(false), "Not Available");
        assert_eq!(availability_state(true), ValueState::Success);
        assert_eq!(availability_state(false), ValueState::Error);
    }

    #[test]
    fn test_category_icon() {
        assert_eq!(category_icon(Some("Beverages")), "sap-icon://cup");
        assert_eq!(category_icon(Some("Produce")), "sap-icon://tree");
        assert_eq!(category_icon(Some("Unknown")), DEFAULT_CATEGORY_ICON);
        assert_eq!(category_icon(None), DEFAULT_CATEGORY_ICON);
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 15, 30, 0).unwrap();
        assert_eq!(format_date(Some(&date)), "07.03.2024");
        assert_eq!(format_date(None), "");
    }
}

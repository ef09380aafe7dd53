//! Integration tests driving the worklist controller like a user would
//!
//! The controller runs headless: rows come from an in-memory product service,
//! navigation and toasts are recorded by a `RecordingHost`.

use std::path::PathBuf;
use std::sync::Arc;
use worklist::controller::dialog::Dialog;
use worklist::core::group::group_consecutive;
use worklist::prelude::*;
use worklist::storage::load_products;

type Worklist = WorklistController<
    InMemoryListBinding<Arc<InMemoryProductService>>,
    StoreEntryModel,
    RecordingHost,
>;

fn product(id: i64, name: &str, description: &str, category: &str, stock: u32) -> Product {
    let mut p = Product::new(id, name);
    p.description = description.to_string();
    p.category = category.to_string();
    p.stock = stock;
    p.available = stock > 0;
    p
}

fn worklist_with(rows: Vec<Product>) -> (Worklist, Arc<InMemoryProductService>) {
    let service = Arc::new(InMemoryProductService::with_products(rows));
    let worklist = WorklistController::new(
        ResourceBundle::english(),
        InMemoryListBinding::new(service.clone()),
        StoreEntryModel::new(service.clone()),
        RecordingHost::new(),
        "http://localhost:8080/index.html",
    );
    (worklist, service)
}

fn bundled_worklist() -> (Worklist, Arc<InMemoryProductService>) {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/localService/mockdata");
    let rows = load_products(&dir)
        .expect("bundled fixture should parse")
        .expect("bundled fixture should exist");
    worklist_with(rows)
}

fn names(worklist: &Worklist) -> Vec<&str> {
    worklist
        .binding()
        .rows()
        .iter()
        .map(|p| p.name.as_str())
        .collect()
}

// =============================================================================
// Stock buckets
// =============================================================================

#[test]
fn test_bucket_filter_and_formatter_agree() {
    for stock in 0..=40u32 {
        let mut row = Product::new(1, "Row");
        row.stock = stock;

        let matching: Vec<StockBucket> = StockBucket::ALL
            .into_iter()
            .filter(|bucket| FilterCriterion::stock_bucket(*bucket).matches(&row))
            .collect();
        assert_eq!(matching.len(), 1, "stock {stock} must fall in exactly one bucket");
        assert_eq!(matching[0], StockBucket::of(stock));
        assert_eq!(formatter::stock_status(Some(stock)), matching[0].label());
        assert_eq!(formatter::stock_state(Some(stock)), matching[0].state());
    }
}

// =============================================================================
// Filter composition
// =============================================================================

#[test]
fn test_set_then_clear_equals_never_set() {
    let mut untouched = FilterCoordinator::new();
    untouched.set_category(Some("Dairy"));

    let mut toggled = FilterCoordinator::new();
    toggled.set_category(Some("Dairy"));
    toggled.set_stock(Some("inStock"));
    toggled.set_stock(None);
    toggled.set_search(Some("tea"));
    toggled.set_search(Some(""));
    toggled.set_availability(true);
    toggled.set_availability(false);

    assert_eq!(toggled.apply_all(), untouched.apply_all());
}

#[test]
fn test_category_and_stock_slots_combine() {
    let (mut worklist, _) = bundled_worklist();
    worklist.on_category_filter(Some("Dairy"));
    worklist.on_stock_filter(Some("lowStock"));

    assert_eq!(names(&worklist), ["Milk 2%", "Butter"]);
    for row in worklist.binding().rows() {
        assert_eq!(row.category, "Dairy");
        assert_eq!(row.stock_bucket(), StockBucket::LowStock);
    }
    assert_eq!(worklist.view_model().worklist_table_title, "2 items");
}

#[test]
fn test_search_matches_name_and_description() {
    let (mut worklist, _) = worklist_with(vec![
        product(1, "Milk 2%", "Reduced fat", "Dairy", 5),
        product(2, "Goat Cheese", "Made from goat MILK", "Dairy", 12),
        product(3, "Green Tea", "20 bags", "Beverages", 30),
    ]);

    worklist.on_search(Some("milk"), false);
    assert_eq!(names(&worklist), ["Milk 2%", "Goat Cheese"]);
    assert_eq!(
        worklist.view_model().table_no_data_text,
        "No matching products found"
    );

    worklist.on_search(Some(""), false);
    assert_eq!(worklist.binding().len(), 3);
    assert_eq!(
        worklist.view_model().table_no_data_text,
        "No products are currently available"
    );
}

#[test]
fn test_availability_toggle_clears_instead_of_inverting() {
    let (mut worklist, _) = bundled_worklist();
    worklist.on_available_filter(true);
    let available = worklist.binding().len();
    assert!(worklist.binding().rows().iter().all(|p| p.available));

    worklist.on_available_filter(false);
    assert!(worklist.binding().len() > available);
    assert_eq!(worklist.binding().len(), 20);
}

#[test]
fn test_initial_title_counts_bundled_rows() {
    let (worklist, _) = bundled_worklist();
    assert_eq!(worklist.view_model().worklist_table_title, "20 items");
}

#[test]
fn test_no_matches_keeps_generic_title() {
    let (mut worklist, _) = bundled_worklist();
    worklist.on_category_filter(Some("Hardware"));
    assert!(worklist.binding().is_empty());
    assert_eq!(worklist.view_model().worklist_table_title, "Products");
}

// =============================================================================
// Grouping
// =============================================================================

#[test]
fn test_group_by_stock_status() {
    let (mut worklist, _) = worklist_with(vec![
        product(1, "Fifteen", "", "Dairy", 15),
        product(2, "Zero", "", "Dairy", 0),
        product(3, "Five", "", "Dairy", 5),
    ]);

    worklist.on_group();
    worklist.on_group_dialog_confirm(Some("StockStatus"), false);

    let groups: Vec<(String, Vec<u32>)> = worklist
        .binding()
        .groups()
        .into_iter()
        .map(|g| (g.key.label, g.rows.iter().map(|p| p.stock).collect()))
        .collect();
    assert_eq!(
        groups,
        [
            ("Out of Stock".to_string(), vec![0]),
            ("Low Stock".to_string(), vec![5]),
            ("In Stock".to_string(), vec![15]),
        ]
    );
}

#[test]
fn test_grouping_survives_filtering_and_refresh() {
    let (mut worklist, service) = bundled_worklist();
    worklist.on_group_dialog_confirm(Some("Category"), true);
    worklist.on_available_filter(true);

    service
        .insert(product(99, "Kefir", "", "Dairy", 11))
        .expect("free key");
    worklist.on_refresh();

    let rows = worklist.binding().rows();
    let categories: Vec<String> = group_consecutive(rows, GroupField::Category)
        .into_iter()
        .map(|g| g.key.key)
        .collect();
    let mut sorted = categories.clone();
    sorted.sort();
    sorted.reverse();
    assert_eq!(categories, sorted, "groups are ordered descending");
    assert!(rows.iter().any(|p| p.name == "Kefir"));
    assert!(rows.iter().all(|p| p.available));
}

#[test]
fn test_group_dialog_is_built_once() {
    let (mut worklist, _) = bundled_worklist();
    worklist.on_group();
    worklist.on_group_dialog_confirm(None, false);
    worklist.on_group();

    let dialog = worklist.group_dialog().expect("dialog built");
    assert!(dialog.is_open());
    assert_eq!(dialog.items, GroupField::ALL.to_vec());
}

// =============================================================================
// Navigation and entry creation
// =============================================================================

#[test]
fn test_press_navigates_to_object() {
    let (mut worklist, _) = bundled_worklist();
    let row = worklist.binding().rows()[3].clone();
    worklist.on_press(&row);

    assert_eq!(
        worklist.host().last(),
        Some(&HostAction::NavTo {
            route: "object".to_string(),
            object_id: row.id,
        })
    );
}

#[test]
fn test_create_then_cancel_then_create() {
    let (mut worklist, service) = bundled_worklist();

    worklist.on_add();
    worklist.on_cancel_create();
    assert!(!worklist.model().has_pending_changes());
    assert_eq!(service.len().unwrap(), 20);

    worklist.on_add();
    worklist.on_create_field_change(ProductField::Id, FieldValue::Integer(10_500));
    worklist.on_create_field_change(ProductField::Name, FieldValue::from("Kefir"));
    worklist.on_create_field_change(ProductField::Category, FieldValue::from("Dairy"));
    worklist.on_save_create();

    assert_eq!(worklist.host().toasts(), ["Product created"]);
    let created = service.find(10_500).unwrap().expect("created row");
    assert_eq!(created.category, "Dairy");
    assert!(created.release_date.is_some());
}

#[test]
fn test_rejected_draft_is_not_resubmitted() {
    let (mut worklist, service) = bundled_worklist();
    worklist.on_add();
    worklist.on_create_field_change(ProductField::Id, FieldValue::Integer(10_501));
    worklist.on_save_create();

    worklist.on_add();
    worklist.on_create_field_change(ProductField::Id, FieldValue::Integer(10_502));
    worklist.on_create_field_change(ProductField::Name, FieldValue::from("Ghee"));
    worklist.on_save_create();

    assert_eq!(
        worklist.host().toasts(),
        ["Error creating product", "Product created"]
    );
    assert!(service.find(10_501).unwrap().is_none());
    assert_eq!(service.len().unwrap(), 21);
}

#[test]
fn test_duplicate_key_reports_error_toast() {
    let (mut worklist, service) = bundled_worklist();
    worklist.on_add();
    worklist.on_create_field_change(ProductField::Id, FieldValue::Integer(1));
    worklist.on_create_field_change(ProductField::Name, FieldValue::from("Duplicate"));
    worklist.on_save_create();

    assert_eq!(worklist.host().toasts(), ["Error creating product"]);
    assert_eq!(service.find(1).unwrap().unwrap().name, "Milk 2%");
    assert!(!worklist.create_dialog().unwrap().is_open());
}

// =============================================================================
// Formatters
// =============================================================================

#[test]
fn test_formatter_edge_cases() {
    assert_eq!(formatter::number_unit(&FieldValue::Null), "");
    assert_eq!(formatter::number_unit(&FieldValue::from("3")), "3.00");
    assert_eq!(formatter::category_icon(Some("Unknown")), "sap-icon://product");
}

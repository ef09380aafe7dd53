//! The worklist controller
//!
//! Every UI event is a `&mut self` method. Handlers update the filter or
//! grouping state and then re-apply it to the binding explicitly; the binding's
//! [`UpdateFinished`] result feeds the table title.

use super::dialog::{CreateDialog, Dialog, GroupDialog, LazyDialog};
use super::host::ViewHost;
use super::view_model::WorklistViewModel;
use crate::core::binding::{ListBinding, UpdateFinished};
use crate::core::field::{FieldValue, ProductField};
use crate::core::filter::{CompositeFilter, FilterCoordinator, FilterMode};
use crate::core::group::{GroupDirective, GroupingSelector};
use crate::core::i18n::ResourceBundle;
use crate::core::model::{EntryModel, Properties};
use crate::core::product::Product;
use chrono::Utc;
use uuid::Uuid;

/// Entity set path new products are created in
pub const PRODUCTS_PATH: &str = "/Products";

/// Route of the product detail page
pub const OBJECT_ROUTE: &str = "object";

/// Upper bound (exclusive) of generated draft keys
const DRAFT_ID_RANGE: u128 = 10_000;

pub struct WorklistController<B, M, H> {
    bundle: ResourceBundle,
    binding: B,
    model: M,
    host: H,
    filters: FilterCoordinator,
    grouping: GroupingSelector,
    view_model: WorklistViewModel,
    group_dialog: LazyDialog<GroupDialog>,
    create_dialog: LazyDialog<CreateDialog>,
}

impl<B, M, H> WorklistController<B, M, H>
where
    B: ListBinding,
    M: EntryModel,
    H: ViewHost,
{
    /// Set up the view state; `location` is the page address offered for sharing
    ///
    /// The binding's first load runs here so the title reflects the initial rows.
    pub fn new(bundle: ResourceBundle, binding: B, model: M, host: H, location: &str) -> Self {
        let view_model = WorklistViewModel::new(&bundle, location);
        let mut controller = Self {
            bundle,
            binding,
            model,
            host,
            filters: FilterCoordinator::new(),
            grouping: GroupingSelector::new(),
            view_model,
            group_dialog: LazyDialog::new(),
            create_dialog: LazyDialog::new(),
        };
        let event = controller.binding.refresh();
        controller.on_update_finished(event);
        controller
    }

    pub fn view_model(&self) -> &WorklistViewModel {
        &self.view_model
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn filters(&self) -> &FilterCoordinator {
        &self.filters
    }

    pub fn active_group(&self) -> Option<GroupDirective> {
        self.grouping.active()
    }

    pub fn group_dialog(&self) -> Option<&GroupDialog> {
        self.group_dialog.get()
    }

    pub fn create_dialog(&self) -> Option<&CreateDialog> {
        self.create_dialog.get()
    }

    /// Update the table title after the binding delivered rows
    ///
    /// The count is shown only when it is final and non-zero.
    pub fn on_update_finished(&mut self, event: UpdateFinished) {
        let title = if event.total > 0 && event.length_final {
            self.bundle
                .text("worklistViewTitle", &[&event.total.to_string()])
        } else {
            self.bundle.text("worklistTableTitle", &[])
        };
        self.view_model.worklist_table_title = title;
    }

    /// A row was pressed: show its detail page
    pub fn on_press(&mut self, product: &Product) {
        self.host.nav_to(OBJECT_ROUTE, product.id);
    }

    pub fn on_nav_back(&mut self) {
        self.host.nav_back();
    }

    /// Search field submitted; the refresh button only reloads
    pub fn on_search(&mut self, query: Option<&str>, refresh_pressed: bool) {
        if refresh_pressed {
            self.on_refresh();
            return;
        }
        self.filters.set_search(query);
        self.apply_filters();
    }

    pub fn on_category_filter(&mut self, key: Option<&str>) {
        self.filters.set_category(key);
        self.apply_filters();
    }

    pub fn on_stock_filter(&mut self, key: Option<&str>) {
        self.filters.set_stock(key);
        self.apply_filters();
    }

    pub fn on_available_filter(&mut self, selected: bool) {
        self.filters.set_availability(selected);
        self.apply_filters();
    }

    /// Open the group dialog, building it on first use
    pub fn on_group(&mut self) {
        let current = self.grouping.active();
        let dialog = self.group_dialog.get_or_build(GroupDialog::new);
        dialog.selected = current.map(|d| d.field);
        dialog.descending = current.is_some_and(|d| d.descending);
        dialog.open();
    }

    /// Group dialog confirmed; no group item means "no grouping"
    pub fn on_group_dialog_confirm(&mut self, group_item: Option<&str>, descending: bool) {
        let directive = self.grouping.set_group(group_item, descending);
        tracing::debug!(
            group = ?directive.map(|d| d.field),
            descending,
            "grouping changed"
        );

        let event = self.binding.sort(&self.grouping.sorters());
        self.group_dialog.close();
        self.on_update_finished(event);
    }

    /// Reload rows keeping filters, sorting and grouping
    pub fn on_refresh(&mut self) {
        let event = self.binding.refresh();
        self.on_update_finished(event);
    }

    /// Start a new product draft and open the create dialog
    pub fn on_add(&mut self) {
        let mut properties = Properties::new();
        properties.insert(ProductField::Id, FieldValue::Integer(draft_id()));
        properties.insert(ProductField::ReleaseDate, FieldValue::DateTime(Utc::now()));
        let context = self.model.create_entry(PRODUCTS_PATH, properties);

        let dialog = self.create_dialog.get_or_build(CreateDialog::new);
        dialog.bind(context);
        dialog.open();
    }

    /// Edit a property of the draft bound to the create dialog
    pub fn on_create_field_change(&mut self, field: ProductField, value: FieldValue) {
        let Some(context) = self.create_dialog.get().and_then(|d| d.context.clone()) else {
            return;
        };
        if let Err(e) = self.model.set_property(&context, field, value) {
            tracing::warn!(error = %e, field = %field, "draft property not set");
        }
    }

    /// Submit the draft; the outcome is reported as a toast
    ///
    /// The dialog closes either way; a rejected draft is discarded with it.
    pub fn on_save_create(&mut self) {
        let message = match self.model.submit_changes() {
            Ok(created) => {
                tracing::info!(count = created.len(), "product created");
                self.bundle.text("productCreated", &[])
            }
            Err(e) => {
                tracing::warn!(error = %e, "product creation failed");
                self.model.reset_changes();
                self.bundle.text("productCreateError", &[])
            }
        };
        self.host.show_toast(&message);
        self.create_dialog.close();
    }

    /// Drop the draft and close the dialog
    pub fn on_cancel_create(&mut self) {
        self.model.reset_changes();
        self.create_dialog.close();
    }

    /// Install the combined filter on the binding
    ///
    /// Also switches the no-data text between the generic and the
    /// "no matches" variant.
    pub fn apply_filters(&mut self) -> CompositeFilter {
        let composite = self.filters.apply_all();
        let event = self.binding.filter(&composite, FilterMode::Application);

        let key = if self.filters.is_active() {
            "worklistNoDataWithSearchText"
        } else {
            "tableNoDataText"
        };
        self.view_model.table_no_data_text = self.bundle.text(key, &[]);

        tracing::debug!(
            criteria = composite.len(),
            slots = self.filters.state().active_slots().count(),
            total = event.total,
            "filters applied"
        );
        self.on_update_finished(event);
        composite
    }
}

fn draft_id() -> i64 {
    (Uuid::new_v4().as_u128() % DRAFT_ID_RANGE) as i64
}

//! Dialogs owned by the worklist view
//!
//! Dialogs are built on first use and then reused; opening and closing never
//! rebuilds them.

use crate::core::group::GroupField;
use crate::core::model::EntryContext;

pub trait Dialog {
    fn open(&mut self);
    fn close(&mut self);
    fn is_open(&self) -> bool;
}

/// A dialog constructed lazily, once per view
#[derive(Debug)]
pub struct LazyDialog<D> {
    dialog: Option<D>,
    builds: usize,
}

impl<D> Default for LazyDialog<D> {
    fn default() -> Self {
        Self {
            dialog: None,
            builds: 0,
        }
    }
}

impl<D: Dialog> LazyDialog<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dialog, building it with `build` if this is the first use
    pub fn get_or_build(&mut self, build: impl FnOnce() -> D) -> &mut D {
        if self.dialog.is_none() {
            self.builds += 1;
        }
        self.dialog.get_or_insert_with(build)
    }

    pub fn get(&self) -> Option<&D> {
        self.dialog.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut D> {
        self.dialog.as_mut()
    }

    pub fn is_built(&self) -> bool {
        self.dialog.is_some()
    }

    /// How often the dialog was constructed (0 or 1)
    pub fn builds(&self) -> usize {
        self.builds
    }

    pub fn is_open(&self) -> bool {
        self.dialog.as_ref().is_some_and(Dialog::is_open)
    }

    pub fn close(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.close();
        }
    }
}

/// View settings dialog offering the grouping keys
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDialog {
    pub items: Vec<GroupField>,
    pub selected: Option<GroupField>,
    pub descending: bool,
    open: bool,
}

impl GroupDialog {
    pub fn new() -> Self {
        Self {
            items: GroupField::ALL.to_vec(),
            selected: None,
            descending: false,
            open: false,
        }
    }
}

impl Default for GroupDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialog for GroupDialog {
    fn open(&mut self) {
        self.open = true;
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

/// Form editing a draft product
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateDialog {
    pub context: Option<EntryContext>,
    open: bool,
}

impl CreateDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, context: EntryContext) {
        self.context = Some(context);
    }
}

impl Dialog for CreateDialog {
    fn open(&mut self) {
        self.open = true;
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

//! View controller of the product worklist and the pieces it drives

pub mod dialog;
pub mod host;
pub mod view_model;
pub mod worklist;

pub use dialog::{CreateDialog, Dialog, GroupDialog, LazyDialog};
pub use host::{HostAction, RecordingHost, ViewHost};
pub use view_model::WorklistViewModel;
pub use worklist::WorklistController;

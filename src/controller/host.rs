//! What the controller needs from the surrounding application shell

/// Navigation and transient notifications
pub trait ViewHost {
    /// Navigate to a named route with the object key as its parameter
    fn nav_to(&mut self, route: &str, object_id: i64);

    /// Go back one entry in the navigation history
    fn nav_back(&mut self);

    /// Show a short-lived message
    fn show_toast(&mut self, message: &str);
}

/// Something the controller asked the host to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    NavTo { route: String, object_id: i64 },
    NavBack,
    Toast(String),
}

/// Host that records requests instead of performing them
///
/// Used for headless runs of the controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub actions: Vec<HostAction>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|action| match action {
                HostAction::Toast(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<&HostAction> {
        self.actions.last()
    }
}

impl ViewHost for RecordingHost {
    fn nav_to(&mut self, route: &str, object_id: i64) {
        tracing::debug!(route, object_id, "navigate");
        self.actions.push(HostAction::NavTo {
            route: route.to_string(),
            object_id,
        });
    }

    fn nav_back(&mut self) {
        self.actions.push(HostAction::NavBack);
    }

    fn show_toast(&mut self, message: &str) {
        tracing::info!(message, "toast");
        self.actions.push(HostAction::Toast(message.to_string()));
    }
}

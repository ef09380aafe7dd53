//! State of the worklist view that is not row data

use crate::core::i18n::ResourceBundle;
use serde::Serialize;

/// Texts and control states the worklist view renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorklistViewModel {
    pub worklist_table_title: String,
    pub share_on_jam_title: String,
    pub share_send_email_subject: String,
    pub share_send_email_message: String,
    pub table_no_data_text: String,
    pub table_busy_delay: u32,
}

impl WorklistViewModel {
    /// Initial state; `location` is the address shared by the e-mail action
    pub fn new(bundle: &ResourceBundle, location: &str) -> Self {
        Self {
            worklist_table_title: bundle.text("worklistTableTitle", &[]),
            share_on_jam_title: bundle.text("worklistTitle", &[]),
            share_send_email_subject: bundle.text("shareSendEmailWorklistSubject", &[]),
            share_send_email_message: bundle.text("shareSendEmailWorklistMessage", &[location]),
            table_no_data_text: bundle.text("tableNoDataText", &[]),
            table_busy_delay: 0,
        }
    }
}

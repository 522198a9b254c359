//! Console API payload types that exist only at the HTTP boundary.

use serde::{Deserialize, Serialize};

/// Response to a provisioning application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyReceipt {
    pub success: bool,

    /// Ticket id to track the application with, when accepted.
    #[serde(default)]
    pub application_id: Option<String>,

    /// Rejection reason, when not.
    #[serde(default)]
    pub error: Option<String>,
}

//! Global State Management
//!
//! Console-wide state shared through context: the usage scenario, the
//! business the operator works under, and sticky selections persisted to
//! LocalStorage.

use gloo_storage::{LocalStorage, Storage};
use leptos::*;
use serde::{Deserialize, Serialize};

use nimbus_shared::model::Vendor;

const PREFS_KEY: &str = "nimbus:prefs";

/// Where the console is being used from. The resource pages are operated by
/// platform admins and do not require a business selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    #[default]
    Business,
    Resource,
}

/// Selections remembered across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiPreferences {
    pub last_vendor: Option<Vendor>,
    pub last_region: String,
}

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// Current usage scenario
    pub scenario: RwSignal<Scenario>,

    /// Business the operator works under (0 = none selected)
    pub biz_id: RwSignal<i64>,

    /// Sticky vendor/region selection for the apply forms
    pub prefs: RwSignal<UiPreferences>,
}

impl AppState {
    /// Create the app state, restoring persisted preferences.
    pub fn new() -> Self {
        let prefs: UiPreferences = LocalStorage::get(PREFS_KEY).unwrap_or_default();
        Self {
            scenario: create_rw_signal(Scenario::default()),
            biz_id: create_rw_signal(0),
            prefs: create_rw_signal(prefs),
        }
    }

    /// Persist the current preferences to LocalStorage.
    pub fn save_preferences(&self) {
        if let Err(err) = LocalStorage::set(PREFS_KEY, &self.prefs.get_untracked()) {
            tracing::warn!("failed to persist preferences: {err}");
        }
    }

    /// Remember the vendor/region pair an apply form was last used with.
    pub fn remember_selection(&self, vendor: Option<Vendor>, region: &str) {
        self.prefs.update(|p| {
            p.last_vendor = vendor;
            p.last_region = region.to_string();
        });
        self.save_preferences();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

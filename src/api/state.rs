//! Application state for the shift ledger API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::lifecycle::ShiftController;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration and the ledger controller.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    ledger: Arc<ShiftController>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, ledger: ShiftController) -> Self {
        Self {
            config: Arc::new(config),
            ledger: Arc::new(ledger),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the ledger controller.
    pub fn ledger(&self) -> &ShiftController {
        &self.ledger
    }

    /// Returns a handle to the ledger controller for work moved off the
    /// request task.
    pub fn shared_ledger(&self) -> Arc<ShiftController> {
        Arc::clone(&self.ledger)
    }
}

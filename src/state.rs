use std::collections::HashSet;
use std::sync::Mutex;

use crate::config::AppConfig;
use crate::services::remote::{Backend, Transport};

pub struct AppState {
    pub config: AppConfig,
    pub transport: Box<dyn Transport>,
    pub in_flight: Mutex<HashSet<String>>,
}

impl AppState {
    pub fn new(config: AppConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn backend<'a>(&'a self, bearer: Option<&'a str>) -> Backend<'a> {
        Backend::new(self.transport.as_ref(), bearer)
    }

    /// Marks a submission for `key` as in flight. Returns `None` while an
    /// earlier one for the same key has not finished.
    pub fn begin_submission(&self, key: &str) -> Option<SubmissionGuard<'_>> {
        let key = key.trim().to_lowercase();
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(key.clone()) {
            return None;
        }
        Some(SubmissionGuard { state: self, key })
    }
}

/// Clears the in-flight mark when dropped, whether the request succeeded
/// or not.
pub struct SubmissionGuard<'a> {
    state: &'a AppState,
    key: String,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.state
            .in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}

//! # Session Registry
//!
//! Maps an opaque session ID to that session's [`NavModel`], creating
//! the model on first access. Nothing is ever evicted; sessions live for
//! the lifetime of the process.
//!
//! Locking is two-level so sessions don't contend with each other:
//!
//! - the registry map sits behind an `RwLock` (read lock for lookups,
//!   write lock only for first-access inserts), and
//! - each model sits behind its own `Mutex`, so concurrent requests for
//!   the *same* session serialize while different sessions only share
//!   the brief registry critical section.
//!
//! Where the ID comes from (cookie issuance) is the HTTP adapter's
//! business — the registry just needs a stable opaque string.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use parking_lot::{Mutex, RwLock};

use crate::core::nav::NavModel;

/// Generate a new UUID v4 session ID.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Default)]
pub struct SessionRegistry {
    models: RwLock<HashMap<String, Arc<Mutex<NavModel>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the session's model, creating it at the entry state on
    /// first access. Subsequent calls with the same ID return the same
    /// instance.
    pub fn resolve(&self, session_id: &str) -> Arc<Mutex<NavModel>> {
        if let Some(model) = self.models.read().get(session_id) {
            return Arc::clone(model);
        }

        let mut models = self.models.write();
        // Another request may have inserted between the locks.
        Arc::clone(models.entry(session_id.to_string()).or_insert_with(|| {
            debug!("New session: {}", session_id);
            Arc::new(Mutex::new(NavModel::new()))
        }))
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }
}

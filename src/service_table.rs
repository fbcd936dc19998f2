//! Lock-guarded storage shared by every registry flavour.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::registration::Registration;
use crate::{LocatorEvent, ServiceKey};

/// User-supplied observer invoked for every registry operation.
///
/// It must be thread-safe because registries can be shared across threads.
pub type TraceCallback = dyn Fn(&LocatorEvent) + Send + Sync + 'static;

/// Registrations plus the optional trace callback of one registry.
///
/// Each mutex is held only across the map access itself. Registrations and callbacks
/// are cloned out before any user code runs, so a factory or callback may call back
/// into the same registry without deadlocking.
///
/// Poisoned locks are recovered: every operation leaves the map in a consistent state
/// and none of them is allowed to fail.
#[derive(Default)]
pub struct ServiceTable {
    services: Mutex<HashMap<ServiceKey, Registration>>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl ServiceTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn services(&self) -> MutexGuard<'_, HashMap<ServiceKey, Registration>> {
        self.services.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Stores `registration`, replacing whatever was bound to `key`.
    pub(crate) fn insert(&self, key: ServiceKey, registration: Registration) {
        // The replaced payload is dropped after the lock is released.
        let replaced = self.services().insert(key, registration);
        drop(replaced);
    }

    pub(crate) fn lookup(&self, key: &ServiceKey) -> Option<Registration> {
        self.services().get(key).cloned()
    }

    pub(crate) fn contains_key(&self, key: &ServiceKey) -> bool {
        self.services().contains_key(key)
    }

    /// Number of bound capability types.
    pub fn len(&self) -> usize {
        self.services().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every registration and releases the map's allocation.
    pub(crate) fn clear(&self) {
        // Swap the map out so payload destructors run after the lock is released.
        let drained = std::mem::take(&mut *self.services());
        drop(drained);
    }

    pub(crate) fn set_trace_callback(&self, callback: Arc<TraceCallback>) {
        *self.trace.lock().unwrap_or_else(|p| p.into_inner()) = Some(callback);
    }

    pub(crate) fn clear_trace_callback(&self) {
        *self.trace.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }

    /// Delivers `event` to the current callback, if any.
    ///
    /// The callback runs after the trace lock is released; a panic inside it propagates
    /// to the caller without poisoning either lock.
    pub(crate) fn emit(&self, event: &LocatorEvent) {
        let callback = self
            .trace
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();

        if let Some(callback) = callback {
            callback(event);
        }
    }
}

impl std::fmt::Debug for ServiceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&'static str> = self.services().keys().map(|k| k.type_name()).collect();
        names.sort_unstable();
        f.debug_struct("ServiceTable").field("services", &names).finish()
    }
}

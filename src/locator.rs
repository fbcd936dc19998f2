//! Core trait defining registry behavior.
//!
//! This module provides the `ServiceLocator` trait with default implementations for
//! registering instances and factories, resolving them back, and tracing.
//!
//! The registry is type-keyed: each capability type has at most one registration.
//! Registering the same type again replaces the previous instance or factory.

use std::sync::Arc;

use crate::registration::{Registration, Resolved};
use crate::{LocatorEvent, ResolveError, ServiceKey, ServiceTable};

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// `table` to be implemented. [`StaticRegistry`](crate::StaticRegistry) returns the
/// process-wide table, [`ScopedRegistry`](crate::ScopedRegistry) its own.
pub trait ServiceLocator {
    /// Access the storage backing this registry.
    fn table(&self) -> &ServiceTable;

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations.
    ///
    /// The callback is invoked for every register, resolve, contains and reset call.
    /// It runs without any registry lock held, so it may use the registry itself.
    fn set_trace_callback(&self, callback: impl Fn(&LocatorEvent) + Send + Sync + 'static) {
        self.table().set_trace_callback(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// This does not affect registrations.
    fn clear_trace_callback(&self) {
        self.table().clear_trace_callback();
    }

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    /// Register an instance of `T`.
    ///
    /// Takes ownership of the value and wraps it in an `Arc`. Any previous instance or
    /// factory for `T` is replaced.
    fn register_instance<T: Send + Sync + 'static>(&self, value: T) {
        self.register_arc(Arc::new(value));
    }

    /// Register an already shared instance of `T` without wrapping it again.
    fn register_arc<T: Send + Sync + 'static>(&self, value: Arc<T>) {
        insert(self.table(), ServiceKey::of::<T>(), Registration::instance(value));
    }

    /// Register a factory producing `T`.
    ///
    /// The factory runs on every resolution of `T`; results are never cached. Any
    /// previous instance or factory for `T` is replaced.
    fn register_factory<T, F>(&self, factory: F)
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        insert(self.table(), ServiceKey::of::<T>(), Registration::factory(factory));
    }

    // -------------------------------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------------------------------

    /// Resolve `T`, reporting why nothing was produced.
    ///
    /// Instances come back as the shared `Arc` stored in the registry; factory results
    /// are wrapped in a fresh `Arc`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NotRegistered`] when nothing is bound to `T`
    /// - [`ResolveError::TypeMismatch`] when the binding does not hold or produce a `T`
    ///
    /// # Panics
    ///
    /// A panicking factory propagates to the caller. The registry stays usable.
    fn try_resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolveError> {
        lookup(self.table()).map(Resolved::into_arc)
    }

    /// Resolve `T`, or `None` when no compatible registration exists.
    fn resolve<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.try_resolve().ok()
    }

    /// Resolve an owned `T`.
    ///
    /// Stored instances are cloned; factory results are returned as produced.
    fn resolve_cloned<T: Send + Sync + Clone + 'static>(&self) -> Option<T> {
        lookup(self.table()).ok().map(Resolved::into_owned)
    }

    /// Check whether anything is registered for `T`.
    fn contains<T: ?Sized + 'static>(&self) -> bool {
        let key = ServiceKey::of::<T>();
        let found = self.table().contains_key(&key);

        self.table().emit(&LocatorEvent::Contains {
            type_name: key.type_name(),
            found,
        });

        found
    }

    /// Drop every registration.
    ///
    /// Already resolved `Arc<T>` values stay valid. The trace callback is kept.
    fn reset(&self) {
        self.table().emit(&LocatorEvent::Reset);
        self.table().clear();
        tracing::debug!("registry reset");
    }
}

fn insert(table: &ServiceTable, key: ServiceKey, registration: Registration) {
    let kind = registration.kind();

    table.emit(&LocatorEvent::Register {
        type_name: key.type_name(),
        kind,
    });

    table.insert(key, registration);
    tracing::debug!(service = key.type_name(), %kind, "registered");
}

/// Shared resolution path: the map lookup happens under the lock, the downcast and any
/// factory call after it is released.
pub(crate) fn lookup<T: Send + Sync + 'static>(
    table: &ServiceTable,
) -> Result<Resolved<T>, ResolveError> {
    let key = ServiceKey::of::<T>();

    let result = match table.lookup(&key) {
        Some(registration) => registration.resolve::<T>(&key),
        None => Err(ResolveError::NotRegistered {
            type_name: key.type_name(),
        }),
    };

    match &result {
        Ok(_) => tracing::trace!(service = key.type_name(), outcome = "resolved", "resolve"),
        Err(err) => tracing::trace!(
            service = key.type_name(),
            outcome = outcome(err),
            %err,
            "resolve"
        ),
    }

    table.emit(&LocatorEvent::Resolve {
        type_name: key.type_name(),
        found: result.is_ok(),
    });

    result
}

fn outcome(err: &ResolveError) -> &'static str {
    match err {
        ResolveError::NotRegistered { .. } => "not_registered",
        ResolveError::TypeMismatch { .. } => "type_mismatch",
        ResolveError::RegistryDropped { .. } => "registry_dropped",
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct Local(ServiceTable);

    impl ServiceLocator for Local {
        fn table(&self) -> &ServiceTable {
            &self.0
        }
    }

    fn local() -> Local {
        Local(ServiceTable::new())
    }

    #[test]
    fn test_register_and_resolve_primitive() -> Result<(), ResolveError> {
        let locator = local();
        locator.register_instance(42i32);

        let num: Arc<i32> = locator.try_resolve()?;
        assert_eq!(*num, 42);

        let again = locator.try_resolve::<i32>()?;
        assert!(Arc::ptr_eq(&num, &again));

        Ok(())
    }

    #[test]
    fn test_resolution_outcome_labels() {
        assert_eq!(outcome(&ResolveError::NotRegistered { type_name: "u8" }), "not_registered");
        assert_eq!(outcome(&ResolveError::TypeMismatch { type_name: "u8" }), "type_mismatch");
        assert_eq!(
            outcome(&ResolveError::RegistryDropped { type_name: "u8" }),
            "registry_dropped"
        );
    }

    #[test]
    fn test_resolve_missing() {
        let locator = local();

        assert!(locator.resolve::<String>().is_none());
        assert_eq!(
            locator.try_resolve::<String>().unwrap_err(),
            ResolveError::NotRegistered {
                type_name: "alloc::string::String"
            }
        );
    }

    #[test]
    fn test_mismatched_payload_resolves_to_none() {
        let locator = local();

        // Bind a String payload under the key of u64.
        locator.table().insert(
            ServiceKey::of::<u64>(),
            Registration::instance(Arc::new("not a number".to_string())),
        );

        assert!(locator.contains::<u64>());
        assert!(locator.resolve::<u64>().is_none());
        assert!(locator.resolve_cloned::<u64>().is_none());
        assert_eq!(
            locator.try_resolve::<u64>().unwrap_err(),
            ResolveError::TypeMismatch { type_name: "u64" }
        );
    }

    #[test]
    fn test_mismatched_factory_resolves_to_none() {
        let locator = local();
        locator
            .table()
            .insert(ServiceKey::of::<u64>(), Registration::factory(|| 5u32));

        assert!(locator.resolve::<u64>().is_none());
    }

    #[test]
    fn test_factory_not_memoized() {
        let locator = local();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        locator.register_factory(move || counter.fetch_add(1, Ordering::SeqCst));

        let values: Vec<usize> = (0..3)
            .map(|_| *locator.resolve::<usize>().unwrap())
            .collect();

        assert_eq!(values, vec![0, 1, 2]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_instance_replaces_factory_and_back() {
        let locator = local();

        locator.register_factory(|| 1u16);
        locator.register_instance(2u16);
        assert_eq!(locator.resolve_cloned::<u16>(), Some(2));

        locator.register_factory(|| 3u16);
        assert_eq!(locator.resolve_cloned::<u16>(), Some(3));
    }

    #[test]
    fn test_register_arc_shares_allocation() {
        let locator = local();
        let value = Arc::new(42i32);
        let clone = value.clone();
        locator.register_arc(value);

        let retrieved: Arc<i32> = locator.resolve().unwrap();
        assert_eq!(*retrieved, 42);
        assert_eq!(Arc::strong_count(&clone), 3); // clone + registry + retrieved
    }

    #[test]
    fn test_reset_clears_everything() {
        let locator = local();
        locator.register_instance(1u8);
        locator.register_factory(|| "made".to_string());

        locator.reset();

        assert!(!locator.contains::<u8>());
        assert!(locator.resolve::<u8>().is_none());
        assert!(locator.resolve::<String>().is_none());
    }

    #[test]
    fn test_factory_may_resolve_from_same_registry() {
        #[derive(Clone)]
        struct Endpoint(String);
        struct Client {
            endpoint: String,
        }

        let locator = Arc::new(local());
        locator.register_instance(Endpoint("https://example.net".to_string()));

        let inner = locator.clone();
        locator.register_factory(move || Client {
            endpoint: inner
                .resolve_cloned::<Endpoint>()
                .map(|e| e.0)
                .unwrap_or_default(),
        });

        let client: Arc<Client> = locator.resolve().unwrap();
        assert_eq!(client.endpoint, "https://example.net");

        // Drop the factory so its Arc back-reference is released.
        locator.reset();
    }

    #[test]
    fn test_panicking_factory_leaves_registry_usable() {
        let locator = local();
        locator.register_factory::<u32, _>(|| panic!("factory failed"));
        locator.register_instance(9i64);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            locator.resolve::<u32>()
        }));
        assert!(outcome.is_err());

        assert_eq!(locator.resolve_cloned::<i64>(), Some(9));
    }

    #[test]
    fn test_trace_events_in_order() {
        let locator = local();
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        locator.set_trace_callback(move |e| {
            events_clone.lock().unwrap().push(e.to_string());
        });

        locator.register_instance(5u8);
        let _ = locator.resolve::<u8>();
        let _ = locator.resolve::<u16>();
        let _ = locator.contains::<u8>();
        locator.reset();

        let captured = events.lock().unwrap();
        assert_eq!(
            *captured,
            vec![
                "register { type_name: u8, kind: instance }",
                "resolve { type_name: u8, found: true }",
                "resolve { type_name: u16, found: false }",
                "contains { type_name: u8, found: true }",
                "Resetting the Registry",
            ]
        );
    }

    #[test]
    fn test_clear_trace_callback_stops_events() {
        let locator = local();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();

        locator.set_trace_callback(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        locator.register_factory(|| 1i32);

        locator.clear_trace_callback();
        locator.register_instance(2i32);
        let _ = locator.resolve::<i32>();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_may_use_registry() {
        let locator = Arc::new(local());
        let inner = Arc::downgrade(&locator);

        locator.set_trace_callback(move |event| {
            if let (Some(locator), LocatorEvent::Register { .. }) = (inner.upgrade(), event) {
                let _ = locator.contains::<String>();
            }
        });

        locator.register_instance(1i32);
        assert_eq!(locator.resolve_cloned::<i32>(), Some(1));
    }
}

//! The process-wide registry.
//!
//! A single table shared by the whole process, reachable from anywhere without passing a
//! handle around. It is created on first use and lives until the process exits; `reset`
//! empties it but never destroys it.
//!
//! # Examples
//!
//! ```
//! use service_locator::{register_instance, resolve};
//! use std::sync::Arc;
//!
//! register_instance("Hello, World!".to_string());
//!
//! let message: Arc<String> = resolve().unwrap();
//! assert_eq!(&*message, "Hello, World!");
//! ```

use std::sync::{Arc, LazyLock};

use crate::{LocatorEvent, ResolveError, ServiceLocator, ServiceTable};

/// Global thread-safe table backing [`StaticRegistry`].
static GLOBAL_TABLE: LazyLock<ServiceTable> = LazyLock::new(ServiceTable::new);

/// Zero-sized handle to the process-wide registry.
///
/// Every `StaticRegistry` value refers to the same storage, so the handle can be created
/// wherever it is needed. The free functions of this crate delegate to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRegistry;

impl ServiceLocator for StaticRegistry {
    fn table(&self) -> &ServiceTable {
        &GLOBAL_TABLE
    }
}

/// Registers an instance of `T` in the process-wide registry, replacing any previous
/// registration for `T`.
///
/// # Examples
///
/// ```
/// use service_locator::{register_instance, resolve};
/// use std::sync::Arc;
///
/// register_instance(42i32);
/// register_instance("Hello".to_string());
///
/// let num: Arc<i32> = resolve().expect("i32 was registered");
/// let s: Arc<String> = resolve().expect("String was registered");
///
/// assert_eq!(*num, 42);
/// assert_eq!(&*s, "Hello");
/// ```
pub fn register_instance<T: Send + Sync + 'static>(value: T) {
    StaticRegistry.register_instance(value)
}

/// Registers an `Arc<T>` in the process-wide registry.
///
/// ```
/// use std::sync::Arc;
/// use service_locator::{register_arc, resolve};
///
/// let value = Arc::new("shared".to_string());
/// register_arc(value.clone());
///
/// let retrieved: Arc<String> = resolve().expect("String was registered");
/// assert!(Arc::ptr_eq(&value, &retrieved));
/// ```
pub fn register_arc<T: Send + Sync + 'static>(value: Arc<T>) {
    StaticRegistry.register_arc(value)
}

/// Registers a factory for `T` in the process-wide registry.
///
/// The factory runs on every resolution of `T`.
///
/// ```
/// use service_locator::{register_factory, resolve_cloned};
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// static NEXT_ID: AtomicU32 = AtomicU32::new(1);
///
/// #[derive(Clone)]
/// struct RequestId(u32);
///
/// register_factory(|| RequestId(NEXT_ID.fetch_add(1, Ordering::Relaxed)));
///
/// let first: RequestId = resolve_cloned().unwrap();
/// let second: RequestId = resolve_cloned().unwrap();
/// assert_ne!(first.0, second.0);
/// ```
pub fn register_factory<T, F>(factory: F)
where
    T: Send + Sync + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    StaticRegistry.register_factory(factory)
}

/// Resolves `T` from the process-wide registry, or `None` when nothing compatible is
/// registered.
pub fn resolve<T: Send + Sync + 'static>() -> Option<Arc<T>> {
    StaticRegistry.resolve()
}

/// Resolves an owned `T` from the process-wide registry.
pub fn resolve_cloned<T: Send + Sync + Clone + 'static>() -> Option<T> {
    StaticRegistry.resolve_cloned()
}

/// Resolves `T` from the process-wide registry, reporting why nothing was produced.
pub fn try_resolve<T: Send + Sync + 'static>() -> Result<Arc<T>, ResolveError> {
    StaticRegistry.try_resolve()
}

/// Checks whether anything is registered for `T` in the process-wide registry.
///
/// ```
/// use service_locator::{contains, register_instance};
///
/// struct Marker;
///
/// assert!(!contains::<Marker>());
/// register_instance(Marker);
/// assert!(contains::<Marker>());
/// ```
pub fn contains<T: ?Sized + 'static>() -> bool {
    StaticRegistry.contains::<T>()
}

/// Drops every registration in the process-wide registry.
pub fn reset() {
    StaticRegistry.reset()
}

/// Sets the tracing callback of the process-wide registry.
///
/// ```rust
/// use service_locator::{clear_trace_callback, set_trace_callback};
///
/// set_trace_callback(|event| println!("[locator-trace] {event}"));
/// clear_trace_callback();
/// ```
pub fn set_trace_callback(callback: impl Fn(&LocatorEvent) + Send + Sync + 'static) {
    StaticRegistry.set_trace_callback(callback)
}

/// Clears the tracing callback of the process-wide registry.
pub fn clear_trace_callback() {
    StaticRegistry.clear_trace_callback()
}

//! Owned registries and non-owning references to them.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::locator::lookup;
use crate::registration::Resolved;
use crate::{ResolveError, ServiceKey, ServiceLocator, ServiceTable};

/// A registry with private storage, owned by whoever constructed it.
///
/// Instances are fully independent of each other and of the process-wide registry.
/// Consumers that receive one as a constructor argument make their dependency on the
/// registry explicit. The storage is freed when the registry is dropped.
///
/// # Examples
///
/// ```
/// use service_locator::{ScopedRegistry, ServiceLocator};
///
/// let registry = ScopedRegistry::new();
/// registry.register_instance(8080u16);
///
/// assert_eq!(registry.resolve_cloned::<u16>(), Some(8080));
/// assert!(ScopedRegistry::new().resolve::<u16>().is_none());
/// ```
#[derive(Default)]
pub struct ScopedRegistry {
    table: Arc<ServiceTable>,
}

impl ScopedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a non-owning reference to this registry.
    ///
    /// The reference does not keep the registry alive. Once the registry is dropped,
    /// resolving through it yields nothing.
    pub fn downgrade(&self) -> WeakRegistry {
        WeakRegistry {
            table: Arc::downgrade(&self.table),
        }
    }

    /// Number of bound capability types.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl ServiceLocator for ScopedRegistry {
    fn table(&self) -> &ServiceTable {
        &self.table
    }
}

impl fmt::Debug for ScopedRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedRegistry")
            .field("table", &*self.table)
            .finish()
    }
}

/// Non-owning link to a [`ScopedRegistry`].
///
/// Meant for consumers that must not extend the registry's lifetime, for instance when
/// the registry's owner is itself registered in it. The registry has to outlive every
/// holder that expects results; after it is dropped every resolution comes back empty
/// and [`try_resolve`](WeakRegistry::try_resolve) reports
/// [`ResolveError::RegistryDropped`].
///
/// ```
/// use service_locator::{ScopedRegistry, ServiceLocator};
///
/// let registry = ScopedRegistry::new();
/// let weak = registry.downgrade();
///
/// registry.register_instance("ready".to_string());
/// assert_eq!(weak.resolve_cloned::<String>().as_deref(), Some("ready"));
///
/// drop(registry);
/// assert!(weak.resolve::<String>().is_none());
/// ```
#[derive(Clone, Default)]
pub struct WeakRegistry {
    table: Weak<ServiceTable>,
}

impl WeakRegistry {
    /// A reference that never had a registry behind it.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        self.table.strong_count() > 0
    }

    /// Recovers an owning handle while the registry is still alive.
    ///
    /// The returned registry shares storage with the original, and keeps it alive for as
    /// long as it is held.
    pub fn upgrade(&self) -> Option<ScopedRegistry> {
        self.table.upgrade().map(|table| ScopedRegistry { table })
    }

    /// Resolves `T` through the link.
    ///
    /// # Errors
    ///
    /// [`ResolveError::RegistryDropped`] when the registry no longer exists, otherwise the
    /// same errors as [`ServiceLocator::try_resolve`].
    pub fn try_resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ResolveError> {
        self.with_table::<T, _>(|table| lookup::<T>(table).map(Resolved::into_arc))
    }

    pub fn resolve<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.try_resolve().ok()
    }

    pub fn resolve_cloned<T: Send + Sync + Clone + 'static>(&self) -> Option<T> {
        self.with_table::<T, _>(|table| lookup::<T>(table).map(Resolved::into_owned))
            .ok()
    }

    /// `false` when nothing is registered for `T` or the registry is gone.
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.upgrade().is_some_and(|registry| registry.contains::<T>())
    }

    fn with_table<T: ?Sized + 'static, R>(
        &self,
        f: impl FnOnce(&ServiceTable) -> Result<R, ResolveError>,
    ) -> Result<R, ResolveError> {
        match self.table.upgrade() {
            Some(table) => f(&table),
            None => {
                let key = ServiceKey::of::<T>();
                tracing::trace!(service = key.type_name(), "registry dropped");
                Err(ResolveError::RegistryDropped {
                    type_name: key.type_name(),
                })
            }
        }
    }
}

impl fmt::Debug for WeakRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakRegistry")
            .field("alive", &self.is_alive())
            .finish()
    }
}

impl From<&ScopedRegistry> for WeakRegistry {
    fn from(registry: &ScopedRegistry) -> Self {
        registry.downgrade()
    }
}

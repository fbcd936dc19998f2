//! Type-erased registrations and the typed dispatch that recovers them.

use std::any::Any;
use std::sync::Arc;

use crate::{RegistrationKind, ResolveError, ServiceKey};

/// Concrete form of a stored factory once the type erasure is undone.
type FactoryFn<T> = Box<dyn Fn() -> T + Send + Sync>;

/// One bound capability: either a shared instance or a zero-argument producer.
///
/// Both payloads are erased to `dyn Any` so a single table can hold unrelated types.
/// Cloning only bumps a reference count, which lets callers release the table lock
/// before touching the payload.
#[derive(Clone)]
pub(crate) enum Registration {
    Instance(Arc<dyn Any + Send + Sync>),
    Factory(Arc<dyn Any + Send + Sync>),
}

/// A typed resolution result.
pub(crate) enum Resolved<T> {
    /// The registered instance, shared with the table.
    Shared(Arc<T>),
    /// A fresh value from the registered factory.
    Produced(T),
}

impl<T> Resolved<T> {
    pub(crate) fn into_arc(self) -> Arc<T> {
        match self {
            Resolved::Shared(value) => value,
            Resolved::Produced(value) => Arc::new(value),
        }
    }

    pub(crate) fn into_owned(self) -> T
    where
        T: Clone,
    {
        match self {
            Resolved::Shared(value) => (*value).clone(),
            Resolved::Produced(value) => value,
        }
    }
}

impl Registration {
    pub(crate) fn instance<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Registration::Instance(value)
    }

    pub(crate) fn factory<T, F>(factory: F) -> Self
    where
        T: 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let factory: FactoryFn<T> = Box::new(factory);
        Registration::Factory(Arc::new(factory))
    }

    pub(crate) fn kind(&self) -> RegistrationKind {
        match self {
            Registration::Instance(_) => RegistrationKind::Instance,
            Registration::Factory(_) => RegistrationKind::Factory,
        }
    }

    /// Recovers a `T` from the payload.
    ///
    /// An instance must be exactly `T`; a factory must produce exactly `T` and is invoked
    /// on every call. Any other shape is a mismatch. Must be called without holding the
    /// table lock, since the factory may re-enter the registry.
    pub(crate) fn resolve<T: Send + Sync + 'static>(
        self,
        key: &ServiceKey,
    ) -> Result<Resolved<T>, ResolveError> {
        let mismatch = || ResolveError::TypeMismatch {
            type_name: key.type_name(),
        };

        match self {
            Registration::Instance(payload) => payload
                .downcast::<T>()
                .map(Resolved::Shared)
                .map_err(|_| mismatch()),
            Registration::Factory(payload) => {
                let factory = payload.downcast_ref::<FactoryFn<T>>().ok_or_else(mismatch)?;
                Ok(Resolved::Produced(factory()))
            }
        }
    }
}

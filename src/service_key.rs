//! Lookup keys derived from capability types.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies the capability type a registration is stored under.
///
/// Built from a generic parameter at the call site, so registering and resolving the
/// same `T` always produce equal keys and distinct types never collide. Only the
/// `TypeId` takes part in equality and hashing; the type name is kept for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ServiceKey {
    id: TypeId,
    type_name: &'static str,
}

impl ServiceKey {
    /// Key for capability type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Human readable name of the capability type (e.g. `alloc::string::String`).
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

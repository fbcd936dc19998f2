use thiserror::Error;

/// Why a resolution produced no value.
///
/// Only [`try_resolve`](crate::ServiceLocator::try_resolve) surfaces this; the plain
/// `resolve` family collapses every variant into `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("No registration for `{type_name}`")]
    NotRegistered { type_name: &'static str },

    #[error("Registration for `{type_name}` holds a value of another type")]
    TypeMismatch { type_name: &'static str },

    #[error("Registry was dropped before resolving `{type_name}`")]
    RegistryDropped { type_name: &'static str },
}

impl ResolveError {
    /// Name of the capability type that was requested.
    pub fn type_name(&self) -> &'static str {
        match self {
            ResolveError::NotRegistered { type_name }
            | ResolveError::TypeMismatch { type_name }
            | ResolveError::RegistryDropped { type_name } => type_name,
        }
    }
}

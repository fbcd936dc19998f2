use std::fmt;

/// Which payload form a registration carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationKind {
    Instance,
    Factory,
}

impl fmt::Display for RegistrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationKind::Instance => f.write_str("instance"),
            RegistrationKind::Factory => f.write_str("factory"),
        }
    }
}

/// Events emitted by a registry during operations.
///
/// These events are passed to the callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use service_locator::{LocatorEvent, RegistrationKind};
///
/// let event = LocatorEvent::Register {
///     type_name: "i32",
///     kind: RegistrationKind::Factory,
/// };
/// assert_eq!(event.to_string(), "register { type_name: i32, kind: factory }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorEvent {
    /// An instance or factory was registered.
    Register {
        type_name: &'static str,
        kind: RegistrationKind,
    },

    /// A capability was requested.
    Resolve {
        type_name: &'static str,
        /// Whether a value was produced.
        found: bool,
    },

    /// A registration existence check was performed.
    Contains {
        type_name: &'static str,
        found: bool,
    },

    /// Every registration was dropped.
    Reset,
}

impl fmt::Display for LocatorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorEvent::Register { type_name, kind } => {
                write!(f, "register {{ type_name: {type_name}, kind: {kind} }}")
            }
            LocatorEvent::Resolve { type_name, found } => {
                write!(f, "resolve {{ type_name: {type_name}, found: {found} }}")
            }
            LocatorEvent::Contains { type_name, found } => {
                write!(f, "contains {{ type_name: {type_name}, found: {found} }}")
            }
            LocatorEvent::Reset => f.write_str("Resetting the Registry"),
        }
    }
}

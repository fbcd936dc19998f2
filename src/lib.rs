//! # Service Locator
//!
//! A thread-safe, type-keyed service registry. Independent parts of a program register
//! either a ready-made instance or a factory for a capability type, and other parts
//! later resolve that type without knowing who built it or how.
//!
//! Two registries share one contract, the [`ServiceLocator`] trait:
//!
//! - [`StaticRegistry`] - a single process-wide table, also reachable through the free
//!   functions of this crate. Created on first use, emptied by [`reset`].
//! - [`ScopedRegistry`] - an ordinary value with private storage. Consumers receive it
//!   explicitly, and may hold a non-owning [`WeakRegistry`] to it.
//!
//! ## Quick Start
//!
//! ```rust
//! use service_locator::{register_factory, register_instance, resolve};
//! use std::sync::Arc;
//!
//! trait DataServiceProtocol: Send + Sync {
//!     fn data(&self) -> &str;
//! }
//!
//! struct DataService {
//!     data: String,
//! }
//!
//! impl DataServiceProtocol for DataService {
//!     fn data(&self) -> &str {
//!         &self.data
//!     }
//! }
//!
//! // Trait-object capabilities are registered as `Arc<dyn Trait>`
//! let service: Arc<dyn DataServiceProtocol> = Arc::new(DataService {
//!     data: "my data".to_string(),
//! });
//! register_instance(service);
//!
//! let located: Arc<Arc<dyn DataServiceProtocol>> = resolve().unwrap();
//! assert_eq!(located.data(), "my data");
//!
//! // Factories run on every resolution
//! register_factory(|| vec![0u8; 4]);
//! let buffer: Arc<Vec<u8>> = resolve().unwrap();
//! assert_eq!(buffer.len(), 4);
//! ```
//!
//! ## Resolution
//!
//! Resolving `T` looks up the key of `T`. A stored instance of exactly `T` is returned
//! as the shared `Arc`; a stored factory producing exactly `T` is invoked and its result
//! returned, never cached. Anything else, including a missing registration, yields
//! `None`. Use [`ServiceLocator::try_resolve`] to learn which case occurred.
//!
//! ## Features
//!
//! - **Thread-safe**: one mutex per registry, never held while user code runs
//! - **Re-entrant**: factories and trace callbacks may use the registry they belong to
//! - **Tracing support**: `tracing` events plus an optional per-registry callback

mod locator;
mod locator_error;
mod locator_event;
mod registration;
mod scoped_registry;
mod service_key;
mod service_table;
mod static_registry;

pub use locator::ServiceLocator;
pub use locator_error::ResolveError;
pub use locator_event::{LocatorEvent, RegistrationKind};
pub use scoped_registry::{ScopedRegistry, WeakRegistry};
pub use service_key::ServiceKey;
pub use service_table::{ServiceTable, TraceCallback};
pub use static_registry::{
    clear_trace_callback, contains, register_arc, register_factory, register_instance, reset,
    resolve, resolve_cloned, set_trace_callback, try_resolve, StaticRegistry,
};

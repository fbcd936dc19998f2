//! Pass-through dependency example for service-locator.
//!
//! A manager that only forwards a data service to the worker it creates has to carry
//! that service around. With the process-wide registry the worker locates the service
//! itself and the manager stays free of it.
//!
//! Run with: `RUST_LOG=service_locator=trace cargo run --example pass_through`

use service_locator::{register_instance, reset, resolve_cloned};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

trait DataService: Send + Sync {
    fn fetch_data(&self) -> String;
}

struct InMemoryDataService;

impl DataService for InMemoryDataService {
    fn fetch_data(&self) -> String {
        "rows from memory".to_string()
    }
}

// -----------------------------------------------------------------------------
// Explicit wiring: the manager holds a service it never uses itself
// -----------------------------------------------------------------------------

struct Manager {
    data_service: Arc<dyn DataService>,
}

impl Manager {
    fn do_some_work(&self) -> String {
        Worker {
            data_service: self.data_service.clone(),
        }
        .do_work()
    }
}

struct Worker {
    data_service: Arc<dyn DataService>,
}

impl Worker {
    fn do_work(&self) -> String {
        self.data_service.fetch_data()
    }
}

// -----------------------------------------------------------------------------
// Located: neither type mentions the service in its constructor
// -----------------------------------------------------------------------------

struct LocatingManager;

impl LocatingManager {
    fn do_some_work(&self) -> Option<String> {
        LocatingWorker.do_work()
    }
}

struct LocatingWorker;

impl LocatingWorker {
    fn do_work(&self) -> Option<String> {
        let data_service: Arc<dyn DataService> = resolve_cloned()?;
        Some(data_service.fetch_data())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== service-locator: Pass-Through Dependencies ===\n");

    let service: Arc<dyn DataService> = Arc::new(InMemoryDataService);

    let manager = Manager {
        data_service: service.clone(),
    };
    println!("explicit: {}", manager.do_some_work());

    println!(
        "located (nothing registered): {:?}",
        LocatingManager.do_some_work()
    );

    register_instance(service);
    println!("located: {:?}", LocatingManager.do_some_work());

    reset();
    println!("located (after reset): {:?}", LocatingManager.do_some_work());
}

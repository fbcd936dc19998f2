//! Basic usage example for service-locator.
//!
//! Demonstrates:
//! - Registering a trait-object capability in the process-wide registry
//! - Resolving it without knowing who built it
//! - Registering a factory that runs on every resolution
//! - Handling absent capabilities
//!
//! Run with: `RUST_LOG=service_locator=trace cargo run --example basic_usage`

use service_locator::{contains, register_factory, register_instance, resolve_cloned, try_resolve};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

trait DataServiceProtocol: Send + Sync {
    fn data(&self) -> &str;
}

struct DataService {
    data: String,
}

impl DataServiceProtocol for DataService {
    fn data(&self) -> &str {
        &self.data
    }
}

trait NetworkService: Send + Sync {
    fn fetch_data(&self) -> String;
}

struct MockNetworkService {
    id: usize,
}

impl NetworkService for MockNetworkService {
    fn fetch_data(&self) -> String {
        format!("mock #{} fetched", self.id)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== service-locator: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. Register and resolve an instance
    // -------------------------------------------------------------------------
    println!("1. Registering a DataServiceProtocol instance...");

    let data_service: Arc<dyn DataServiceProtocol> = Arc::new(DataService {
        data: "my data".to_string(),
    });
    register_instance(data_service);

    let service: Option<Arc<dyn DataServiceProtocol>> = resolve_cloned();
    println!("   {}", service.as_ref().map(|s| s.data()).unwrap_or(""));

    // -------------------------------------------------------------------------
    // 2. Register a factory
    // -------------------------------------------------------------------------
    println!("\n2. Registering a NetworkService factory...");

    let created = Arc::new(AtomicUsize::new(0));
    let counter = created.clone();
    register_factory(move || {
        let id = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Arc::new(MockNetworkService { id }) as Arc<dyn NetworkService>
    });

    for _ in 0..3 {
        if let Some(network) = resolve_cloned::<Arc<dyn NetworkService>>() {
            println!("   {}", network.fetch_data());
        }
    }
    println!("   factory invocations: {}", created.load(Ordering::SeqCst));

    // -------------------------------------------------------------------------
    // 3. Handle missing capabilities
    // -------------------------------------------------------------------------
    println!("\n3. Handling missing capabilities...");

    println!("   contains::<Vec<u8>>() = {}", contains::<Vec<u8>>());
    match try_resolve::<Vec<u8>>() {
        Ok(value) => println!("   Found Vec<u8>: {:?}", value),
        Err(e) => println!("   Absent (expected): {e}"),
    }

    println!("\n=== Example Complete ===");
}

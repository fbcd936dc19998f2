//! Service locator injection example for service-locator.
//!
//! The `DataManager` receives a registry up front instead of reaching for the global
//! one, but only keeps a `WeakRegistry` to it so the manager never extends the
//! registry's lifetime.
//!
//! Run with: `RUST_LOG=service_locator=trace cargo run --example locator_injection`

use service_locator::{ScopedRegistry, ServiceLocator, WeakRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

trait NetworkService: Send + Sync {
    fn fetch_data(&self) -> String;
}

struct HttpNetworkService {
    connection: usize,
}

impl NetworkService for HttpNetworkService {
    fn fetch_data(&self) -> String {
        format!("fetched over connection {}", self.connection)
    }
}

struct DataManager {
    service_locator: WeakRegistry,
}

impl DataManager {
    fn new(service_locator: &ScopedRegistry) -> Self {
        Self {
            service_locator: service_locator.downgrade(),
        }
    }

    fn fetch_data_from_network(&self) {
        match self
            .service_locator
            .try_resolve::<Arc<dyn NetworkService>>()
        {
            Ok(network) => println!("   {}", network.fetch_data()),
            Err(e) => println!("   no network service: {e}"),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== service-locator: Service Locator Injection ===\n");

    let registry = ScopedRegistry::new();
    let connections = Arc::new(AtomicUsize::new(0));
    let next = connections.clone();
    registry.register_factory(move || {
        let connection = next.fetch_add(1, Ordering::SeqCst) + 1;
        Arc::new(HttpNetworkService { connection }) as Arc<dyn NetworkService>
    });

    let manager = DataManager::new(&registry);

    println!("1. Fetching while the registry is alive...");
    manager.fetch_data_from_network();
    manager.fetch_data_from_network();

    println!("\n2. Fetching after the registry was dropped...");
    drop(registry);
    manager.fetch_data_from_network();

    println!(
        "\nconnections opened: {}",
        connections.load(Ordering::SeqCst)
    );
}

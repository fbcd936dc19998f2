//! Integration tests for the process-wide registry.
//!
//! NOTE: All tests use #[serial] because they share the single static registry.
//! Each test starts with `reset()` so leftovers from a previous test never leak in.

use serial_test::serial;
use service_locator::{
    contains, register_arc, register_factory, register_instance, reset, resolve, resolve_cloned,
    try_resolve, ResolveError, ServiceLocator, StaticRegistry,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

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
    request: usize,
}

impl NetworkService for MockNetworkService {
    fn fetch_data(&self) -> String {
        format!("response #{}", self.request)
    }
}

#[test]
#[serial]
fn test_data_service_scenario() {
    reset();

    let data_service: Arc<dyn DataServiceProtocol> = Arc::new(DataService {
        data: "my data".to_string(),
    });
    register_instance(data_service);

    let service: Option<Arc<dyn DataServiceProtocol>> = resolve_cloned();
    let printed = service.map(|s| s.data().to_string()).unwrap_or_default();
    println!("{printed}");

    assert_eq!(printed, "my data");
}

#[test]
#[serial]
fn test_network_service_factory_scenario() {
    reset();

    let invocations = Arc::new(AtomicUsize::new(0));
    let counter = invocations.clone();
    register_factory(move || {
        let request = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Arc::new(MockNetworkService { request }) as Arc<dyn NetworkService>
    });

    let responses: Vec<String> = (0..3)
        .filter_map(|_| resolve_cloned::<Arc<dyn NetworkService>>())
        .map(|service| service.fetch_data())
        .collect();

    assert_eq!(invocations.load(Ordering::SeqCst), 3);
    assert_eq!(responses, vec!["response #1", "response #2", "response #3"]);
}

#[test]
#[serial]
fn test_instance_reads_are_idempotent() {
    reset();

    #[derive(Debug, Clone, PartialEq)]
    struct AppConfig {
        database_url: String,
        max_connections: u32,
    }

    let config = AppConfig {
        database_url: "postgresql://localhost/mydb".to_string(),
        max_connections: 100,
    };
    register_instance(config.clone());

    let first: Arc<AppConfig> = resolve().unwrap();
    let second: Arc<AppConfig> = resolve().unwrap();

    assert_eq!(*first, config);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
#[serial]
fn test_reregistration_overwrites() {
    reset();

    register_instance("a".to_string());
    register_instance("b".to_string());

    assert_eq!(resolve_cloned::<String>().as_deref(), Some("b"));
}

#[test]
#[serial]
fn test_unregistered_resolves_to_none() {
    reset();

    struct NeverRegistered;

    assert!(resolve::<NeverRegistered>().is_none());
    assert!(resolve::<u128>().is_none());
    assert!(matches!(
        try_resolve::<u128>(),
        Err(ResolveError::NotRegistered { type_name: "u128" })
    ));
}

#[test]
#[serial]
fn test_reset_clears_instances_and_factories() {
    reset();

    register_instance(1u8);
    register_arc(Arc::new(2u16));
    register_factory(|| 3u32);
    assert!(contains::<u8>() && contains::<u16>() && contains::<u32>());

    reset();

    assert!(resolve::<u8>().is_none());
    assert!(resolve::<u16>().is_none());
    assert!(resolve::<u32>().is_none());
}

#[test]
#[serial]
fn test_structurally_equal_types_do_not_collide() {
    reset();

    struct Primary(String);
    struct Replica(#[allow(dead_code)] String);

    register_instance(Primary("db-1".to_string()));

    assert!(resolve::<Replica>().is_none());
    assert_eq!(resolve::<Primary>().unwrap().0, "db-1");
}

#[test]
#[serial]
fn test_static_handle_and_free_functions_agree() {
    reset();

    StaticRegistry.register_factory(|| 'z');
    assert_eq!(resolve_cloned::<char>(), Some('z'));

    register_instance(0.5f32);
    assert_eq!(StaticRegistry.resolve_cloned::<f32>(), Some(0.5));

    StaticRegistry.reset();
    assert!(!contains::<char>());
}

#[test]
#[serial]
fn test_located_worker_without_pass_through() {
    reset();

    // The manager never holds the data service; the worker locates it when needed.
    struct LocatingManager;
    struct LocatingWorker;

    impl LocatingManager {
        fn do_some_work(&self) -> Option<String> {
            LocatingWorker.do_work()
        }
    }

    impl LocatingWorker {
        fn do_work(&self) -> Option<String> {
            let data_service: Arc<dyn DataServiceProtocol> = resolve_cloned()?;
            Some(data_service.data().to_uppercase())
        }
    }

    assert_eq!(LocatingManager.do_some_work(), None);

    register_instance(Arc::new(DataService {
        data: "located".to_string(),
    }) as Arc<dyn DataServiceProtocol>);

    assert_eq!(LocatingManager.do_some_work().as_deref(), Some("LOCATED"));
}

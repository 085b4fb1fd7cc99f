//! Operation and model discovery.

use remisc::{
    Base, Dxm, DxmRegistry, OperationRegistry, RegistryError, Service,
};

use crate::support::{Clash, ImplicitClash, Inventory, Item, Order, Teapot};

#[test]
fn enumerates_exactly_the_marked_operations() {
    let service = Service::new(Inventory::sample()).unwrap();
    assert_eq!(
        service.operation_names(),
        vec!["_help", "_null", "_stats", "crash", "export", "fail", "index", "list", "list_v2"]
    );
    // `count` has no #[op] marker
    assert!(!service.operation_names().contains(&"count"));
}

#[test]
fn enumeration_is_stable_across_calls() {
    let service = Service::new(Inventory::sample()).unwrap();
    let first: Vec<_> = service.operations().into_iter().cloned().collect();
    let second: Vec<_> = service.operations().into_iter().cloned().collect();
    assert_eq!(first, second);

    let registry = OperationRegistry::<Inventory>::build().unwrap();
    let mut rebuilt: Vec<_> = registry.enumerate().cloned().collect();
    let mut original = first;
    rebuilt.sort_by(|a, b| a.name().cmp(b.name()));
    original.sort_by(|a, b| a.name().cmp(b.name()));
    assert_eq!(rebuilt, original);
}

#[test]
fn implicit_and_explicit_paths() {
    let registry = OperationRegistry::<Inventory>::build().unwrap();
    let path_of = |name: &str| registry.by_name(name).unwrap().descriptor().path().to_string();

    assert_eq!(path_of("list"), "/list");
    assert_eq!(path_of("export"), "/export");
    assert_eq!(path_of("list_v2"), "/v2/list");
    assert_eq!(path_of("index"), "/");
}

#[test]
fn leading_underscore_is_kept_in_the_path() {
    let registry = OperationRegistry::<Inventory>::build().unwrap();
    assert_eq!(registry.by_name("_stats").unwrap().descriptor().path(), "/_stats");
    assert!(registry.by_path("/stats").is_none());
}

#[test]
fn doc_comments_become_help_text() {
    let registry = OperationRegistry::<Inventory>::build().unwrap();
    let help = |name: &str| {
        registry
            .by_name(name)
            .unwrap()
            .descriptor()
            .help()
            .map(str::to_string)
    };

    assert_eq!(help("index").as_deref(), Some("Landing page for the inventory."));
    assert_eq!(
        help("list").as_deref(),
        Some("Lists every item\n    in the inventory.")
    );
    assert_eq!(help("fail"), None);
}

#[test]
fn root_path_declaration_replaces_builtin_root() {
    let registry = OperationRegistry::<Inventory>::build().unwrap();
    assert!(registry.by_name("_root").is_none());
    assert_eq!(registry.by_path("/").unwrap().descriptor().name(), "index");
}

#[test]
fn overriding_builtin_by_name() {
    let service = Service::new(Teapot).unwrap();
    assert_eq!(service.operation_names(), vec!["_help", "_null", "_root"]);
    let null = service
        .operations()
        .into_iter()
        .find(|d| d.name() == "_null")
        .unwrap();
    assert_eq!(null.help(), Some("Short and stout."));
}

#[test]
fn duplicate_paths_fail_at_construction() {
    assert_eq!(
        Service::new(Clash).err(),
        Some(RegistryError::DuplicatePath {
            path: "/same".into(),
            first: "first".into(),
            second: "second".into(),
        })
    );
    assert!(matches!(
        Service::new(ImplicitClash).err(),
        Some(RegistryError::DuplicatePath { ref path, .. }) if path == "/report"
    ));
}

#[test]
fn models_are_exactly_the_declared_ones() {
    assert_eq!(Item::NAME, "Item");
    assert_eq!(Item::DOC, Some("A single inventory item."));
    assert_eq!(Order::NAME, "OrderV1");

    let names: Vec<_> = DxmRegistry::enumerate::<Inventory>()
        .iter()
        .map(|m| m.name())
        .collect();
    assert_eq!(names, vec!["Empty", "Item", "OrderV1"]);

    let base: Vec<_> = DxmRegistry::enumerate::<Base>()
        .iter()
        .map(|m| m.name())
        .collect();
    assert_eq!(base, vec!["Empty"]);
}

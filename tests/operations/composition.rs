//! A service that embeds another service's operations.

use remisc::{OperationRegistry, Request, Service, Status};

use crate::support::Storefront;

fn service() -> Service<Storefront> {
    Service::new(Storefront::sample()).unwrap()
}

#[test]
fn derived_operations_replace_inherited_ones() {
    let service = service();
    assert_eq!(
        service.operation_names(),
        vec!["_help", "_null", "_stats", "crash", "export", "fail", "list", "list_v2", "welcome"]
    );

    assert_eq!(service.handle(&Request::get("/")).body(), "welcome to corner shop");
    assert_eq!(
        service.handle(&Request::get("/list")).body(),
        "corner shop: apple,pear"
    );
}

#[test]
fn inherited_operations_read_the_embedded_state() {
    let service = service();
    assert_eq!(service.handle(&Request::get("/_stats")).body(), "2 items");

    let resp = service.handle(&Request::get("/v2/list"));
    assert_eq!(resp.status(), Status::Ok);
    let body: serde_json::Value = serde_json::from_str(resp.body()).unwrap();
    assert_eq!(body, serde_json::json!(["apple", "pear"]));

    let resp = service.handle(&Request::get("/export?format=xml"));
    assert_eq!(resp.status(), Status::Ok);
}

#[test]
fn inherited_help_text_is_kept() {
    let registry = OperationRegistry::<Storefront>::build().unwrap();
    assert_eq!(
        registry.by_name("list_v2").unwrap().descriptor().help(),
        Some("Version two of the listing, as JSON.")
    );
    assert_eq!(
        registry.by_name("list").unwrap().descriptor().help(),
        Some("Lists the items under the store's name.")
    );
    assert_eq!(registry.by_path("/").unwrap().descriptor().name(), "welcome");
}

#[test]
fn inherited_models_are_documented() {
    let service = service();
    let models: Vec<_> = service.models().iter().map(|m| m.name()).collect();
    assert_eq!(models, vec!["Empty", "Item", "OrderV1"]);

    let resp = service.handle(&Request::get("/_help"));
    let help: serde_json::Value = serde_json::from_str(resp.body()).unwrap();
    assert_eq!(help["models"]["OrderV1"], "An order placed against the inventory.");
    assert!(help["operations"].get("index").is_none());
}

#[test]
fn inherited_failures_are_contained() {
    let service = service();
    assert_eq!(
        service.handle(&Request::get("/crash")).status(),
        Status::InternalServerError
    );
    assert_eq!(service.handle(&Request::get("/")).status(), Status::Ok);
}

//! The built-in `_help` operation.

use remisc::{Base, Request, Service, Status, APPLICATION_JSON};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::support::{Inventory, Teapot};

fn help_of<S: remisc::Operations>(service: &Service<S>) -> (String, Value) {
    let resp = service.handle(&Request::get("/_help"));
    assert_eq!(resp.status(), Status::Ok);
    assert_eq!(resp.content_type(), APPLICATION_JSON);
    let body = resp.into_body();
    let value = serde_json::from_str(&body).unwrap();
    (body, value)
}

fn keys(value: &Value) -> Vec<&str> {
    value.as_object().unwrap().keys().map(String::as_str).collect()
}

#[test]
fn documents_every_operation_and_model() {
    let service = Service::new(Inventory::sample()).unwrap();
    let (_, help) = help_of(&service);

    assert_eq!(keys(&help), vec!["models", "operations"]);
    assert_eq!(keys(&help["operations"]), service.operation_names());
    assert_eq!(keys(&help["models"]), vec!["Empty", "Item", "OrderV1"]);

    assert_eq!(help["operations"]["index"], "Landing page for the inventory.");
    assert_eq!(help["models"]["Item"], "A single inventory item.");
}

#[test]
fn undocumented_operations_are_null() {
    let service = Service::new(Inventory::sample()).unwrap();
    let (_, help) = help_of(&service);
    assert!(help["operations"]["fail"].is_null());
    assert!(help["operations"]["crash"].is_null());
}

#[test]
fn body_is_sorted_with_four_space_indent() {
    let service = Service::new(Inventory::sample()).unwrap();
    let (body, value) = help_of(&service);

    let mut expected = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut expected, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser).unwrap();

    assert_eq!(body, String::from_utf8(expected).unwrap());
    assert!(body.starts_with("{\n    \"models\": {\n        \"Empty\": "));
}

#[test]
fn base_service_help() {
    let service = Service::new(Base).unwrap();
    let (_, help) = help_of(&service);
    assert_eq!(keys(&help["operations"]), vec!["_help", "_null", "_root"]);
    assert_eq!(keys(&help["models"]), vec!["Empty"]);
    assert!(help["operations"]["_root"]
        .as_str()
        .unwrap()
        .starts_with("Defines the root-level operation"));
}

#[test]
fn overridden_builtins_show_the_override() {
    let service = Service::new(Teapot).unwrap();
    let (_, help) = help_of(&service);
    assert_eq!(help["operations"]["_null"], "Short and stout.");
}

#[test]
fn help_does_not_depend_on_method_or_query() {
    let service = Service::new(Inventory::sample()).unwrap();
    let (body, _) = help_of(&service);
    let post = service.handle(&Request::with_method("POST", "/_help?verbose=1"));
    assert_eq!(post.body(), body);
}

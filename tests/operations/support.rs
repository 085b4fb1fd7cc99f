//! Test domain: an inventory service and a storefront that embeds it.

use remisc::{operations, Context, Dxm, HandlerError, Reply};
use serde_json::{json, Value};

/// A single inventory item.
#[derive(Dxm)]
pub struct Item;

/// An order placed against the inventory.
#[derive(Dxm)]
#[dxm(name = "OrderV1")]
pub struct Order;

pub struct Inventory {
    pub items: Vec<String>,
}

impl Inventory {
    pub fn sample() -> Self {
        Self {
            items: vec!["apple".into(), "pear".into()],
        }
    }
}

#[operations(models(Item, Order))]
impl Inventory {
    /// Landing page for the inventory.
    #[op("/")]
    fn index(&self) -> &'static str {
        "inventory"
    }

    /// Lists every item
    ///     in the inventory.
    #[op]
    fn list(&self) -> String {
        self.items.join(",")
    }

    /// Exports the inventory; echoes the parsed query arguments.
    #[op]
    fn export(&self, ctx: &Context) -> Result<Reply, HandlerError> {
        ctx.require("format")?;
        Reply::json(ctx.args())
    }

    /// Version two of the listing, as JSON.
    #[op(path = "/v2/list")]
    fn list_v2(&self) -> Value {
        json!(self.items)
    }

    #[op]
    fn fail(&self) -> Result<String, HandlerError> {
        Err(HandlerError::Failed("storage offline".into()))
    }

    #[op]
    fn crash(&self) -> String {
        panic!("inventory corrupted")
    }

    /// Internal diagnostics.
    #[op]
    fn _stats(&self) -> String {
        format!("{} items", self.count())
    }

    /// Not an operation: no #[op] marker.
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

pub struct Storefront {
    pub name: String,
    pub inventory: Inventory,
}

#[operations(extends(inventory: Inventory))]
impl Storefront {
    /// Greets visitors.
    #[op("/")]
    fn welcome(&self) -> String {
        format!("welcome to {}", self.name)
    }

    /// Lists the items under the store's name.
    #[op]
    fn list(&self) -> String {
        format!("{}: {}", self.name, self.inventory.items.join(","))
    }
}

impl Storefront {
    pub fn sample() -> Self {
        Self {
            name: "corner shop".into(),
            inventory: Inventory::sample(),
        }
    }
}

/// Two operations claiming the same path.
pub struct Clash;

#[operations]
impl Clash {
    #[op("/same")]
    fn first(&self) {}

    #[op("/same")]
    fn second(&self) {}
}

/// An explicit path colliding with an implicit one.
pub struct ImplicitClash;

#[operations]
impl ImplicitClash {
    #[op]
    fn report(&self) {}

    #[op("/report")]
    fn report_v1(&self) {}
}

/// Overrides the built-in root by name; the handler keeps its implicit path.
pub struct Home;

#[operations]
impl Home {
    /// Custom landing page.
    #[op]
    fn _root(&self) -> &'static str {
        "home"
    }
}

/// Moves the fallback to a path of its own.
pub struct Relocated;

#[operations]
impl Relocated {
    #[op("/elsewhere")]
    fn _null(&self) -> &'static str {
        "nothing here"
    }
}

/// Handlers named with raw identifiers.
pub struct Keywords;

#[operations]
impl Keywords {
    /// Reports the item type.
    #[op]
    fn r#type(&self) -> &'static str {
        "fruit"
    }
}

/// Overrides the built-in fallback.
pub struct Teapot;

#[operations]
impl Teapot {
    /// Short and stout.
    #[op]
    fn _null(&self) -> &'static str {
        "I'm a teapot"
    }
}

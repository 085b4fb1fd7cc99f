mod docs;
mod dxm;
mod operations;

use proc_macro::TokenStream;

// ============================================================================
// #[operations] attribute macro
// ============================================================================

/// Attribute macro that turns the `#[op]` methods of an `impl` block into the
/// service's operation table.
///
/// # Usage
///
/// Implicit paths are derived from the method name:
/// ```ignore
/// #[remisc::operations]
/// impl Catalog {
///     /// Lists every item in the catalog.
///     #[op]
///     fn list(&self) -> String {
///         // reachable at /list
///     }
/// }
/// ```
///
/// Explicit paths are given literally:
/// ```ignore
/// #[remisc::operations]
/// impl Catalog {
///     #[op("/v2/list")]
///     fn list_v2(&self, ctx: &remisc::Context) -> remisc::Reply { /* ... */ }
///
///     #[op(path = "/")]
///     fn index(&self) -> &'static str { "catalog" }
/// }
/// ```
///
/// Data exchange models and embedded services:
/// ```ignore
/// #[remisc::operations(models(Item, Order), extends(core: CoreService))]
/// impl Catalog { /* ... */ }
/// ```
///
/// The macro supports:
/// - `#[op]` / `#[op("/path")]` / `#[op(path = "/path")]` on `&self` methods
///   taking either no arguments or a single `&Context`
/// - doc comments on the method become the operation's help text
/// - `models(...)`: types deriving `Dxm` documented alongside the service
/// - `extends(field: Type)`: inherit the operations of an embedded service;
///   the outer service overrides inherited operations by name or path
#[proc_macro_attribute]
pub fn operations(attr: TokenStream, item: TokenStream) -> TokenStream {
    operations::expand(attr, item)
}

// ============================================================================
// #[derive(Dxm)] derive macro
// ============================================================================

/// Derive macro for the `Dxm` (data exchange model) marker trait.
///
/// # Usage
///
/// ```ignore
/// /// A single catalog entry.
/// #[derive(Serialize, Deserialize, Dxm)]
/// struct Item {
///     pub sku: String,
/// }
///
/// #[derive(Dxm)]
/// #[dxm(name = "OrderV2")]
/// struct Order;
/// ```
///
/// - The model name defaults to the type name; `#[dxm(name = "...")]`
///   overrides it.
/// - The type's doc comment becomes the model's documentation.
#[proc_macro_derive(Dxm, attributes(dxm))]
pub fn derive_dxm(input: TokenStream) -> TokenStream {
    dxm::derive_dxm(input)
}

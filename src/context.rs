//! Context passed to operation handlers.
//!
//! Carries the request, its parsed query arguments, and a read-only view of
//! the service's own catalog (operations and models) for introspection.

use crate::descriptor::OperationDescriptor;
use crate::dxm::DxmDescriptor;
use crate::error::HandlerError;
use crate::request::{QueryArgs, Request};

/// Read-only listing of a service's operations and models.
///
/// Operations are fixed at construction; models are enumerated on demand.
pub(crate) struct Catalog {
    operations: Vec<OperationDescriptor>,
    models: fn() -> Vec<DxmDescriptor>,
}

impl Catalog {
    pub(crate) fn new(operations: Vec<OperationDescriptor>, models: fn() -> Vec<DxmDescriptor>) -> Self {
        Self { operations, models }
    }

    pub(crate) fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    pub(crate) fn models(&self) -> Vec<DxmDescriptor> {
        (self.models)()
    }
}

/// The context passed to every operation handler.
///
/// ## Example
///
/// ```ignore
/// #[op]
/// fn export(&self, ctx: &Context) -> Result<String, HandlerError> {
///     let format = ctx.require("format")?;
///     Ok(self.render(format))
/// }
/// ```
pub struct Context<'a> {
    request: &'a Request,
    url: &'a str,
    operation: &'a OperationDescriptor,
    catalog: &'a Catalog,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        request: &'a Request,
        url: &'a str,
        operation: &'a OperationDescriptor,
        catalog: &'a Catalog,
    ) -> Self {
        Self {
            request,
            url,
            operation,
            catalog,
        }
    }

    pub fn request(&self) -> &Request {
        self.request
    }

    pub fn method(&self) -> &str {
        self.request.method()
    }

    /// The request path as received (not the operation's registered path).
    pub fn path(&self) -> &str {
        self.request.path()
    }

    /// The reconstructed request URL.
    pub fn url(&self) -> &str {
        self.url
    }

    /// Parsed query-string arguments.
    pub fn args(&self) -> &QueryArgs {
        self.request.args()
    }

    /// First value of a query argument.
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.request.args().get(key)
    }

    /// First value of a query argument. Returns `MissingArgument` if absent.
    pub fn require(&self, key: &str) -> Result<&str, HandlerError> {
        self.arg(key)
            .ok_or_else(|| HandlerError::MissingArgument(key.to_string()))
    }

    /// Check if the query contains an argument.
    pub fn has_arg(&self, key: &str) -> bool {
        self.request.args().contains(key)
    }

    /// Check if the query contains all specified arguments.
    pub fn has_args(&self, keys: &[&str]) -> bool {
        keys.iter().all(|k| self.has_arg(k))
    }

    /// The descriptor of the operation being invoked.
    pub fn operation(&self) -> &OperationDescriptor {
        self.operation
    }

    /// Every operation of the service, sorted by name.
    pub fn operations(&self) -> &[OperationDescriptor] {
        self.catalog.operations()
    }

    /// Every data exchange model documented with the service.
    pub fn models(&self) -> Vec<DxmDescriptor> {
        self.catalog.models()
    }
}

//! Service: the aggregate a host server talks to.
//!
//! `Service<S>` owns the user's state value and a dispatcher built from the
//! operations `S` declares. `handle` is the single host-facing entry point.
//!
//! ## Example
//!
//! ```ignore
//! use remisc::{operations, Request, Service};
//!
//! struct Catalog { items: Vec<String> }
//!
//! #[operations]
//! impl Catalog {
//!     /// Lists every item.
//!     #[op]
//!     fn list(&self) -> String {
//!         self.items.join("\n")
//!     }
//! }
//!
//! let service = Service::new(Catalog { items: vec!["a".into()] })?;
//! let response = service.handle(&Request::get("/list"));
//! assert_eq!(response.status_line(), "200 OK");
//! ```

use crate::config::ServiceConfig;
use crate::descriptor::OperationDescriptor;
use crate::dispatcher::Dispatcher;
use crate::dxm::{DxmDescriptor, DxmRegistry};
use crate::error::{DispatchError, RegistryError};
use crate::registry::Operations;
use crate::reply::Reply;
use crate::request::Request;
use crate::response::Response;

/// A service instance: state plus its fixed operation set.
///
/// Read-only after construction; share it behind `Arc` across host workers.
pub struct Service<S> {
    state: S,
    dispatcher: Dispatcher<S>,
}

impl<S: Operations> Service<S> {
    /// Create a service with the default configuration.
    pub fn new(state: S) -> Result<Self, RegistryError> {
        Self::with_config(state, ServiceConfig::default())
    }

    /// Create a service with the given configuration.
    ///
    /// This is where the operation set becomes fixed; a defective definition
    /// (malformed path, duplicate path or name) fails here.
    pub fn with_config(state: S, config: ServiceConfig) -> Result<Self, RegistryError> {
        let dispatcher = Dispatcher::new(config)?;
        tracing::debug!(
            service = std::any::type_name::<S>(),
            operations = dispatcher.registry().len(),
            "service constructed"
        );
        Ok(Self { state, dispatcher })
    }

    /// Models documented with this service, enumerated on demand.
    pub fn models(&self) -> Vec<DxmDescriptor> {
        DxmRegistry::enumerate::<S>()
    }
}

impl<S> Service<S> {
    /// Handle one request. Never fails: every fault becomes a response.
    pub fn handle(&self, request: &Request) -> Response {
        self.dispatcher.dispatch(&self.state, request)
    }

    /// Invoke an operation by name with the given request's arguments.
    pub fn invoke(&self, name: &str, request: &Request) -> Result<Reply, DispatchError> {
        self.dispatcher.invoke(&self.state, name, request)
    }

    /// Descriptors of every routable operation, sorted by path.
    pub fn operations(&self) -> Vec<&OperationDescriptor> {
        self.dispatcher.registry().enumerate().collect()
    }

    /// Operation names, sorted.
    pub fn operation_names(&self) -> Vec<&str> {
        self.dispatcher.registry().names()
    }

    /// The configuration the service was built with.
    pub fn config(&self) -> &ServiceConfig {
        self.dispatcher.config()
    }

    /// The user state the operations run against.
    pub fn state(&self) -> &S {
        &self.state
    }
}

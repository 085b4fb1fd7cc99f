//! Dispatcher: one request, from route to response.
//!
//! ```text
//! RECEIVED → ROUTED → INVOKED → RESPONDED
//! RECEIVED → ROUTED → INVOKED → FAILED → RESPONDED
//! RECEIVED → NOT_FOUND → RESPONDED
//! ```
//!
//! Every request-time failure, handler panics included, is turned into a
//! response here. Nothing escapes to the host server.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, info};

use crate::config::ServiceConfig;
use crate::context::{Catalog, Context};
use crate::descriptor::Operation;
use crate::dxm::DxmRegistry;
use crate::error::{DispatchError, HandlerError, RegistryError};
use crate::registry::{OperationRegistry, Operations};
use crate::reply::{Reply, TEXT_PLAIN};
use crate::request::Request;
use crate::response::{Response, Status};
use crate::router::Router;

const OPTIONS: &str = "OPTIONS";

/// Routes requests for service type `S` and turns every outcome into a
/// `Response`.
pub struct Dispatcher<S> {
    registry: OperationRegistry<S>,
    router: Router,
    catalog: Catalog,
    config: ServiceConfig,
}

impl<S: Operations> Dispatcher<S> {
    /// Build the registry and router for `S`. Fails on a defective
    /// service definition.
    pub fn new(config: ServiceConfig) -> Result<Self, RegistryError> {
        let registry = OperationRegistry::<S>::build()?;
        let router = Router::new(&registry, config.not_found)?;

        let mut operations: Vec<_> = registry.enumerate().cloned().collect();
        operations.sort_by(|a, b| a.name().cmp(b.name()));
        let catalog = Catalog::new(operations, DxmRegistry::enumerate::<S>);

        Ok(Self {
            registry,
            router,
            catalog,
            config,
        })
    }
}

impl<S> Dispatcher<S> {
    /// The resolved operation table.
    pub fn registry(&self) -> &OperationRegistry<S> {
        &self.registry
    }

    /// The path table built from the registry.
    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Handle one request against `service`.
    pub fn dispatch(&self, service: &S, request: &Request) -> Response {
        let url = request.url();
        match self.try_dispatch(service, request, &url) {
            Ok(response) => response,
            Err(err) => self.error_response(&url, &err),
        }
    }

    /// Invoke an operation by name, bypassing the router and method checks.
    pub fn invoke(&self, service: &S, name: &str, request: &Request) -> Result<Reply, DispatchError> {
        let operation = self
            .registry
            .by_name(name)
            .ok_or_else(|| DispatchError::RouteNotFound(name.to_string()))?;
        self.invoke_operation(service, operation, request, &request.url())
    }

    fn try_dispatch(&self, service: &S, request: &Request, url: &str) -> Result<Response, DispatchError> {
        let route = self.router.resolve(request.path())?;
        let operation = self.registry.get(route.index);
        let descriptor = operation.descriptor();

        info!(
            url,
            method = request.method(),
            operation = descriptor.name(),
            route = ?route.kind,
            "routed"
        );

        if request.method() == OPTIONS {
            return Ok(Response::new(Status::Ok, TEXT_PLAIN, descriptor.summary()));
        }

        if !self.config.allows(request.method()) {
            return Err(DispatchError::MethodNotSupported {
                method: request.method().to_string(),
                path: request.path().to_string(),
            });
        }

        let reply = self.invoke_operation(service, operation, request, url)?;
        let body = reply.render().map_err(|source| DispatchError::HandlerFault {
            operation: descriptor.name().to_string(),
            source,
        })?;
        Ok(Response::new(Status::Ok, reply.content_type(), body))
    }

    fn invoke_operation(
        &self,
        service: &S,
        operation: &Operation<S>,
        request: &Request,
        url: &str,
    ) -> Result<Reply, DispatchError> {
        let descriptor = operation.descriptor();
        let ctx = Context::new(request, url, descriptor, &self.catalog);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| operation.call(service, &ctx)));
        let result = match outcome {
            Ok(result) => result,
            Err(payload) => Err(HandlerError::Panicked(panic_message(payload.as_ref()))),
        };

        result.map_err(|source| DispatchError::HandlerFault {
            operation: descriptor.name().to_string(),
            source,
        })
    }

    fn error_response(&self, url: &str, err: &DispatchError) -> Response {
        match err {
            DispatchError::HandlerFault { operation, source } => {
                error!(url, operation = operation.as_str(), error = %source, "operation failed");
            }
            _ => debug!(url, error = %err, "request rejected"),
        }

        let detail = match err {
            DispatchError::HandlerFault { .. } if self.config.debug => Some(err.to_string()),
            _ => None,
        };
        Response::from_status(err.status(), detail.as_deref())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

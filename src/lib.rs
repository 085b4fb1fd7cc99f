//! remisc: self-describing HTTP microservices.
//!
//! Operations are ordinary methods marked with `#[op]` inside an
//! `#[operations]` impl block. The macro records each operation's path and
//! doc comment at compile time; a `Service` built from the type routes
//! requests to them, catches every failure, and documents itself at `/_help`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use remisc::{operations, Context, Dxm, HandlerError, Request, Service};
//!
//! /// One row of the export.
//! #[derive(Dxm)]
//! struct Row;
//!
//! struct Reports;
//!
//! #[operations(models(Row))]
//! impl Reports {
//!     /// The landing page.
//!     #[op("/")]
//!     fn index(&self) -> &'static str {
//!         "reports"
//!     }
//!
//!     /// Exports every report in the requested format.
//!     #[op]
//!     fn export(&self, ctx: &Context) -> Result<String, HandlerError> {
//!         Ok(format!("exporting as {}", ctx.require("format")?))
//!     }
//! }
//!
//! let service = Service::new(Reports)?;
//! let response = service.handle(&Request::get("/export?format=csv"));
//! assert_eq!(response.body(), "exporting as csv");
//!
//! // HTTP transport (requires "http" feature)
//! // remisc::http::serve(Arc::new(service), "127.0.0.1:8000").await?;
//! ```
//!
//! ## Reserved operations
//!
//! Every service inherits `_root` (`/`), `_null` (`/_null`, the fallback for
//! unmatched paths) and `_help` (`/_help`). Declaring an operation with the
//! same name or path overrides the built-in.

extern crate self as remisc;

mod base;
mod config;
mod context;
mod descriptor;
mod dispatcher;
mod dxm;
mod error;
mod registry;
mod reply;
mod request;
mod response;
mod router;
mod service;

pub mod logging;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
pub mod http;

pub use base::{
    Base, Empty, FAVICON_PATH, HELP_PATH, NULL_NAME, NULL_PATH, ROOT_BODY, ROOT_NAME, ROOT_PATH,
};
pub use config::{ConfigError, NotFoundPolicy, ServiceConfig};
pub use context::Context;
pub use descriptor::{Operation, OperationDescriptor, SEPARATOR};
pub use dispatcher::Dispatcher;
pub use dxm::{Dxm, DxmDescriptor, DxmRegistry};
pub use error::{DispatchError, HandlerError, RegistryError};
pub use registry::{OperationRegistry, Operations};
pub use reply::{IntoReply, Reply, APPLICATION_JSON, TEXT_PLAIN};
pub use request::{QueryArgs, Request};
pub use response::{Response, Status};
pub use router::{Route, RouteKind, Router};
pub use service::Service;

pub use remisc_macros::{operations, Dxm};

//! Operation descriptors and the handlers bound to them.
//!
//! An `OperationDescriptor` records the three facts that make a function
//! routable: its name, its path, and its help text. Descriptors are normally
//! produced at compile time by `#[operations]`, but they can be built by hand:
//!
//! ```ignore
//! use remisc::{Operation, OperationDescriptor, Reply};
//!
//! // Implicit: the path is derived from the name ("/list")
//! let list = OperationDescriptor::implicit("list", Some("Lists everything."));
//!
//! // Explicit: the path is given literally
//! let index = OperationDescriptor::explicit("index", "/", None);
//!
//! let op = Operation::new(list, |svc: &Catalog, _ctx| Ok(Reply::text(svc.render())));
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::context::Context;
use crate::error::{HandlerError, RegistryError};
use crate::reply::Reply;

/// Separator that starts every operation path.
pub const SEPARATOR: char = '/';

/// Immutable metadata of one routable operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OperationDescriptor {
    name: String,
    path: String,
    help: Option<String>,
}

impl OperationDescriptor {
    /// A descriptor whose path is the separator followed by `name`.
    ///
    /// The name is used literally, leading underscores included
    /// (`_help` → `/_help`).
    pub fn implicit(name: &str, help: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            path: format!("{SEPARATOR}{name}"),
            help: help.map(str::to_string),
        }
    }

    /// A descriptor with a literal path, independent of the name.
    pub fn explicit(name: &str, path: &str, help: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            help: help.map(str::to_string),
        }
    }

    /// The operation name (the handler's identifier).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The routable path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The handler's documentation, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The help text collapsed onto a single line. Empty when undocumented.
    pub fn summary(&self) -> String {
        self.help
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check the descriptor's invariants.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let malformed = |reason: &str| RegistryError::MalformedDescriptor {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(malformed("name is empty"));
        }
        if !self.path.starts_with(SEPARATOR) {
            return Err(malformed("path must start with `/`"));
        }
        if self
            .path
            .chars()
            .any(|c| c.is_whitespace() || c == '?' || c == '#')
        {
            return Err(malformed("path cannot contain whitespace, `?` or `#`"));
        }
        Ok(())
    }
}

pub(crate) type Handler<S> =
    Arc<dyn Fn(&S, &Context<'_>) -> Result<Reply, HandlerError> + Send + Sync>;

/// A descriptor bound to the handler that implements it on service type `S`.
pub struct Operation<S> {
    descriptor: OperationDescriptor,
    handler: Handler<S>,
}

impl<S: 'static> Operation<S> {
    /// Bind a handler to a descriptor.
    pub fn new<F>(descriptor: OperationDescriptor, handler: F) -> Self
    where
        F: Fn(&S, &Context<'_>) -> Result<Reply, HandlerError> + Send + Sync + 'static,
    {
        Self {
            descriptor,
            handler: Arc::new(handler),
        }
    }

    /// Re-home this operation onto an outer service that embeds `S`.
    ///
    /// `project` borrows the embedded service out of the outer one; the
    /// descriptor is unchanged.
    pub fn lift<P: 'static>(self, project: fn(&P) -> &S) -> Operation<P> {
        let handler = self.handler;
        Operation {
            descriptor: self.descriptor,
            handler: Arc::new(move |outer: &P, ctx: &Context<'_>| handler(project(outer), ctx)),
        }
    }
}

impl<S> Operation<S> {
    /// The operation's metadata.
    pub fn descriptor(&self) -> &OperationDescriptor {
        &self.descriptor
    }

    pub(crate) fn call(&self, service: &S, ctx: &Context<'_>) -> Result<Reply, HandlerError> {
        (self.handler)(service, ctx)
    }
}

impl<S> Clone for Operation<S> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<S> fmt::Debug for Operation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

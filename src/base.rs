//! The base service: operations and models every service inherits.
//!
//! - `_root` at `/`, reached when no path is given.
//! - `_null` at `/_null`, the fallback for unmatched paths.
//! - `_help` at `/_help`, documents the service's operations and models.
//!
//! A service overrides any of these by declaring an operation with the same
//! name or the same path. An override of `_root` or `_null` by name keeps
//! its slot even when it is declared at a different path.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::context::Context;
use crate::descriptor::{Operation, OperationDescriptor};
use crate::dxm::DxmDescriptor;
use crate::error::HandlerError;
use crate::registry::Operations;
use crate::reply::Reply;

pub const ROOT_PATH: &str = "/";
pub const NULL_PATH: &str = "/_null";
pub const HELP_PATH: &str = "/_help";
pub const FAVICON_PATH: &str = "/favicon.ico";

pub const ROOT_NAME: &str = "_root";
pub const NULL_NAME: &str = "_null";

pub const ROOT_BODY: &str = "Here is the base.";

const ROOT_HELP: &str = "Defines the root-level operation, where no arguments have been provided.";
const NULL_HELP: &str = "The default service response/operation: returns an empty string.";
const HELP_HELP: &str = "Returns documentation of this service's operations and related data \
exchange models (DXMs). Operations are the #[op] methods of the service; DXMs are the models \
declared alongside it.";

/// The built-in operations, bound to any service type.
pub(crate) fn builtins<S: 'static>() -> Vec<Operation<S>> {
    vec![
        Operation::new(
            OperationDescriptor::explicit(ROOT_NAME, ROOT_PATH, Some(ROOT_HELP)),
            |_, _| Ok(Reply::text(ROOT_BODY)),
        ),
        Operation::new(
            OperationDescriptor::implicit(NULL_NAME, Some(NULL_HELP)),
            |_, _| Ok(Reply::text("")),
        ),
        Operation::new(
            OperationDescriptor::implicit("_help", Some(HELP_HELP)),
            |_, ctx| help(ctx),
        ),
    ]
}

/// The built-in models.
pub(crate) fn models() -> Vec<DxmDescriptor> {
    vec![DxmDescriptor::of::<Empty>()]
}

#[derive(Serialize)]
struct HelpDocument<'a> {
    models: BTreeMap<&'a str, Option<&'a str>>,
    operations: BTreeMap<&'a str, Option<&'a str>>,
}

/// Builds the help payload from the catalog alone; no operation is invoked.
fn help(ctx: &Context<'_>) -> Result<Reply, HandlerError> {
    let models = ctx.models();
    let document = HelpDocument {
        models: models.iter().map(|m| (m.name(), m.doc())).collect(),
        operations: ctx
            .operations()
            .iter()
            .map(|op| (op.name(), op.help()))
            .collect(),
    };
    Reply::json(&document)
}

/// A service with nothing but the built-in operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base;

impl Operations for Base {
    fn declared() -> Vec<Operation<Self>> {
        Vec::new()
    }
}

/// This is an empty model used to define a data exchange model for testing,
/// demonstration, and (although completely unnecessary) extension purposes.
#[derive(Debug, Clone, Copy, Default, Serialize, remisc_macros::Dxm)]
pub struct Empty;

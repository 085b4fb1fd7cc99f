//! Router: maps a request path onto a registered operation.
//!
//! 1. The query string and fragment are stripped.
//! 2. An empty path or `/` goes to the root operation.
//! 3. Anything else must match a registered path exactly.
//! 4. Unmatched paths (including `/favicon.ico`) go to the null operation,
//!    or fail with `RouteNotFound` under the strict policy.

use std::collections::HashMap;

use crate::base::{NULL_NAME, NULL_PATH, ROOT_NAME, ROOT_PATH};
use crate::config::NotFoundPolicy;
use crate::error::{DispatchError, RegistryError};
use crate::registry::OperationRegistry;

/// How a path was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Root,
    Exact,
    Fallback,
}

/// A resolved route: the kind of match and the operation's slot in the
/// registry it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub kind: RouteKind,
    pub(crate) index: usize,
}

/// Path table built once from an `OperationRegistry`. Read-only afterwards.
#[derive(Debug, Clone)]
pub struct Router {
    policy: NotFoundPolicy,
    table: HashMap<String, usize>,
    root: usize,
    fallback: usize,
}

impl Router {
    /// Build the path table for `registry`.
    ///
    /// The root slot is the operation at `/`, else the one named `_root`; the
    /// fallback slot is the operation at `/_null`, else the one named `_null`.
    pub fn new<S>(registry: &OperationRegistry<S>, policy: NotFoundPolicy) -> Result<Self, RegistryError> {
        let root = reserved(registry, ROOT_PATH, ROOT_NAME)?;
        let fallback = reserved(registry, NULL_PATH, NULL_NAME)?;

        let table = registry
            .paths()
            .map(|(path, index)| (path.to_string(), index))
            .collect();

        Ok(Self {
            policy,
            table,
            root,
            fallback,
        })
    }

    /// The not-found policy this router was built with.
    pub fn policy(&self) -> NotFoundPolicy {
        self.policy
    }

    /// Resolve a request path (query and fragment allowed) to a route.
    pub fn resolve(&self, path: &str) -> Result<Route, DispatchError> {
        let path = normalize(path);

        if path.is_empty() || path == ROOT_PATH {
            return Ok(Route {
                kind: RouteKind::Root,
                index: self.root,
            });
        }

        if let Some(&index) = self.table.get(path) {
            return Ok(Route {
                kind: RouteKind::Exact,
                index,
            });
        }

        match self.policy {
            NotFoundPolicy::Fallback => Ok(Route {
                kind: RouteKind::Fallback,
                index: self.fallback,
            }),
            NotFoundPolicy::Strict => Err(DispatchError::RouteNotFound(path.to_string())),
        }
    }
}

fn reserved<S>(registry: &OperationRegistry<S>, path: &str, name: &str) -> Result<usize, RegistryError> {
    registry
        .index_of_path(path)
        .or_else(|| registry.index_of_name(name))
        .ok_or_else(|| RegistryError::MissingReserved(path.to_string()))
}

/// The routing portion of a path: everything before `?` or `#`.
pub fn normalize(path: &str) -> &str {
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    &path[..end]
}

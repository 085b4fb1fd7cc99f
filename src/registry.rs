//! OperationRegistry: the capability table of a service type.
//!
//! The table is assembled once, from levels ordered base first:
//!
//! 1. the built-in operations (`_root`, `_null`, `_help`)
//! 2. operations inherited from embedded services (`extends(...)`)
//! 3. the operations the type declares itself
//!
//! A later level overrides an earlier one: an operation replaces every
//! inherited operation that shares its name or its path. Within a single
//! level, duplicate names and duplicate paths are construction errors.

use std::collections::{HashMap, HashSet};

use crate::base;
use crate::descriptor::{Operation, OperationDescriptor};
use crate::dxm::DxmDescriptor;
use crate::error::RegistryError;

/// A service type whose operations are known at definition time.
///
/// Normally implemented by `#[operations]`:
///
/// ```ignore
/// #[remisc::operations(models(Item))]
/// impl Catalog {
///     /// Lists every item.
///     #[op]
///     fn list(&self) -> String { /* ... */ }
/// }
/// ```
pub trait Operations: Sized + Send + Sync + 'static {
    /// Operations declared directly on this type.
    fn declared() -> Vec<Operation<Self>>;

    /// Operations inherited from embedded services, base-most level first.
    fn inherited() -> Vec<Vec<Operation<Self>>> {
        Vec::new()
    }

    /// Models documented alongside this type (and the services it embeds).
    fn models() -> Vec<DxmDescriptor> {
        Vec::new()
    }
}

/// Resolved operations of one service type, indexed by path and name.
pub struct OperationRegistry<S> {
    operations: Vec<Operation<S>>,
    by_path: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl<S: Operations> OperationRegistry<S> {
    /// Build the registry for `S`: built-ins, then inherited levels, then
    /// the type's own declarations.
    pub fn build() -> Result<Self, RegistryError> {
        let mut levels = vec![base::builtins::<S>()];
        levels.extend(S::inherited());
        levels.push(S::declared());
        Self::from_levels(levels)
    }
}

impl<S: 'static> OperationRegistry<S> {
    /// Layer explicit levels, base-most first.
    pub fn from_levels<I>(levels: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Vec<Operation<S>>>,
    {
        let mut resolved: Vec<Operation<S>> = Vec::new();

        for level in levels {
            check_level(&level)?;
            for op in level {
                let d = op.descriptor();
                resolved.retain(|existing| {
                    let e = existing.descriptor();
                    e.name() != d.name() && e.path() != d.path()
                });
                resolved.push(op);
            }
        }

        resolved.sort_by(|a, b| a.descriptor().path().cmp(b.descriptor().path()));

        let by_path = resolved
            .iter()
            .enumerate()
            .map(|(i, op)| (op.descriptor().path().to_string(), i))
            .collect();
        let by_name = resolved
            .iter()
            .enumerate()
            .map(|(i, op)| (op.descriptor().name().to_string(), i))
            .collect();

        Ok(Self {
            operations: resolved,
            by_path,
            by_name,
        })
    }
}

impl<S> OperationRegistry<S> {
    /// Every routable operation's descriptor. Order is not part of the
    /// contract.
    pub fn enumerate(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.iter().map(Operation::descriptor)
    }

    /// Operation names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.enumerate().map(OperationDescriptor::name).collect();
        names.sort_unstable();
        names
    }

    /// The operation registered at `path`, matched exactly.
    pub fn by_path(&self, path: &str) -> Option<&Operation<S>> {
        self.by_path.get(path).map(|&i| &self.operations[i])
    }

    /// The operation with the given name.
    pub fn by_name(&self, name: &str) -> Option<&Operation<S>> {
        self.by_name.get(name).map(|&i| &self.operations[i])
    }

    /// Number of routable operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub(crate) fn index_of_path(&self, path: &str) -> Option<usize> {
        self.by_path.get(path).copied()
    }

    pub(crate) fn index_of_name(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub(crate) fn paths(&self) -> impl Iterator<Item = (&str, usize)> {
        self.by_path.iter().map(|(p, &i)| (p.as_str(), i))
    }

    pub(crate) fn get(&self, index: usize) -> &Operation<S> {
        &self.operations[index]
    }
}

fn check_level<S>(level: &[Operation<S>]) -> Result<(), RegistryError> {
    let mut names = HashSet::new();
    let mut paths: HashMap<&str, &str> = HashMap::new();

    for op in level {
        let d = op.descriptor();
        d.validate()?;

        if !names.insert(d.name()) {
            return Err(RegistryError::DuplicateName(d.name().to_string()));
        }
        if let Some(first) = paths.insert(d.path(), d.name()) {
            return Err(RegistryError::DuplicatePath {
                path: d.path().to_string(),
                first: first.to_string(),
                second: d.name().to_string(),
            });
        }
    }
    Ok(())
}

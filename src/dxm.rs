//! Data exchange models (DXMs).
//!
//! A DXM is any type marked with `#[derive(Dxm)]`. It has no runtime
//! behavior here; its name and doc comment are surfaced by the help
//! operation. Models are tied to a service with
//! `#[operations(models(...))]`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::base;
use crate::registry::Operations;

/// Marker for documented data exchange models.
///
/// Both facts are associated constants, readable without an instance.
pub trait Dxm {
    const NAME: &'static str;
    const DOC: Option<&'static str>;
}

/// Name and documentation of one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DxmDescriptor {
    name: &'static str,
    doc: Option<&'static str>,
}

impl DxmDescriptor {
    pub const fn new(name: &'static str, doc: Option<&'static str>) -> Self {
        Self { name, doc }
    }

    pub fn of<T: Dxm + ?Sized>() -> Self {
        Self::new(T::NAME, T::DOC)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn doc(&self) -> Option<&'static str> {
        self.doc
    }
}

/// Enumerates the models in a service's definition scope.
pub struct DxmRegistry;

impl DxmRegistry {
    /// The base models plus everything `S` declares or inherits, sorted by
    /// name. A later declaration of a name replaces an earlier one.
    pub fn enumerate<S: Operations>() -> Vec<DxmDescriptor> {
        let mut by_name = BTreeMap::new();
        for model in base::models().into_iter().chain(S::models()) {
            by_name.insert(model.name(), model);
        }
        by_name.into_values().collect()
    }
}

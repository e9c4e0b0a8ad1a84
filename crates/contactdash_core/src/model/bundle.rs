//! Bundle catalog record.
//!
//! # Responsibility
//! - Define the descriptor for one sub-type of an entity kind.
//! - Expose the cleaned authorization-role view used by derivation.
//!
//! # Invariants
//! - `id` is a stable machine name assigned by the host framework.
//! - `roles` is only meaningful for role-bearing bundle types; it may carry
//!   blank placeholder entries that consumers must filter out.

use crate::model::entity_type::is_valid_machine_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Catalog descriptor for one bundle of an entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleDescriptor {
    /// Stable machine name, e.g. `main`.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Authorization-role identifiers required to use this bundle.
    ///
    /// Role-bearing bundle types persist placeholder entries for unchecked
    /// options, so blank strings may appear here.
    #[serde(default)]
    pub roles: BTreeSet<String>,
}

impl BundleDescriptor {
    /// Creates a bundle descriptor with no roles.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            roles: BTreeSet::new(),
        }
    }

    /// Returns the declared roles with blank entries removed.
    pub fn non_empty_roles(&self) -> BTreeSet<String> {
        self.roles
            .iter()
            .filter(|role| !role.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Validates identifier and label invariants.
    ///
    /// # Errors
    /// - `InvalidId` when `id` is not a machine name.
    /// - `EmptyLabel` when `label` is blank.
    pub fn validate(&self) -> Result<(), BundleValidationError> {
        if !is_valid_machine_name(&self.id) {
            return Err(BundleValidationError::InvalidId(self.id.clone()));
        }
        if self.label.trim().is_empty() {
            return Err(BundleValidationError::EmptyLabel(self.id.clone()));
        }
        Ok(())
    }
}

/// Bundle descriptor validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleValidationError {
    InvalidId(String),
    EmptyLabel(String),
}

impl Display for BundleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "bundle id is not a machine name: {value}"),
            Self::EmptyLabel(id) => write!(f, "bundle label must not be empty: {id}"),
        }
    }
}

impl Error for BundleValidationError {}

//! Entity type registry contract and in-memory implementation.
//!
//! # Responsibility
//! - Expose the full entity-type catalog to derivation.
//! - Validate descriptors on registration.
//!
//! # Invariants
//! - One descriptor per entity type id.
//! - `all()` returns descriptors in a stable, registry-defined order.

use crate::model::entity_type::EntityTypeDescriptor;
use crate::registry::{RegistryError, RegistryResult};
use std::collections::BTreeMap;

/// Read-side contract for the host entity-type catalog.
pub trait EntityTypeRegistry {
    /// Returns every known entity-type descriptor.
    fn all(&self) -> RegistryResult<Vec<EntityTypeDescriptor>>;
}

/// In-process entity-type registry.
#[derive(Debug, Default)]
pub struct InMemoryEntityTypeRegistry {
    entries: BTreeMap<String, EntityTypeDescriptor>,
}

impl InMemoryEntityTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one descriptor after validation.
    pub fn register(&mut self, entity_type: EntityTypeDescriptor) -> RegistryResult<()> {
        entity_type.validate()?;
        if self.entries.contains_key(entity_type.id.as_str()) {
            return Err(RegistryError::DuplicateId(entity_type.id));
        }

        self.entries.insert(entity_type.id.clone(), entity_type);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, entity_type_id: &str) -> Option<&EntityTypeDescriptor> {
        self.entries.get(entity_type_id)
    }
}

impl EntityTypeRegistry for InMemoryEntityTypeRegistry {
    fn all(&self) -> RegistryResult<Vec<EntityTypeDescriptor>> {
        Ok(self.entries.values().cloned().collect())
    }
}

//! Bundle registry contracts and in-memory implementations.
//!
//! # Responsibility
//! - Enumerate bundle instances per bundle-defining type.
//! - Resolve individual role-bearing bundle instances by id.
//!
//! # Invariants
//! - Bundle ids are unique within one bundle type.
//! - A role-bearing lookup returning `None` is a legal outcome, not a fault.

use crate::model::bundle::BundleDescriptor;
use crate::model::entity_type::{is_valid_machine_name, EntityTypeValidationError};
use crate::registry::{RegistryError, RegistryResult};
use std::collections::BTreeMap;

/// Read-side contract for enumerating bundles of one bundle-defining type.
pub trait BundleRegistry {
    /// Loads every bundle instance of `bundle_type_id`, keyed by bundle id.
    fn load_all(&self, bundle_type_id: &str) -> RegistryResult<BTreeMap<String, BundleDescriptor>>;
}

/// Read-side contract for resolving role-bearing bundle instances.
///
/// Only the distinguished profile-like entity kind consults this registry.
/// Absence is explicit: stale or unsynchronized catalogs may legitimately
/// miss an instance.
pub trait RoleBundleRegistry {
    /// Loads one role-bearing bundle instance by bundle id.
    fn load(&self, bundle_id: &str) -> RegistryResult<Option<BundleDescriptor>>;
}

/// In-process bundle registry holding per-bundle-type instance maps.
#[derive(Debug, Default)]
pub struct InMemoryBundleRegistry {
    bundle_types: BTreeMap<String, BTreeMap<String, BundleDescriptor>>,
}

impl InMemoryBundleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bundle-defining type with no instances yet.
    pub fn register_bundle_type(&mut self, bundle_type_id: impl Into<String>) -> RegistryResult<()> {
        let bundle_type_id = bundle_type_id.into();
        if !is_valid_machine_name(&bundle_type_id) {
            return Err(RegistryError::InvalidEntityType(
                EntityTypeValidationError::InvalidId(bundle_type_id),
            ));
        }
        if self.bundle_types.contains_key(bundle_type_id.as_str()) {
            return Err(RegistryError::DuplicateId(bundle_type_id));
        }

        self.bundle_types.insert(bundle_type_id, BTreeMap::new());
        Ok(())
    }

    /// Registers one bundle instance under a known bundle type.
    pub fn register(
        &mut self,
        bundle_type_id: &str,
        bundle: BundleDescriptor,
    ) -> RegistryResult<()> {
        bundle.validate()?;
        let Some(instances) = self.bundle_types.get_mut(bundle_type_id) else {
            return Err(RegistryError::UnknownBundleType(bundle_type_id.to_string()));
        };
        if instances.contains_key(bundle.id.as_str()) {
            return Err(RegistryError::DuplicateId(bundle.id));
        }

        instances.insert(bundle.id.clone(), bundle);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bundle_types.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BundleRegistry for InMemoryBundleRegistry {
    fn load_all(&self, bundle_type_id: &str) -> RegistryResult<BTreeMap<String, BundleDescriptor>> {
        match self.bundle_types.get(bundle_type_id) {
            Some(instances) => Ok(instances.clone()),
            None => Err(RegistryError::UnknownBundleType(bundle_type_id.to_string())),
        }
    }
}

/// In-process role-bearing bundle registry.
#[derive(Debug, Default)]
pub struct InMemoryRoleBundleRegistry {
    entries: BTreeMap<String, BundleDescriptor>,
}

impl InMemoryRoleBundleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one role-bearing bundle instance.
    pub fn register(&mut self, bundle: BundleDescriptor) -> RegistryResult<()> {
        bundle.validate()?;
        if self.entries.contains_key(bundle.id.as_str()) {
            return Err(RegistryError::DuplicateId(bundle.id));
        }

        self.entries.insert(bundle.id.clone(), bundle);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RoleBundleRegistry for InMemoryRoleBundleRegistry {
    fn load(&self, bundle_id: &str) -> RegistryResult<Option<BundleDescriptor>> {
        Ok(self.entries.get(bundle_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BundleRegistry, InMemoryBundleRegistry, InMemoryRoleBundleRegistry, RoleBundleRegistry,
    };
    use crate::model::bundle::BundleDescriptor;
    use crate::registry::RegistryError;

    #[test]
    fn registers_and_loads_bundles_per_type() {
        let mut registry = InMemoryBundleRegistry::new();
        registry
            .register_bundle_type("profile_type")
            .expect("bundle type should register");
        registry
            .register("profile_type", BundleDescriptor::new("main", "Main profile"))
            .expect("main bundle should register");
        registry
            .register("profile_type", BundleDescriptor::new("work", "Work profile"))
            .expect("work bundle should register");

        let bundles = registry
            .load_all("profile_type")
            .expect("known bundle type should load");
        let ids: Vec<&str> = bundles.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["main", "work"]);
    }

    #[test]
    fn load_all_fails_for_unknown_bundle_type() {
        let registry = InMemoryBundleRegistry::new();
        let err = registry
            .load_all("profile_type")
            .expect_err("unknown bundle type must fail");
        assert_eq!(
            err,
            RegistryError::UnknownBundleType("profile_type".to_string())
        );
    }

    #[test]
    fn load_all_returns_empty_map_for_type_without_instances() {
        let mut registry = InMemoryBundleRegistry::new();
        registry
            .register_bundle_type("contact_type")
            .expect("bundle type should register");

        let bundles = registry
            .load_all("contact_type")
            .expect("registered bundle type should load");
        assert!(bundles.is_empty());
    }

    #[test]
    fn rejects_duplicate_bundle_type_and_bundle_ids() {
        let mut registry = InMemoryBundleRegistry::new();
        registry
            .register_bundle_type("profile_type")
            .expect("bundle type should register");
        let type_err = registry
            .register_bundle_type("profile_type")
            .expect_err("duplicate bundle type must fail");
        assert_eq!(type_err, RegistryError::DuplicateId("profile_type".to_string()));

        registry
            .register("profile_type", BundleDescriptor::new("main", "Main profile"))
            .expect("first bundle should register");
        let bundle_err = registry
            .register("profile_type", BundleDescriptor::new("main", "Main again"))
            .expect_err("duplicate bundle must fail");
        assert_eq!(bundle_err, RegistryError::DuplicateId("main".to_string()));
    }

    #[test]
    fn register_rejects_unknown_bundle_type() {
        let mut registry = InMemoryBundleRegistry::new();
        let err = registry
            .register("profile_type", BundleDescriptor::new("main", "Main profile"))
            .expect_err("unregistered bundle type must fail");
        assert_eq!(
            err,
            RegistryError::UnknownBundleType("profile_type".to_string())
        );
    }

    #[test]
    fn role_registry_load_is_explicit_about_absence() {
        let mut registry = InMemoryRoleBundleRegistry::new();
        let mut bundle = BundleDescriptor::new("main", "Main profile");
        bundle.roles = ["editor".to_string()].into_iter().collect();
        registry.register(bundle).expect("bundle should register");

        let loaded = registry
            .load("main")
            .expect("lookup should succeed")
            .expect("registered bundle should resolve");
        assert!(loaded.roles.contains("editor"));

        let missing = registry.load("stale").expect("lookup should succeed");
        assert!(missing.is_none());
    }
}

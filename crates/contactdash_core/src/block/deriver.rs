//! Per-entity-type block definition derivation.
//!
//! # Responsibility
//! - Expand one base block definition into a definition per eligible
//!   (entity type, bundle) pair.
//! - Attach context requirements and role metadata to each definition.
//!
//! # Invariants
//! - Derivative keys are unique per (entity type, bundle) pair.
//! - Every call rebuilds the full map; there is no incremental state.
//! - Registry failures abort the whole pass, never a partial result.

use crate::block::definition::{
    BlockDefinitionTemplate, ContextRequirement, DerivativeDefinition, ENTITY_CONTEXT_KEY,
    USER_CONTEXT_KEY,
};
use crate::registry::bundles::{BundleRegistry, RoleBundleRegistry};
use crate::registry::entity_types::EntityTypeRegistry;
use crate::registry::RegistryError;
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Entity type id of the distinguished user kind.
pub const USER_ENTITY_TYPE_ID: &str = "user";
/// Entity type id of the distinguished role-bearing profile kind.
pub const PROFILE_ENTITY_TYPE_ID: &str = "profile";

/// Result type for derivation APIs.
pub type DeriveResult<T> = Result<T, DeriveError>;

/// Derivation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
    /// An input registry failed; the derivation pass is aborted.
    Registry(RegistryError),
}

impl Display for DeriveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DeriveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
        }
    }
}

impl From<RegistryError> for DeriveError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

/// Generates dashboard block definitions for every eligible entity type and
/// bundle known to the host catalogs.
pub struct EntityBlockDeriver {
    entity_types: Arc<dyn EntityTypeRegistry>,
    bundles: Arc<dyn BundleRegistry>,
    role_bundles: Arc<dyn RoleBundleRegistry>,
}

impl EntityBlockDeriver {
    /// Creates a deriver over the three injected catalogs.
    pub fn new(
        entity_types: Arc<dyn EntityTypeRegistry>,
        bundles: Arc<dyn BundleRegistry>,
        role_bundles: Arc<dyn RoleBundleRegistry>,
    ) -> Self {
        Self {
            entity_types,
            bundles,
            role_bundles,
        }
    }

    /// Derives the full definition map from `base`.
    ///
    /// Eligibility: the entity type must be dashboard-enabled, and must be the
    /// user kind or carry the ownership capability. Each eligible type yields
    /// one definition per bundle instance, or a single `"{id}-{id}"`
    /// definition when it has no bundle-defining type.
    ///
    /// # Errors
    /// Any registry failure aborts the call; no partial map is returned.
    pub fn derive_all(
        &self,
        base: &BlockDefinitionTemplate,
    ) -> DeriveResult<BTreeMap<String, DerivativeDefinition>> {
        let mut derivatives = BTreeMap::new();

        for entity_type in self.entity_types.all()? {
            if !entity_type.dashboard_enabled {
                continue;
            }
            if entity_type.id != USER_ENTITY_TYPE_ID && !entity_type.supports_ownership {
                continue;
            }

            let bundle_ids: Vec<String> = match &entity_type.bundle_entity_type {
                Some(bundle_type) => self.bundles.load_all(bundle_type)?.into_keys().collect(),
                // The type is its own only bundle.
                None => vec![entity_type.id.clone()],
            };

            for bundle_id in bundle_ids {
                let mut definition = DerivativeDefinition::for_entity_type(base, &entity_type);

                // The entity is required for the user kind and for types the
                // dashboard can only display, never edit.
                definition.context.insert(
                    ENTITY_CONTEXT_KEY.to_string(),
                    ContextRequirement {
                        entity_type_id: entity_type.id.clone(),
                        label: entity_type.label.clone(),
                        required: entity_type.id == USER_ENTITY_TYPE_ID || !entity_type.has_forms,
                    },
                );

                // Owned types with forms also take the owning user, so create
                // forms can be prefilled.
                if entity_type.supports_ownership && entity_type.has_forms {
                    definition.context.insert(
                        USER_CONTEXT_KEY.to_string(),
                        ContextRequirement::optional(USER_ENTITY_TYPE_ID, "User"),
                    );
                }

                if entity_type.id == PROFILE_ENTITY_TYPE_ID {
                    match self.role_bundles.load(&bundle_id)? {
                        Some(bundle) => {
                            definition.required_hats = Some(bundle.non_empty_roles());
                        }
                        None => {
                            warn!(
                                "event=role_bundle_missing module=block status=warn \
                                 entity_type={} bundle={bundle_id}",
                                entity_type.id
                            );
                        }
                    }
                }

                let derivative_key = format!("{}-{bundle_id}", entity_type.id);
                derivatives.insert(derivative_key, definition);
            }
        }

        info!(
            "event=derive_all module=block status=ok derivatives={}",
            derivatives.len()
        );
        Ok(derivatives)
    }
}

#[cfg(test)]
mod tests {
    use super::{DeriveError, EntityBlockDeriver};
    use crate::block::definition::BlockDefinitionTemplate;
    use crate::model::entity_type::EntityTypeDescriptor;
    use crate::registry::bundles::{InMemoryBundleRegistry, InMemoryRoleBundleRegistry};
    use crate::registry::entity_types::{EntityTypeRegistry, InMemoryEntityTypeRegistry};
    use crate::registry::{RegistryError, RegistryResult};
    use std::sync::Arc;

    fn deriver_over(entity_types: InMemoryEntityTypeRegistry) -> EntityBlockDeriver {
        EntityBlockDeriver::new(
            Arc::new(entity_types),
            Arc::new(InMemoryBundleRegistry::new()),
            Arc::new(InMemoryRoleBundleRegistry::new()),
        )
    }

    #[test]
    fn empty_catalog_derives_empty_map() {
        let deriver = deriver_over(InMemoryEntityTypeRegistry::new());
        let derivatives = deriver
            .derive_all(&BlockDefinitionTemplate::contact_entity_form_baseline())
            .expect("empty catalog should derive");
        assert!(derivatives.is_empty());
    }

    #[test]
    fn derivation_is_stateless_across_calls() {
        let mut entity_types = InMemoryEntityTypeRegistry::new();
        let mut user = EntityTypeDescriptor::new("user", "User");
        user.dashboard_enabled = true;
        entity_types.register(user).expect("user should register");

        let deriver = deriver_over(entity_types);
        let base = BlockDefinitionTemplate::contact_entity_form_baseline();
        let first = deriver.derive_all(&base).expect("first pass should derive");
        let second = deriver.derive_all(&base).expect("second pass should derive");
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    struct UnavailableEntityTypeRegistry;

    impl EntityTypeRegistry for UnavailableEntityTypeRegistry {
        fn all(&self) -> RegistryResult<Vec<EntityTypeDescriptor>> {
            Err(RegistryError::Unavailable {
                registry: "entity_types",
                message: "catalog backend offline".to_string(),
            })
        }
    }

    #[test]
    fn registry_failure_aborts_derivation() {
        let deriver = EntityBlockDeriver::new(
            Arc::new(UnavailableEntityTypeRegistry),
            Arc::new(InMemoryBundleRegistry::new()),
            Arc::new(InMemoryRoleBundleRegistry::new()),
        );
        let err = deriver
            .derive_all(&BlockDefinitionTemplate::contact_entity_form_baseline())
            .expect_err("unavailable registry must abort derivation");
        assert!(matches!(
            err,
            DeriveError::Registry(RegistryError::Unavailable { .. })
        ));
    }
}

//! Block definition records and the derivative wire contract.
//!
//! # Responsibility
//! - Define the base template a deriver expands per (entity type, bundle).
//! - Define the generated definition record and its serialized field names.
//!
//! # Invariants
//! - Serialized field names (`admin_label`, `context`, `_entity_type_id`,
//!   `_has_forms`, `_allow_create`, `_bundle_key`, `_required_hats`) are a
//!   contract other framework code binds to.
//! - `_required_hats` is omitted entirely when no role data applies.

use crate::model::entity_type::EntityTypeDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Context map key for the subject entity requirement.
pub const ENTITY_CONTEXT_KEY: &str = "entity";
/// Context map key for the owning-user requirement.
pub const USER_CONTEXT_KEY: &str = "user";

/// Placeholder replaced by the entity type label in admin label templates.
pub const ADMIN_LABEL_PLACEHOLDER: &str = "{label}";

/// Declared dependency of a block on a runtime-resolved entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRequirement {
    /// Machine name of the referenced entity type.
    pub entity_type_id: String,
    /// Human-readable label shown in context wiring UIs.
    pub label: String,
    /// Whether the host must resolve this context before block activation.
    pub required: bool,
}

impl ContextRequirement {
    /// Creates a requirement the host must satisfy.
    pub fn required(entity_type_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            entity_type_id: entity_type_id.into(),
            label: label.into(),
            required: true,
        }
    }

    /// Creates a requirement the host may leave unresolved.
    pub fn optional(entity_type_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            entity_type_id: entity_type_id.into(),
            label: label.into(),
            required: false,
        }
    }
}

/// Base plugin definition shared by every generated derivative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDefinitionTemplate {
    /// Base plugin id the derivative keys extend.
    pub base_plugin_id: String,
    /// Admin UI category for generated definitions.
    pub category: String,
    /// Providing module/extension name.
    pub provider: String,
    /// Admin label template with a `{label}` placeholder.
    pub admin_label_template: String,
}

impl BlockDefinitionTemplate {
    pub fn new(
        base_plugin_id: impl Into<String>,
        category: impl Into<String>,
        provider: impl Into<String>,
        admin_label_template: impl Into<String>,
    ) -> Self {
        Self {
            base_plugin_id: base_plugin_id.into(),
            category: category.into(),
            provider: provider.into(),
            admin_label_template: admin_label_template.into(),
        }
    }

    /// Stock template for contact entity form blocks.
    pub fn contact_entity_form_baseline() -> Self {
        Self::new(
            "contact_entity_form",
            "Contacts",
            "contactdash",
            "Contacts entity form ({label})",
        )
    }
}

/// Substitutes the entity type label into an admin label template.
///
/// Localization of the template text is the host's concern; this only
/// performs placeholder substitution.
pub fn format_admin_label(template: &str, label: &str) -> String {
    template.replace(ADMIN_LABEL_PLACEHOLDER, label)
}

/// One generated block-plugin definition.
///
/// Keyed in the derivative map as `"{entity_type_id}-{bundle_id}"`. Underscore
/// field names carry derivation metadata the host form/access layers read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivativeDefinition {
    /// Base plugin id copied from the template.
    pub base_plugin_id: String,
    /// Admin UI category copied from the template.
    pub category: String,
    /// Providing module/extension name copied from the template.
    pub provider: String,
    /// Admin label with the entity type label substituted in.
    pub admin_label: String,
    /// Context requirements keyed by context name.
    pub context: BTreeMap<String, ContextRequirement>,
    /// Source entity type id.
    #[serde(rename = "_entity_type_id")]
    pub entity_type_id: String,
    /// Whether the source entity type has create/edit forms.
    #[serde(rename = "_has_forms")]
    pub has_forms: bool,
    /// Whether creation is allowed (ownership capability and forms).
    #[serde(rename = "_allow_create")]
    pub allow_create: bool,
    /// Name of the field holding the bundle key, when one exists.
    #[serde(rename = "_bundle_key")]
    pub bundle_key: Option<String>,
    /// Authorization roles required for role-bearing bundles.
    #[serde(
        rename = "_required_hats",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub required_hats: Option<BTreeSet<String>>,
}

impl DerivativeDefinition {
    /// Builds the definition skeleton for one entity type: template fields,
    /// substituted admin label, and derivation metadata. Context entries and
    /// role requirements are added by the deriver.
    pub fn for_entity_type(
        template: &BlockDefinitionTemplate,
        entity_type: &EntityTypeDescriptor,
    ) -> Self {
        Self {
            base_plugin_id: template.base_plugin_id.clone(),
            category: template.category.clone(),
            provider: template.provider.clone(),
            admin_label: format_admin_label(&template.admin_label_template, &entity_type.label),
            context: BTreeMap::new(),
            entity_type_id: entity_type.id.clone(),
            has_forms: entity_type.has_forms,
            allow_create: entity_type.supports_ownership && entity_type.has_forms,
            bundle_key: entity_type.bundle_key.clone(),
            required_hats: None,
        }
    }
}

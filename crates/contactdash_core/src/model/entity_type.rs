//! Entity type catalog record.
//!
//! # Responsibility
//! - Define the read-only descriptor the block deriver consumes per entity
//!   kind.
//! - Validate framework machine names shared by all catalog identifiers.
//!
//! # Invariants
//! - `id` is a stable machine name assigned by the host framework.
//! - Capability flags (`supports_ownership`, `has_forms`) are resolved by the
//!   host at registration time; the core never inspects implementing classes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static MACHINE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_]*$").expect("valid machine name regex"));

/// Returns whether `value` is a well-formed framework machine name.
///
/// Machine names are non-empty, ASCII lowercase/digit/underscore, and start
/// with a lowercase letter or digit.
pub fn is_valid_machine_name(value: &str) -> bool {
    MACHINE_NAME_RE.is_match(value)
}

/// Catalog descriptor for one content-entity kind.
///
/// Supplied by the host entity-type registry; read-only to this crate. One
/// descriptor expands into one dashboard-block definition per bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeDescriptor {
    /// Stable machine name, e.g. `profile`.
    pub id: String,
    /// Human-readable label used in generated admin labels.
    pub label: String,
    /// Framework approval flag: only enabled kinds appear on the dashboard.
    pub dashboard_enabled: bool,
    /// Whether the implementing class satisfies the ownership capability.
    pub supports_ownership: bool,
    /// Whether create/edit form classes exist for this kind.
    pub has_forms: bool,
    /// Machine name of the bundle-defining type, when the kind is bundled.
    pub bundle_entity_type: Option<String>,
    /// Name of the field holding the bundle key, when one exists.
    pub bundle_key: Option<String>,
}

impl EntityTypeDescriptor {
    /// Creates a descriptor with all capability flags cleared.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            dashboard_enabled: false,
            supports_ownership: false,
            has_forms: false,
            bundle_entity_type: None,
            bundle_key: None,
        }
    }

    /// Validates identifier and label invariants.
    ///
    /// # Errors
    /// - `InvalidId` when `id` is not a machine name.
    /// - `EmptyLabel` when `label` is blank.
    /// - `InvalidBundleType` when `bundle_entity_type` is set but malformed.
    pub fn validate(&self) -> Result<(), EntityTypeValidationError> {
        if !is_valid_machine_name(&self.id) {
            return Err(EntityTypeValidationError::InvalidId(self.id.clone()));
        }
        if self.label.trim().is_empty() {
            return Err(EntityTypeValidationError::EmptyLabel(self.id.clone()));
        }
        if let Some(bundle_type) = &self.bundle_entity_type {
            if !is_valid_machine_name(bundle_type) {
                return Err(EntityTypeValidationError::InvalidBundleType(
                    bundle_type.clone(),
                ));
            }
        }
        Ok(())
    }
}

/// Entity type descriptor validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityTypeValidationError {
    InvalidId(String),
    EmptyLabel(String),
    InvalidBundleType(String),
}

impl Display for EntityTypeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "entity type id is not a machine name: {value}"),
            Self::EmptyLabel(id) => write!(f, "entity type label must not be empty: {id}"),
            Self::InvalidBundleType(value) => {
                write!(f, "bundle entity type is not a machine name: {value}")
            }
        }
    }
}

impl Error for EntityTypeValidationError {}

#[cfg(test)]
mod tests {
    use super::{is_valid_machine_name, EntityTypeDescriptor, EntityTypeValidationError};

    #[test]
    fn accepts_well_formed_machine_names() {
        assert!(is_valid_machine_name("user"));
        assert!(is_valid_machine_name("contact_message"));
        assert!(is_valid_machine_name("profile2"));
        assert!(is_valid_machine_name("2fa_settings"));
    }

    #[test]
    fn rejects_malformed_machine_names() {
        assert!(!is_valid_machine_name(""));
        assert!(!is_valid_machine_name("_profile"));
        assert!(!is_valid_machine_name("Profile"));
        assert!(!is_valid_machine_name("contact message"));
        assert!(!is_valid_machine_name("contact-message"));
    }

    #[test]
    fn new_descriptor_starts_with_flags_cleared() {
        let entity_type = EntityTypeDescriptor::new("event", "Event");
        assert!(!entity_type.dashboard_enabled);
        assert!(!entity_type.supports_ownership);
        assert!(!entity_type.has_forms);
        assert!(entity_type.bundle_entity_type.is_none());
        assert!(entity_type.bundle_key.is_none());
    }

    #[test]
    fn validate_rejects_malformed_id() {
        let entity_type = EntityTypeDescriptor::new("Event", "Event");
        let err = entity_type.validate().expect_err("malformed id must fail");
        assert_eq!(err, EntityTypeValidationError::InvalidId("Event".to_string()));
    }

    #[test]
    fn validate_rejects_blank_label() {
        let entity_type = EntityTypeDescriptor::new("event", "   ");
        let err = entity_type.validate().expect_err("blank label must fail");
        assert_eq!(err, EntityTypeValidationError::EmptyLabel("event".to_string()));
    }

    #[test]
    fn validate_rejects_malformed_bundle_entity_type() {
        let mut entity_type = EntityTypeDescriptor::new("profile", "Profile");
        entity_type.bundle_entity_type = Some("Profile Type".to_string());
        let err = entity_type
            .validate()
            .expect_err("malformed bundle type must fail");
        assert_eq!(
            err,
            EntityTypeValidationError::InvalidBundleType("Profile Type".to_string())
        );
    }
}

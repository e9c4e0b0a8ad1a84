//! Core domain logic for contactdash.
//! This crate is the single source of truth for block derivation invariants.

pub mod block;
pub mod logging;
pub mod model;
pub mod registry;

pub use block::definition::{
    format_admin_label, BlockDefinitionTemplate, ContextRequirement, DerivativeDefinition,
    ENTITY_CONTEXT_KEY, USER_CONTEXT_KEY,
};
pub use block::deriver::{
    DeriveError, DeriveResult, EntityBlockDeriver, PROFILE_ENTITY_TYPE_ID, USER_ENTITY_TYPE_ID,
};
pub use block::edit_link::{
    parse_edit_link_mode, supported_edit_link_modes, DashboardBlock, EditLink, EditLinkMode,
    EditLinkModeError, EDIT_LINK_MODE_CONTENT, EDIT_LINK_MODE_TITLE,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::bundle::{BundleDescriptor, BundleValidationError};
pub use model::entity_type::{
    is_valid_machine_name, EntityTypeDescriptor, EntityTypeValidationError,
};
pub use registry::bundles::{
    BundleRegistry, InMemoryBundleRegistry, InMemoryRoleBundleRegistry, RoleBundleRegistry,
};
pub use registry::entity_types::{EntityTypeRegistry, InMemoryEntityTypeRegistry};
pub use registry::{RegistryError, RegistryResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

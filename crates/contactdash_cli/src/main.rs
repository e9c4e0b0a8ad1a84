//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `contactdash_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use contactdash_core::{
    BlockDefinitionTemplate, BundleDescriptor, EntityBlockDeriver, EntityTypeDescriptor,
    InMemoryBundleRegistry, InMemoryEntityTypeRegistry, InMemoryRoleBundleRegistry,
};
use std::error::Error;
use std::sync::Arc;

fn main() {
    println!("contactdash_core ping={}", contactdash_core::ping());
    println!("contactdash_core version={}", contactdash_core::core_version());

    match run_demo_derivation() {
        Ok(keys) => {
            println!("contactdash_core demo_derivatives={}", keys.len());
            for key in keys {
                println!("contactdash_core derivative={key}");
            }
        }
        Err(err) => {
            eprintln!("contactdash_core demo_derivation_failed: {err}");
            std::process::exit(1);
        }
    }
}

/// Wires a small demo catalog and runs one derivation pass.
fn run_demo_derivation() -> Result<Vec<String>, Box<dyn Error>> {
    let mut entity_types = InMemoryEntityTypeRegistry::new();

    let mut user = EntityTypeDescriptor::new("user", "User");
    user.dashboard_enabled = true;
    user.has_forms = true;
    entity_types.register(user)?;

    let mut profile = EntityTypeDescriptor::new("profile", "Profile");
    profile.dashboard_enabled = true;
    profile.supports_ownership = true;
    profile.has_forms = true;
    profile.bundle_entity_type = Some("profile_type".to_string());
    profile.bundle_key = Some("type".to_string());
    entity_types.register(profile)?;

    // Known to the catalog but not approved for the dashboard.
    entity_types.register(EntityTypeDescriptor::new("event", "Event"))?;

    let mut bundles = InMemoryBundleRegistry::new();
    bundles.register_bundle_type("profile_type")?;
    bundles.register("profile_type", BundleDescriptor::new("main", "Main profile"))?;
    bundles.register("profile_type", BundleDescriptor::new("work", "Work profile"))?;

    let mut role_bundles = InMemoryRoleBundleRegistry::new();
    let mut main = BundleDescriptor::new("main", "Main profile");
    main.roles = ["editor".to_string()].into_iter().collect();
    role_bundles.register(main)?;
    role_bundles.register(BundleDescriptor::new("work", "Work profile"))?;

    let deriver = EntityBlockDeriver::new(
        Arc::new(entity_types),
        Arc::new(bundles),
        Arc::new(role_bundles),
    );
    let derivatives = deriver.derive_all(&BlockDefinitionTemplate::contact_entity_form_baseline())?;
    Ok(derivatives.into_keys().collect())
}

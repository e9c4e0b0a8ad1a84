//! Dashboard block contracts and definition derivation.
//!
//! This module defines the declaration-time side of dashboard blocks: the
//! edit-link capability a block implementation may expose, the definition
//! records the host plugin system registers, and the deriver that expands a
//! base definition across the entity-type catalog. Rendering and form
//! building are host concerns.

pub mod definition;
pub mod deriver;
pub mod edit_link;

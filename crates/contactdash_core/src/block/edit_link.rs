//! Dashboard block edit-link capability.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rendering context for a block's edit action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EditLinkMode {
    /// Attach the edit action to the block title.
    Title,
    /// Render the edit action inline in the block content.
    Content,
}

impl EditLinkMode {
    /// Stable string id used in block configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => EDIT_LINK_MODE_TITLE,
            Self::Content => EDIT_LINK_MODE_CONTENT,
        }
    }
}

/// Configuration string value for the title mode.
pub const EDIT_LINK_MODE_TITLE: &str = "title";
/// Configuration string value for the inline content mode.
pub const EDIT_LINK_MODE_CONTENT: &str = "content";

const SUPPORTED_EDIT_LINK_MODE_STRINGS: &[&str] = &[EDIT_LINK_MODE_TITLE, EDIT_LINK_MODE_CONTENT];

/// Returns supported edit-link mode strings.
pub fn supported_edit_link_modes() -> &'static [&'static str] {
    SUPPORTED_EDIT_LINK_MODE_STRINGS
}

/// Parses one edit-link mode from its configuration string value.
pub fn parse_edit_link_mode(value: &str) -> Result<EditLinkMode, EditLinkModeError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(EditLinkModeError::EmptyMode);
    }

    match normalized {
        EDIT_LINK_MODE_TITLE => Ok(EditLinkMode::Title),
        EDIT_LINK_MODE_CONTENT => Ok(EditLinkMode::Content),
        other => Err(EditLinkModeError::UnsupportedMode(other.to_string())),
    }
}

/// Edit-link mode parse errors.
///
/// Callers that accept free-form configuration should treat a parse failure
/// as "no edit link" rather than a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditLinkModeError {
    EmptyMode,
    UnsupportedMode(String),
}

impl Display for EditLinkModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMode => write!(f, "edit link mode must not be empty"),
            Self::UnsupportedMode(value) => write!(f, "edit link mode is unsupported: {value}"),
        }
    }
}

impl Error for EditLinkModeError {}

/// Navigable edit action exposed by a dashboard block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditLink {
    /// User-facing link text.
    pub label: String,
    /// Framework route or path the link navigates to.
    pub route: String,
}

impl EditLink {
    pub fn new(label: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            route: route.into(),
        }
    }
}

/// Contract for blocks placed on the contacts dashboard.
pub trait DashboardBlock {
    /// Returns the edit link for `mode`, or `None` when no edit action
    /// applies in that rendering context.
    fn edit_link(&self, mode: EditLinkMode) -> Option<EditLink>;
}

#[cfg(test)]
mod tests {
    use super::{
        parse_edit_link_mode, supported_edit_link_modes, EditLinkMode, EditLinkModeError,
    };

    #[test]
    fn parses_all_supported_edit_link_modes() {
        assert_eq!(
            parse_edit_link_mode("title").expect("title parse"),
            EditLinkMode::Title
        );
        assert_eq!(
            parse_edit_link_mode("content").expect("content parse"),
            EditLinkMode::Content
        );
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        assert_eq!(
            parse_edit_link_mode("  title  ").expect("padded title parse"),
            EditLinkMode::Title
        );
    }

    #[test]
    fn rejects_empty_edit_link_mode() {
        let err = parse_edit_link_mode("   ").expect_err("empty mode must fail");
        assert_eq!(err, EditLinkModeError::EmptyMode);
    }

    #[test]
    fn rejects_unsupported_edit_link_mode() {
        let err = parse_edit_link_mode("banner").expect_err("unsupported mode must fail");
        assert_eq!(err, EditLinkModeError::UnsupportedMode("banner".to_string()));
    }

    #[test]
    fn rejects_non_lowercase_edit_link_mode_variants() {
        let err = parse_edit_link_mode("Title").expect_err("capitalized mode must fail");
        assert_eq!(err, EditLinkModeError::UnsupportedMode("Title".to_string()));
    }

    #[test]
    fn mode_string_round_trips() {
        for raw in supported_edit_link_modes() {
            let mode = parse_edit_link_mode(raw).expect("supported mode should parse");
            assert_eq!(mode.as_str(), *raw);
        }
    }
}

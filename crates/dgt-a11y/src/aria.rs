//! ARIA Support
//!
//! Roles and attribute names used by disclosure widgets.

pub const ROLE: &str = "role";
pub const ARIA_CONTROLS: &str = "aria-controls";
pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ARIA_HASPOPUP: &str = "aria-haspopup";
pub const ARIA_HIDDEN: &str = "aria-hidden";
pub const ARIA_LABEL: &str = "aria-label";
pub const TABINDEX: &str = "tabindex";

/// Roles a disclosure assigns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    /// The control toggling the panel
    Button,
    /// The panel, a navigation landmark
    Navigation,
}

impl AriaRole {
    /// Attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Navigation => "navigation",
        }
    }
}

impl std::fmt::Display for AriaRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `true`/`false` token for boolean ARIA states
pub fn aria_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Parse a boolean ARIA token; anything else is `None`
pub fn parse_aria_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_values() {
        assert_eq!(AriaRole::Button.as_str(), "button");
        assert_eq!(AriaRole::Navigation.to_string(), "navigation");
    }

    #[test]
    fn test_bool_tokens() {
        assert_eq!(aria_bool(true), "true");
        assert_eq!(parse_aria_bool("false"), Some(false));
        assert_eq!(parse_aria_bool("TRUE"), None);
    }
}

//! Simple selectors
//!
//! The subset of CSS selectors needed to discover elements by tag, id, class
//! or attribute: `*`, `tag`, `#id`, `.class`, `[attr]`, `[attr=value]`.

use crate::{DomError, Element};

/// A single simple selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
    Attribute {
        name: String,
        /// `None` matches presence only
        value: Option<String>,
    },
}

impl Selector {
    /// Parse a simple selector string
    pub fn parse(s: &str) -> Result<Self, DomError> {
        let s = s.trim();
        let invalid = || DomError::InvalidSelector(s.to_string());

        if s == "*" {
            return Ok(Self::Universal);
        }
        if let Some(id) = s.strip_prefix('#') {
            return ident(id).map(Self::Id).ok_or_else(invalid);
        }
        if let Some(class) = s.strip_prefix('.') {
            return ident(class).map(Self::Class).ok_or_else(invalid);
        }
        if let Some(inner) = s.strip_prefix('[') {
            let inner = inner.strip_suffix(']').ok_or_else(invalid)?;
            return match inner.split_once('=') {
                Some((name, value)) => {
                    let name = ident(name.trim()).ok_or_else(invalid)?;
                    let value = unquote(value.trim()).ok_or_else(invalid)?;
                    Ok(Self::attr_equals(&name, value))
                }
                None => {
                    let name = ident(inner.trim()).ok_or_else(invalid)?;
                    Ok(Self::Attribute { name: name.to_ascii_lowercase(), value: None })
                }
            };
        }
        ident(s)
            .map(|tag| Self::Tag(tag.to_ascii_lowercase()))
            .ok_or_else(invalid)
    }

    /// `[name="value"]` without going through selector syntax, so the value
    /// may contain quotes or brackets.
    pub fn attr_equals(name: &str, value: &str) -> Self {
        Self::Attribute {
            name: name.to_ascii_lowercase(),
            value: Some(value.to_string()),
        }
    }

    /// Tag selector
    pub fn tag(name: &str) -> Self {
        Self::Tag(name.to_ascii_lowercase())
    }

    /// Check if an element matches
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(tag) => element.tag_name().eq_ignore_ascii_case(tag),
            Self::Id(id) => element.get_attribute("id") == Some(id.as_str()),
            Self::Class(class) => element.class_list().contains(class),
            Self::Attribute { name, value: None } => element.has_attribute(name),
            Self::Attribute { name, value: Some(v) } => {
                element.get_attribute(name) == Some(v.as_str())
            }
        }
    }
}

impl std::str::FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn ident(s: &str) -> Option<String> {
    let valid = !s.is_empty()
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then(|| s.to_string())
}

fn unquote(s: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if let Some(rest) = s.strip_prefix(quote) {
            return rest.strip_suffix(quote);
        }
    }
    (!s.is_empty() && !s.contains(char::is_whitespace)).then_some(s)
}

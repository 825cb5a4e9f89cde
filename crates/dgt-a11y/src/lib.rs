//! DG Takeover Accessibility
//!
//! ARIA vocabulary for disclosure widgets.
//!
//! Features:
//! - ARIA roles and attribute names
//! - Tab index values
//! - Disclosure consistency audit (controls vs. controlled panel)

pub mod aria;
pub mod disclosure;
pub mod focus;

pub use aria::{AriaRole, aria_bool, parse_aria_bool};
pub use disclosure::{DisclosureState, audit_disclosure};
pub use focus::TabIndex;

use dgt_dom::NodeId;

/// Accessibility error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum A11yError {
    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Missing {attribute} on {node:?}")]
    MissingAttribute { node: NodeId, attribute: &'static str },

    #[error("Invalid ARIA value {value:?} for {attribute} on {node:?}")]
    InvalidValue {
        node: NodeId,
        attribute: &'static str,
        value: String,
    },

    #[error("{control:?} has aria-expanded={expanded} but the panel is {panel}")]
    Inconsistent {
        control: NodeId,
        expanded: bool,
        panel: DisclosureState,
    },
}

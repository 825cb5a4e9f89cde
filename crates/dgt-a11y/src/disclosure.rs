//! Disclosure audit
//!
//! A disclosure is a set of controls (`aria-expanded`) toggling one panel
//! (`aria-hidden`). The two must always agree: every control reports
//! `aria-expanded="true"` exactly when the panel reports `aria-hidden="false"`.

use dgt_dom::{Document, NodeId};

use crate::A11yError;
use crate::aria::{ARIA_EXPANDED, ARIA_HIDDEN, parse_aria_bool};

/// What assistive technology is told about the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureState {
    Expanded,
    Collapsed,
}

impl std::fmt::Display for DisclosureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Expanded => "expanded",
            Self::Collapsed => "collapsed",
        })
    }
}

fn read_bool(doc: &Document, node: NodeId, attribute: &'static str) -> Result<bool, A11yError> {
    let element = doc.element(node).ok_or(A11yError::NotAnElement(node))?;
    let value = element
        .get_attribute(attribute)
        .ok_or(A11yError::MissingAttribute { node, attribute })?;
    parse_aria_bool(value).ok_or_else(|| A11yError::InvalidValue {
        node,
        attribute,
        value: value.to_string(),
    })
}

/// Check that `controls` and `panel` agree, returning the panel's state
pub fn audit_disclosure(
    doc: &Document,
    controls: &[NodeId],
    panel: NodeId,
) -> Result<DisclosureState, A11yError> {
    let state = if read_bool(doc, panel, ARIA_HIDDEN)? {
        DisclosureState::Collapsed
    } else {
        DisclosureState::Expanded
    };

    for &control in controls {
        let expanded = read_bool(doc, control, ARIA_EXPANDED)?;
        if expanded != (state == DisclosureState::Expanded) {
            return Err(A11yError::Inconsistent { control, expanded, panel: state });
        }
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disclosure(expanded: &str, hidden: &str) -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.body().unwrap();
        let button = doc.create_element("button");
        let nav = doc.create_element("nav");
        doc.append_child(body, button).unwrap();
        doc.append_child(body, nav).unwrap();
        doc.set_attribute(button, ARIA_EXPANDED, expanded).unwrap();
        doc.set_attribute(nav, ARIA_HIDDEN, hidden).unwrap();
        (doc, button, nav)
    }

    #[test]
    fn test_consistent_states() {
        let (doc, button, nav) = disclosure("false", "true");
        assert_eq!(audit_disclosure(&doc, &[button], nav), Ok(DisclosureState::Collapsed));

        let (doc, button, nav) = disclosure("true", "false");
        assert_eq!(audit_disclosure(&doc, &[button], nav), Ok(DisclosureState::Expanded));
    }

    #[test]
    fn test_no_controls() {
        let (doc, _, nav) = disclosure("true", "true");
        assert_eq!(audit_disclosure(&doc, &[], nav), Ok(DisclosureState::Collapsed));
    }

    #[test]
    fn test_inconsistent_state() {
        let (doc, button, nav) = disclosure("true", "true");
        assert_eq!(
            audit_disclosure(&doc, &[button], nav),
            Err(A11yError::Inconsistent {
                control: button,
                expanded: true,
                panel: DisclosureState::Collapsed,
            })
        );
    }

    #[test]
    fn test_missing_and_invalid_values() {
        let (mut doc, button, nav) = disclosure("maybe", "false");
        assert!(matches!(
            audit_disclosure(&doc, &[button], nav),
            Err(A11yError::InvalidValue { attribute: ARIA_EXPANDED, .. })
        ));

        doc.element_mut(nav).unwrap().remove_attribute(ARIA_HIDDEN);
        assert_eq!(
            audit_disclosure(&doc, &[button], nav),
            Err(A11yError::MissingAttribute { node: nav, attribute: ARIA_HIDDEN })
        );
        assert_eq!(
            audit_disclosure(&doc, &[], NodeId::ROOT),
            Err(A11yError::NotAnElement(NodeId::ROOT))
        );
    }
}

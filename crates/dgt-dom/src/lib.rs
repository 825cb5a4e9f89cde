//! DG Takeover DOM - Host document model
//!
//! The small slice of a browser document that the takeover component binds to:
//! an element tree with attributes and class lists, attribute selectors,
//! event targets with bubbling, and a one-shot timer queue driven by a
//! controllable clock.

mod attributes;
mod classlist;
mod document;
pub mod driver;
mod events;
mod page;
mod selector;
mod timers;

pub use attributes::{Attr, NamedNodeMap};
pub use classlist::DOMTokenList;
pub use document::{Document, Element, Node, NodeData};
pub use events::{Event, EventListenerRegistry, EventTarget, Listener, ListenerId};
pub use page::Page;
pub use selector::Selector;
pub use timers::{TimerCallback, TimerId, TimerManager};

/// Node identifier (index into the document arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The document node
    pub const ROOT: NodeId = NodeId(0);

    /// Arena index
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node {0:?} does not exist")]
    NoSuchNode(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Cannot append {child:?} to {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

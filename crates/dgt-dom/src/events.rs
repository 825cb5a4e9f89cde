//! DOM Events
//!
//! Event objects, event targets and the listener registry.

use std::rc::Rc;

use crate::{NodeId, Page};

/// Where an event is dispatched or a listener is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Document,
    Node(NodeId),
}

impl From<NodeId> for EventTarget {
    fn from(id: NodeId) -> Self {
        if id == NodeId::ROOT {
            Self::Document
        } else {
            Self::Node(id)
        }
    }
}

/// Event object passed to listeners
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    target: Option<EventTarget>,
    current_target: Option<EventTarget>,
    key: Option<String>,
    detail: Option<String>,
    bubbles: bool,
    cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(event_type: &str, bubbles: bool, cancelable: bool) -> Self {
        Self {
            event_type: event_type.to_string(),
            target: None,
            current_target: None,
            key: None,
            detail: None,
            bubbles,
            cancelable,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Plain `new Event(type)`: does not bubble, not cancelable
    pub fn custom(event_type: &str) -> Self {
        Self::new(event_type, false, false)
    }

    /// Mouse click
    pub fn click() -> Self {
        Self::new("click", true, true)
    }

    /// Keyboard event (`keydown`, `keyup`) carrying a `key` value
    pub fn keyboard(event_type: &str, key: &str) -> Self {
        let mut event = Self::new(event_type, true, true);
        event.key = Some(key.to_string());
        event
    }

    /// Attach a string payload
    pub fn with_detail(mut self, detail: &str) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn target(&self) -> Option<EventTarget> {
        self.target
    }

    pub fn current_target(&self) -> Option<EventTarget> {
        self.current_target
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Prevent default action (cancelable events only)
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn set_target(&mut self, target: EventTarget) {
        self.target = Some(target);
    }

    pub(crate) fn set_current_target(&mut self, target: Option<EventTarget>) {
        self.current_target = target;
    }
}

/// Event listener callback
pub type Listener = Rc<dyn Fn(&mut Page, &mut Event)>;

/// Handle returned by `add_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Registration {
    id: ListenerId,
    target: EventTarget,
    event_type: String,
    listener: Listener,
}

/// Event listener storage, in registration order
#[derive(Default)]
pub struct EventListenerRegistry {
    registrations: Vec<Registration>,
    next_id: u64,
}

impl EventListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event listener
    pub fn add_listener(&mut self, target: EventTarget, event_type: &str, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            id,
            target,
            event_type: event_type.to_string(),
            listener,
        });
        id
    }

    /// Remove an event listener
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }

    /// Snapshot of the listeners for a target and event type
    pub fn get_listeners(&self, target: EventTarget, event_type: &str) -> Vec<(ListenerId, Listener)> {
        self.registrations
            .iter()
            .filter(|r| r.target == target && r.event_type == event_type)
            .map(|r| (r.id, Rc::clone(&r.listener)))
            .collect()
    }

    /// Number of listeners registered on a target
    pub fn count_for(&self, target: EventTarget) -> usize {
        self.registrations.iter().filter(|r| r.target == target).count()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl std::fmt::Debug for EventListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventListenerRegistry")
            .field("listeners", &self.registrations.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Listener {
        Rc::new(|_, _| {})
    }

    #[test]
    fn test_prevent_default_needs_cancelable() {
        let mut custom = Event::custom("dg_takeover_toggle");
        custom.prevent_default();
        assert!(!custom.is_default_prevented());

        let mut key = Event::keyboard("keyup", "Enter");
        key.prevent_default();
        assert!(key.is_default_prevented());
        assert_eq!(key.key(), Some("Enter"));
    }

    #[test]
    fn test_root_node_is_document_target() {
        assert_eq!(EventTarget::from(NodeId::ROOT), EventTarget::Document);
        assert_eq!(EventTarget::from(NodeId(3)), EventTarget::Node(NodeId(3)));
    }

    #[test]
    fn test_registry_add_remove() {
        let mut registry = EventListenerRegistry::new();
        let a = registry.add_listener(EventTarget::Document, "keydown", noop());
        let b = registry.add_listener(EventTarget::Document, "keydown", noop());
        registry.add_listener(EventTarget::Node(NodeId(2)), "click", noop());

        let ids: Vec<_> = registry
            .get_listeners(EventTarget::Document, "keydown")
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![a, b]);

        assert!(registry.remove_listener(a));
        assert!(!registry.remove_listener(a));
        assert!(!registry.contains(a));
        assert_eq!(registry.count_for(EventTarget::Document), 1);
        assert_eq!(registry.len(), 2);
    }
}

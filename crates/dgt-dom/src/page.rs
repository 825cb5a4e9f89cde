//! Page - document, listeners, timers and clock
//!
//! The single-threaded host that components bind to. Event handlers and timer
//! callbacks receive `&mut Page`, so they can mutate the document, dispatch
//! further events and schedule timers.

use std::rc::Rc;
use std::time::Duration;

use crate::{
    Document, Event, EventListenerRegistry, EventTarget, ListenerId, NodeId, TimerId, TimerManager,
};

/// A loaded page
#[derive(Debug, Default)]
pub struct Page {
    document: Document,
    listeners: EventListenerRegistry,
    timers: TimerManager,
}

impl Page {
    /// Page over a fresh `html > (head, body)` document
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            listeners: EventListenerRegistry::new(),
            timers: TimerManager::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn listeners(&self) -> &EventListenerRegistry {
        &self.listeners
    }

    pub fn timers(&self) -> &TimerManager {
        &self.timers
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn add_event_listener<F>(&mut self, target: EventTarget, event_type: &str, listener: F) -> ListenerId
    where
        F: Fn(&mut Page, &mut Event) + 'static,
    {
        self.listeners.add_listener(target, event_type, Rc::new(listener))
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove_listener(id)
    }

    /// Dispatch an event at `target`.
    ///
    /// Bubbling events travel from the target through its ancestors to the
    /// document. Listeners removed while the event is in flight are skipped.
    /// Returns false if a listener prevented the default action.
    pub fn dispatch_event(&mut self, target: EventTarget, mut event: Event) -> bool {
        event.set_target(target);

        let mut path = vec![target];
        if let EventTarget::Node(node) = target {
            if event.bubbles() {
                path.extend(self.document.ancestors(node).into_iter().map(EventTarget::from));
            }
        }

        for current in path {
            event.set_current_target(Some(current));
            for (id, listener) in self.listeners.get_listeners(current, event.event_type()) {
                if !self.listeners.contains(id) {
                    continue;
                }
                listener(self, &mut event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }
        event.set_current_target(None);

        tracing::trace!("Dispatched {} at {:?}", event.event_type(), target);
        !event.is_default_prevented()
    }

    /// Dispatch at the document
    pub fn dispatch_document_event(&mut self, event: Event) -> bool {
        self.dispatch_event(EventTarget::Document, event)
    }

    /// Simulate a click on an element
    pub fn click(&mut self, node: NodeId) -> bool {
        self.dispatch_event(node.into(), Event::click())
    }

    /// Simulate a key release on an element
    pub fn key_up(&mut self, node: NodeId, key: &str) -> bool {
        self.dispatch_event(node.into(), Event::keyboard("keyup", key))
    }

    /// Simulate a key press; `keydown` bubbles to the document
    pub fn key_down(&mut self, target: EventTarget, key: &str) -> bool {
        self.dispatch_event(target, Event::keyboard("keydown", key))
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Current clock value
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn set_timeout<F>(&mut self, delay: Duration, callback: F) -> TimerId
    where
        F: FnOnce(&mut Page) + 'static,
    {
        self.timers.set_timeout(delay, Box::new(callback))
    }

    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.clear(id)
    }

    pub fn time_until_next_timer(&self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    /// Move the clock forward by `by`, firing every timer that falls due in
    /// deadline order. Timers scheduled by a firing timer run in the same call
    /// if they are due. Returns the number of timers fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.timers.now().saturating_add(by);
        let mut fired = 0;
        while let Some((id, callback)) = self.timers.pop_due(until) {
            tracing::trace!("Timer {:?} fired at {:?}", id, self.timers.now());
            callback(self);
            fired += 1;
        }
        self.timers.set_now(until);
        fired
    }

    /// Fire timers until none are pending, jumping the clock to each deadline
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(wait) = self.timers.time_until_next() {
            fired += self.advance(wait);
        }
        fired
    }
}

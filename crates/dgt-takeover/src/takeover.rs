//! Takeover - the overlay state machine
//!
//! Transitions run in two phases. The first applies immediately (signal,
//! `takeover__opening` or removal of `takeover__open`); the second runs once
//! the configured duration has elapsed on the page clock and is where
//! `aria-*` state, scroll lock release and `is_open` change.

use std::cell::RefCell;
use std::rc::Rc;

use dgt_a11y::TabIndex;
use dgt_a11y::aria::{
    ARIA_CONTROLS, ARIA_EXPANDED, ARIA_HASPOPUP, ARIA_HIDDEN, ARIA_LABEL, AriaRole, ROLE, TABINDEX,
    aria_bool,
};
use dgt_dom::{Document, Event, EventTarget, ListenerId, NodeId, Page, Selector, TimerId};

use crate::observer::{Observers, Subscription};
use crate::{
    Action, CLASS_NO_SCROLL, CLASS_OPEN, CLASS_OPENING, Command, DURATION_ATTR, MENU_ATTR,
    MissingElement, Phase, Signal, TOGGLE_ATTR, TakeoverConfig, TakeoverError, TakeoverOptions,
};

/// Elements resolved once at construction
#[derive(Debug, Clone)]
struct Refs {
    triggers: Vec<NodeId>,
    panel: NodeId,
    root: NodeId,
    body: NodeId,
}

impl Refs {
    /// Panel followed by every trigger
    fn animated(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.panel).chain(self.triggers.iter().copied())
    }
}

struct Inner {
    config: TakeoverConfig,
    /// `None` when initialization failed
    refs: Option<Refs>,
    status: Result<(), TakeoverError>,
    is_open: bool,
    is_animating: bool,
    phase: Phase,
    pending: Option<TimerId>,
    listeners: Vec<ListenerId>,
    disposed: bool,
}

/// A takeover navigation bound to one panel and its triggers.
///
/// Cloning yields another handle to the same instance.
#[derive(Clone)]
pub struct Takeover {
    id: Rc<str>,
    inner: Rc<RefCell<Inner>>,
    observers: Rc<RefCell<Observers>>,
}

impl Takeover {
    /// Discover the markup for `id`, apply accessibility attributes, emit
    /// `init` and bind listeners.
    ///
    /// Never fails: when required markup is missing, each missing element is
    /// logged and the instance stays inert. Check [`Takeover::status`].
    pub fn new(page: &mut Page, id: &str, options: TakeoverOptions) -> Self {
        tracing::info!("DG Takeover: initializing takeover with id {:?}", id);

        let doc = page.document();
        let triggers = doc.query_selector_all(&Selector::attr_equals(TOGGLE_ATTR, id));
        let panel = doc.query_selector(&Selector::attr_equals(MENU_ATTR, id));
        let root = doc.document_element();
        let body = doc.body();

        let panel_duration = panel.and_then(|p| doc.get_attribute(p, DURATION_ATTR));
        let config = TakeoverConfig::resolve(panel_duration, &options);

        let mut missing = Vec::new();
        if root.is_none() {
            missing.push(MissingElement::Root);
        }
        if body.is_none() {
            missing.push(MissingElement::Body);
        }
        if config.require_triggers && triggers.is_empty() {
            missing.push(MissingElement::Triggers);
        }
        if panel.is_none() {
            missing.push(MissingElement::Panel);
        }
        for element in &missing {
            tracing::error!("DG Takeover: {} not found for takeover {:?}", element, id);
        }

        let takeover = Self {
            id: Rc::from(id),
            inner: Rc::new(RefCell::new(Inner {
                config,
                refs: None,
                status: Ok(()),
                is_open: false,
                is_animating: false,
                phase: Phase::Closed,
                pending: None,
                listeners: Vec::new(),
                disposed: false,
            })),
            observers: Rc::default(),
        };

        match (root, body, panel) {
            (Some(root), Some(body), Some(panel)) if missing.is_empty() => {
                takeover.init(page, Refs { triggers, panel, root, body });
            }
            _ => {
                takeover.inner.borrow_mut().status = Err(TakeoverError::MissingElements {
                    id: id.to_string(),
                    missing,
                });
            }
        }
        takeover
    }

    fn init(&self, page: &mut Page, refs: Refs) {
        let aria_label = self.inner.borrow().config.aria_label.clone();
        let doc = page.document_mut();

        for &trigger in &refs.triggers {
            set_attr(doc, trigger, ROLE, AriaRole::Button.as_str());
            set_attr(doc, trigger, ARIA_HASPOPUP, aria_bool(true));
            set_attr(doc, trigger, ARIA_EXPANDED, aria_bool(false));
            set_attr(doc, trigger, ARIA_CONTROLS, &self.id);
            set_attr(doc, trigger, TABINDEX, &TabIndex::DOCUMENT_ORDER.to_attribute());
        }
        set_attr(doc, refs.panel, ROLE, AriaRole::Navigation.as_str());
        set_attr(doc, refs.panel, ARIA_HIDDEN, aria_bool(true));
        set_attr(doc, refs.panel, ARIA_LABEL, &aria_label);

        tracing::debug!(
            "DG Takeover {:?}: {} trigger(s), panel {:?}",
            self.id,
            refs.triggers.len(),
            refs.panel
        );
        self.inner.borrow_mut().refs = Some(refs);

        self.emit(page, Signal::Init);
        self.bind_events(page);
    }

    fn bind_events(&self, page: &mut Page) {
        let Some(refs) = self.live_refs() else { return };
        let mut bound = Vec::new();

        for &trigger in &refs.triggers {
            let this = self.clone();
            bound.push(page.add_event_listener(EventTarget::Node(trigger), "click", move |page, _| {
                if this.is_animating() {
                    return;
                }
                this.request(page, Action::Toggle);
            }));

            let this = self.clone();
            bound.push(page.add_event_listener(EventTarget::Node(trigger), "keyup", move |page, event| {
                event.prevent_default();
                if matches!(event.key(), Some("Enter" | " ")) {
                    if this.is_animating() {
                        return;
                    }
                    this.request(page, Action::Toggle);
                }
            }));
        }

        let this = self.clone();
        bound.push(page.add_event_listener(EventTarget::Document, "keydown", move |page, event| {
            if event.key() == Some("Escape") && this.is_open() && !this.is_animating() {
                this.request(page, Action::ForceClose);
            }
        }));

        for command in Command::ALL {
            let this = self.clone();
            bound.push(page.add_event_listener(
                EventTarget::Document,
                command.event_type(),
                move |page, event| this.on_command(page, command, event),
            ));
        }

        self.inner.borrow_mut().listeners = bound;
    }

    fn on_command(&self, page: &mut Page, command: Command, event: &Event) {
        if let Some(target) = event.detail() {
            if target != &*self.id {
                tracing::trace!("DG Takeover {:?}: {} addressed to {:?}", self.id, command.event_type(), target);
                return;
            }
        }
        let settled = match command {
            Command::Toggle => false,
            Command::ToggleOpen => self.is_open(),
            Command::ToggleClose => !self.is_open(),
        };
        if !settled {
            self.request(page, command.action());
        }
    }

    /// Start a transition. Returns false, with no effect at all, when the
    /// request is ignored: inert or disposed instance, a transition already in
    /// flight, or forcing the state the takeover is already in.
    pub fn request(&self, page: &mut Page, action: Action) -> bool {
        let opening = {
            let mut inner = self.inner.borrow_mut();
            if inner.refs.is_none() || inner.disposed {
                tracing::trace!("DG Takeover {:?}: {:?} ignored, inactive", self.id, action);
                return false;
            }
            if inner.is_animating {
                tracing::debug!("DG Takeover {:?}: {:?} ignored, transition in progress", self.id, action);
                return false;
            }
            let opening = match action {
                Action::Toggle => !inner.is_open,
                Action::ForceOpen if inner.is_open => return false,
                Action::ForceClose if !inner.is_open => return false,
                Action::ForceOpen => true,
                Action::ForceClose => false,
            };
            inner.is_animating = true;
            inner.phase = if opening { Phase::Opening } else { Phase::Closing };
            opening
        };

        if opening {
            self.begin_open(page);
        } else {
            self.begin_close(page);
        }
        true
    }

    pub fn toggle(&self, page: &mut Page) -> bool {
        self.request(page, Action::Toggle)
    }

    pub fn open(&self, page: &mut Page) -> bool {
        self.request(page, Action::ForceOpen)
    }

    pub fn close(&self, page: &mut Page) -> bool {
        self.request(page, Action::ForceClose)
    }

    fn begin_open(&self, page: &mut Page) {
        self.emit(page, Signal::Opening);
        let Some(refs) = self.live_refs() else { return };

        let doc = page.document_mut();
        add_class(doc, refs.root, CLASS_NO_SCROLL);
        add_class(doc, refs.body, CLASS_NO_SCROLL);
        for node in refs.animated() {
            add_class(doc, node, CLASS_OPENING);
        }

        self.schedule(page, Self::finish_open);
    }

    fn finish_open(&self, page: &mut Page) {
        let Some(refs) = self.live_refs() else { return };

        let doc = page.document_mut();
        add_class(doc, refs.panel, CLASS_OPEN);
        set_attr(doc, refs.panel, ARIA_HIDDEN, aria_bool(false));
        for &trigger in &refs.triggers {
            add_class(doc, trigger, CLASS_OPEN);
            set_attr(doc, trigger, ARIA_EXPANDED, aria_bool(true));
        }

        self.settle(true);
        self.emit(page, Signal::Open);
    }

    fn begin_close(&self, page: &mut Page) {
        self.emit(page, Signal::Closing);
        let Some(refs) = self.live_refs() else { return };

        let doc = page.document_mut();
        for node in refs.animated() {
            remove_class(doc, node, CLASS_OPEN);
        }

        self.schedule(page, Self::finish_close);
    }

    fn finish_close(&self, page: &mut Page) {
        let Some(refs) = self.live_refs() else { return };

        let doc = page.document_mut();
        remove_class(doc, refs.panel, CLASS_OPENING);
        set_attr(doc, refs.panel, ARIA_HIDDEN, aria_bool(true));
        for &trigger in &refs.triggers {
            remove_class(doc, trigger, CLASS_OPENING);
            set_attr(doc, trigger, ARIA_EXPANDED, aria_bool(false));
        }
        remove_class(doc, refs.root, CLASS_NO_SCROLL);
        remove_class(doc, refs.body, CLASS_NO_SCROLL);

        self.settle(false);
        self.emit(page, Signal::Close);
    }

    fn schedule(&self, page: &mut Page, finish: fn(&Takeover, &mut Page)) {
        let delay = self.inner.borrow().config.step_duration();
        let this = self.clone();
        let timer = page.set_timeout(delay, move |page| finish(&this, page));
        self.inner.borrow_mut().pending = Some(timer);
    }

    fn settle(&self, open: bool) {
        let mut inner = self.inner.borrow_mut();
        inner.is_open = open;
        inner.is_animating = false;
        inner.phase = if open { Phase::Open } else { Phase::Closed };
        inner.pending = None;
    }

    /// Notify subscribers, then the document bus. Both see the instance id;
    /// the document event carries it as `detail`.
    fn emit(&self, page: &mut Page, signal: Signal) {
        tracing::debug!("DG Takeover {:?}: {}", self.id, signal);

        let observers = self.observers.borrow().snapshot();
        for (id, observer) in observers {
            if self.observers.borrow().contains(id) {
                observer(page, signal);
            }
        }
        page.dispatch_document_event(Event::custom(signal.event_type()).with_detail(&self.id));
    }

    /// Observe this instance's signals
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&mut Page, Signal) + 'static,
    {
        let id = self.observers.borrow_mut().add(Rc::new(observer));
        Subscription::new(id, &self.observers)
    }

    /// Remove every listener this instance bound, cancel a pending
    /// completion and drop all subscriptions. The instance is inert
    /// afterwards.
    ///
    /// A transition in flight is rolled back to the state it started from:
    /// an interrupted open removes `takeover__opening` and the scroll lock,
    /// an interrupted close restores `takeover__open`. Settled classes and
    /// attributes are left as they are.
    pub fn dispose(&self, page: &mut Page) {
        let (listeners, pending, interrupted, refs) = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            let interrupted = inner.phase;
            inner.disposed = true;
            inner.is_animating = false;
            inner.phase = if inner.is_open { Phase::Open } else { Phase::Closed };
            (
                std::mem::take(&mut inner.listeners),
                inner.pending.take(),
                interrupted,
                inner.refs.clone(),
            )
        };

        let removed = listeners
            .into_iter()
            .filter(|&id| page.remove_event_listener(id))
            .count();
        if let Some(timer) = pending {
            page.clear_timeout(timer);
        }
        if let Some(refs) = refs {
            roll_back(page.document_mut(), &refs, interrupted);
        }
        self.observers.borrow_mut().clear();
        tracing::debug!(
            "DG Takeover {:?}: disposed during {:?}, {} listener(s) removed",
            self.id,
            interrupted,
            removed
        );
    }

    /// References, unless disposed mid-transition
    fn live_refs(&self) -> Option<Refs> {
        let inner = self.inner.borrow();
        if inner.disposed { None } else { inner.refs.clone() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> TakeoverConfig {
        self.inner.borrow().config.clone()
    }

    /// `Ok` once initialized; the missing markup otherwise
    pub fn status(&self) -> Result<(), TakeoverError> {
        self.inner.borrow().status.clone()
    }

    /// Initialized and not disposed
    pub fn is_active(&self) -> bool {
        let inner = self.inner.borrow();
        inner.refs.is_some() && !inner.disposed
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().is_open
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().is_animating
    }

    pub fn phase(&self) -> Phase {
        self.inner.borrow().phase
    }

    pub fn panel(&self) -> Option<NodeId> {
        self.inner.borrow().refs.as_ref().map(|r| r.panel)
    }

    pub fn triggers(&self) -> Vec<NodeId> {
        self.inner.borrow().refs.as_ref().map(|r| r.triggers.clone()).unwrap_or_default()
    }

    /// Listeners currently bound on the page
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }
}

impl std::fmt::Debug for Takeover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Takeover")
            .field("id", &self.id)
            .field("phase", &inner.phase)
            .field("active", &(inner.refs.is_some() && !inner.disposed))
            .finish()
    }
}

/// Undo the immediate half of an unfinished transition
fn roll_back(doc: &mut Document, refs: &Refs, interrupted: Phase) {
    match interrupted {
        Phase::Opening => {
            remove_class(doc, refs.root, CLASS_NO_SCROLL);
            remove_class(doc, refs.body, CLASS_NO_SCROLL);
            for node in refs.animated() {
                remove_class(doc, node, CLASS_OPENING);
            }
        }
        Phase::Closing => {
            for node in refs.animated() {
                add_class(doc, node, CLASS_OPEN);
            }
        }
        Phase::Closed | Phase::Open => {}
    }
}

fn set_attr(doc: &mut Document, node: NodeId, name: &str, value: &str) {
    if let Some(element) = doc.element_mut(node) {
        element.set_attribute(name, value);
    }
}

fn add_class(doc: &mut Document, node: NodeId, class: &str) {
    if let Some(element) = doc.element_mut(node) {
        element.add_class(class);
    }
}

fn remove_class(doc: &mut Document, node: NodeId, class: &str) {
    if let Some(element) = doc.element_mut(node) {
        element.remove_class(class);
    }
}

//! Per-instance signal observers

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use dgt_dom::Page;

use crate::Signal;

pub(crate) type Observer = Rc<dyn Fn(&mut Page, Signal)>;

#[derive(Default)]
pub(crate) struct Observers {
    entries: Vec<(u64, Observer)>,
    next_id: u64,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Observer) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    /// Observers to notify, so callbacks may (un)subscribe while running
    pub(crate) fn snapshot(&self) -> Vec<(u64, Observer)> {
        self.entries.iter().map(|(id, o)| (*id, Rc::clone(o))).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Disposer returned by `Takeover::subscribe`
#[derive(Debug)]
#[must_use = "dropping a Subscription keeps the observer registered; call cancel() to remove it"]
pub struct Subscription {
    id: u64,
    observers: Weak<RefCell<Observers>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, observers: &Rc<RefCell<Observers>>) -> Self {
        Self { id, observers: Rc::downgrade(observers) }
    }

    /// Whether the observer is still registered
    pub fn is_active(&self) -> bool {
        self.observers
            .upgrade()
            .is_some_and(|observers| observers.borrow().contains(self.id))
    }

    /// Remove the observer. Returns false if it was already gone.
    pub fn cancel(self) -> bool {
        match self.observers.upgrade() {
            Some(observers) => observers.borrow_mut().remove(self.id),
            None => false,
        }
    }
}

//! Integration tests - markup, dispatch and timers through one `Page`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use dgt_dom::{Document, Event, EventTarget, NodeId, Page, Selector};

/// `body > header > (button.toggle, button.toggle[data-x=a])`, `body > nav#menu`
fn site() -> (Page, NodeId, Vec<NodeId>, NodeId) {
    let mut doc = Document::new();
    let body = doc.body().unwrap();
    let header = doc.create_element("header");
    doc.append_child(body, header).unwrap();

    let mut buttons = Vec::new();
    for _ in 0..2 {
        let button = doc.create_element("button");
        doc.set_attribute(button, "class", "toggle").unwrap();
        doc.append_child(header, button).unwrap();
        buttons.push(button);
    }
    doc.set_attribute(buttons[1], "data-x", "a").unwrap();

    let nav = doc.create_element("nav");
    doc.set_attribute(nav, "id", "menu").unwrap();
    doc.append_child(body, nav).unwrap();

    (Page::with_document(doc), header, buttons, nav)
}

// ============================================================================
// QUERIES
// ============================================================================

#[test]
fn test_queries_follow_document_order() {
    let (page, header, buttons, nav) = site();
    let doc = page.document();

    let q = |s: &str| doc.query_selector_all(&s.parse::<Selector>().unwrap());
    assert_eq!(q("button"), buttons);
    assert_eq!(q(".toggle"), buttons);
    assert_eq!(q("[data-x]"), vec![buttons[1]]);
    assert_eq!(q("[data-x='a']"), vec![buttons[1]]);
    assert_eq!(q("[data-x=\"b\"]"), Vec::<NodeId>::new());
    assert_eq!(q("#menu"), vec![nav]);
    assert_eq!(doc.query_selector(&Selector::tag("header")), Some(header));
    assert!("[data-x".parse::<Selector>().is_err());
}

#[test]
fn test_class_attribute_and_list_agree() {
    let (mut page, _, buttons, _) = site();
    let doc = page.document_mut();

    doc.element_mut(buttons[0]).unwrap().add_class("active");
    assert_eq!(doc.get_attribute(buttons[0], "class"), Some("toggle active"));

    doc.set_attribute(buttons[0], "class", "a  b a").unwrap();
    assert!(doc.has_class(buttons[0], "b"));
    assert!(!doc.has_class(buttons[0], "toggle"));
}

#[test]
fn test_empty_document_has_no_structure() {
    let doc = Document::empty();
    assert_eq!(doc.document_element(), None);
    assert_eq!(doc.body(), None);
}

// ============================================================================
// DISPATCH
// ============================================================================

#[test]
fn test_click_bubbles_to_document() {
    let (mut page, header, buttons, _) = site();
    let path = Rc::new(RefCell::new(Vec::new()));

    for target in [EventTarget::Node(buttons[0]), EventTarget::Node(header), EventTarget::Document] {
        let path = Rc::clone(&path);
        page.add_event_listener(target, "click", move |_, event| {
            path.borrow_mut().push(event.current_target());
        });
    }

    assert!(page.click(buttons[0]));
    assert_eq!(
        *path.borrow(),
        vec![
            Some(EventTarget::Node(buttons[0])),
            Some(EventTarget::Node(header)),
            Some(EventTarget::Document),
        ]
    );
}

#[test]
fn test_listener_can_dispatch_and_schedule() {
    let (mut page, _, buttons, nav) = site();
    let log = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&log);
    page.add_event_listener(EventTarget::Document, "relay", move |_, event| {
        sink.borrow_mut().push(event.detail().unwrap_or_default().to_string());
    });
    page.add_event_listener(EventTarget::Node(buttons[0]), "click", move |page, _| {
        page.dispatch_document_event(Event::custom("relay").with_detail("now"));
        page.set_timeout(Duration::from_millis(10), move |page| {
            page.document_mut().set_attribute(nav, "hidden", "").unwrap();
            page.dispatch_document_event(Event::custom("relay").with_detail("later"));
        });
    });

    page.click(buttons[0]);
    assert_eq!(*log.borrow(), vec!["now"]);
    assert!(!page.document().element(nav).unwrap().has_attribute("hidden"));

    assert_eq!(page.run_until_idle(), 1);
    assert_eq!(page.now(), Duration::from_millis(10));
    assert_eq!(*log.borrow(), vec!["now", "later"]);
    assert!(page.document().element(nav).unwrap().has_attribute("hidden"));
}

// ============================================================================
// TIMERS
// ============================================================================

#[test]
fn test_timers_fire_in_deadline_then_schedule_order() {
    let mut page = Page::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    for (label, ms) in [("b", 20), ("a", 10), ("c", 20)] {
        let order = Rc::clone(&order);
        page.set_timeout(Duration::from_millis(ms), move |_| order.borrow_mut().push(label));
    }

    assert_eq!(page.advance(Duration::from_millis(15)), 1);
    assert_eq!(page.advance(Duration::from_millis(5)), 2);
    assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn test_wall_clock_driver_respects_budget() {
    let mut page = Page::new();
    let fired = Rc::new(RefCell::new(0));
    for ms in [1, 2, 500] {
        let fired = Rc::clone(&fired);
        page.set_timeout(Duration::from_millis(ms), move |_| *fired.borrow_mut() += 1);
    }

    let count = smol::block_on(dgt_dom::driver::run_for(&mut page, Duration::from_millis(20)));
    assert_eq!(count, 2);
    assert_eq!(*fired.borrow(), 2);
    assert_eq!(page.timers().pending_count(), 1);
}

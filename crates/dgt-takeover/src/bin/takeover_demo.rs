//! DG Takeover demo
//!
//! Builds a page with one trigger and one panel, opens the takeover with a
//! click, closes it with a command event and logs every signal on the way.
//!
//! Usage: `takeover-demo [duration-seconds]`

use anyhow::Context;
use dgt_dom::{Event, Page, driver};
use dgt_takeover::{CLASS_OPEN, Command, MENU_ATTR, TOGGLE_ATTR, Takeover, TakeoverOptions};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let duration = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<f64>().with_context(|| format!("invalid duration {arg:?}"))?,
        None => 0.5,
    };

    let mut page = Page::new();
    let doc = page.document_mut();
    let body = doc.body().context("page has no body")?;
    let button = doc.create_element("button");
    let nav = doc.create_element("nav");
    doc.append_child(body, button)?;
    doc.append_child(body, nav)?;
    doc.set_attribute(button, TOGGLE_ATTR, "nav")?;
    doc.set_attribute(nav, MENU_ATTR, "nav")?;

    let takeover = Takeover::new(&mut page, "nav", TakeoverOptions::new().with_duration(duration));
    takeover.status()?;

    let subscription = takeover.subscribe(|page, signal| {
        tracing::info!("signal {} at {:?}", signal, page.now());
    });

    page.click(button);
    driver::block_until_idle(&mut page);
    tracing::info!(
        "open: {}, panel has {}: {}",
        takeover.is_open(),
        CLASS_OPEN,
        page.document().has_class(nav, CLASS_OPEN)
    );

    page.dispatch_document_event(Event::custom(Command::ToggleClose.event_type()));
    driver::block_until_idle(&mut page);
    tracing::info!("open: {}", takeover.is_open());

    subscription.cancel();
    takeover.dispose(&mut page);
    Ok(())
}

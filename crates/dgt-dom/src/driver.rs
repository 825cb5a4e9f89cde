//! Wall-clock driver
//!
//! Runs a page's timer queue against real time on the `smol` executor, for
//! embedders that do not drive the clock themselves.

use std::time::Duration;

use crate::Page;

/// Sleep until each pending timer is due and fire it, until the queue is empty.
/// Returns the number of timers fired.
pub async fn run_until_idle(page: &mut Page) -> usize {
    let mut fired = 0;
    while let Some(wait) = page.time_until_next_timer() {
        if !wait.is_zero() {
            smol::Timer::after(wait).await;
        }
        fired += page.advance(wait);
    }
    fired
}

/// Like [`run_until_idle`], but gives up once `budget` of page time has
/// passed. Returns the number of timers fired.
pub async fn run_for(page: &mut Page, budget: Duration) -> usize {
    let deadline = page.now().saturating_add(budget);
    let mut fired = 0;
    while let Some(wait) = page.time_until_next_timer() {
        let remaining = deadline.saturating_sub(page.now());
        if wait > remaining {
            smol::Timer::after(remaining).await;
            fired += page.advance(remaining);
            break;
        }
        if !wait.is_zero() {
            smol::Timer::after(wait).await;
        }
        fired += page.advance(wait);
    }
    fired
}

/// Blocking form of [`run_until_idle`]
pub fn block_until_idle(page: &mut Page) -> usize {
    smol::block_on(run_until_idle(page))
}

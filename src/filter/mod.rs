//! Filters that decide whether a [`Channel`] admits an event.
//!
//! A channel evaluates its filters in the order they were added. Each
//! [`Filter`] answers with a [`FilterResult`]: [`Pass`] and [`Deny`] end the
//! evaluation, while [`Neutral`] defers to the next filter. If every filter is
//! neutral, or there are no filters at all, the event is admitted.
//!
//! Filters form a priority chain, not a vote. A [`Deny`] placed after a
//! [`Pass`] is never consulted.
//!
//! # Examples
//!
//! ```
//! # use log_channel::filter::{filter_fn, FilterChain, FilterResult, Decision};
//! # use log_channel::Event;
//! # use tracing::Level;
//! let mut chain = FilterChain::new();
//! chain.push(filter_fn(|event: &Event| {
//!     if event.target() == "noisy" {
//!         FilterResult::Deny
//!     } else {
//!         FilterResult::Neutral
//!     }
//! }));
//!
//! let noisy = Event::new(Level::INFO, "tick").with_target("noisy");
//! let quiet = Event::new(Level::INFO, "started").with_target("app");
//!
//! assert_eq!(chain.evaluate(&noisy), Decision::Reject);
//! assert_eq!(chain.evaluate(&quiet), Decision::Accept);
//! ```
//!
//! [`Channel`]: crate::Channel
//! [`Pass`]: FilterResult::Pass
//! [`Deny`]: FilterResult::Deny
//! [`Neutral`]: FilterResult::Neutral
use crate::event::Event;
use std::fmt;
use std::sync::Arc;

mod chain;
pub use chain::{Decision, FilterChain, Filters};

/// The outcome of testing one [`Filter`] against one [`Event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterResult {
    /// The event is admitted and evaluation stops.
    Pass,
    /// The event is discarded and evaluation stops.
    Deny,
    /// No opinion, the next filter decides.
    Neutral,
}

/// A predicate deciding whether an [`Event`] is admitted.
///
/// Implementors may keep internal state, such as counters, through interior
/// mutability. They only ever see a shared reference to the event.
pub trait Filter: Send + Sync {
    /// Tests the event.
    fn test(&self, event: &Event) -> FilterResult;
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn test(&self, event: &Event) -> FilterResult {
        self.as_ref().test(event)
    }
}

impl<F: Filter + ?Sized> Filter for Arc<F> {
    fn test(&self, event: &Event) -> FilterResult {
        self.as_ref().test(event)
    }
}

/// A [`Filter`] that admits every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassFilter;

impl Filter for PassFilter {
    fn test(&self, _event: &Event) -> FilterResult {
        FilterResult::Pass
    }
}

/// A [`Filter`] that rejects every event.
///
/// Placed last in a chain, it turns the default-allow policy into
/// default-deny.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenyFilter;

impl Filter for DenyFilter {
    fn test(&self, _event: &Event) -> FilterResult {
        FilterResult::Deny
    }
}

/// A [`Filter`] implemented by a closure.
///
/// This type is returned by [`filter_fn`].
#[derive(Clone)]
pub struct FilterFn<F> {
    function: F,
}

/// Returns a [`Filter`] that calls `function` to test each event.
pub fn filter_fn<F>(function: F) -> FilterFn<F>
where
    F: Fn(&Event) -> FilterResult + Send + Sync,
{
    FilterFn { function }
}

impl<F> Filter for FilterFn<F>
where
    F: Fn(&Event) -> FilterResult + Send + Sync,
{
    #[inline]
    fn test(&self, event: &Event) -> FilterResult {
        (self.function)(event)
    }
}

impl<F> fmt::Debug for FilterFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterFn").finish_non_exhaustive()
    }
}

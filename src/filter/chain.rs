use crate::event::Event;
use crate::filter::{Filter, FilterResult};
use std::fmt;
use std::slice;

/// Whether a [`FilterChain`] admits an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    /// The event is formatted and delivered.
    Accept,
    /// The event is dropped before formatting.
    Reject,
}

impl Decision {
    /// Returns `true` if the event was admitted.
    pub fn is_accepted(self) -> bool {
        matches!(self, Decision::Accept)
    }
}

/// An ordered sequence of [`Filter`]s.
///
/// Filters are evaluated in insertion order, and the first decisive
/// [`FilterResult`] wins.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Returns an empty chain, which admits everything.
    pub fn new() -> Self {
        FilterChain::default()
    }

    /// Appends a filter to the end of the chain.
    ///
    /// There is no de-duplication: pushing the same shared filter twice means
    /// it is tested twice.
    pub fn push<F>(&mut self, filter: F)
    where
        F: 'static + Filter,
    {
        self.filters.push(Box::new(filter));
    }

    /// Removes every filter without tearing any of them down.
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns an iterator over the filters, first added first.
    pub fn iter(&self) -> Filters<'_> {
        Filters {
            inner: self.filters.iter(),
        }
    }

    /// Runs `event` through the chain.
    ///
    /// Stops at the first filter that returns [`FilterResult::Pass`] or
    /// [`FilterResult::Deny`]. Later filters are not tested. An empty or
    /// all-neutral chain accepts.
    pub fn evaluate(&self, event: &Event) -> Decision {
        for filter in self.filters.iter() {
            match filter.test(event) {
                FilterResult::Deny => return Decision::Reject,
                FilterResult::Pass => return Decision::Accept,
                FilterResult::Neutral => {}
            }
        }
        Decision::Accept
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("len", &self.filters.len())
            .finish()
    }
}

impl<'a> IntoIterator for &'a FilterChain {
    type Item = &'a dyn Filter;
    type IntoIter = Filters<'a>;

    fn into_iter(self) -> Filters<'a> {
        self.iter()
    }
}

/// An iterator over the filters of a [`FilterChain`].
///
/// This type is returned by [`FilterChain::iter`].
pub struct Filters<'a> {
    inner: slice::Iter<'a, Box<dyn Filter>>,
}

impl<'a> Iterator for Filters<'a> {
    type Item = &'a dyn Filter;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|filter| filter.as_ref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Filters<'_> {}

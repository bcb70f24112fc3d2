//! The named, filtered, formatted log channel.
//!
//! See [`Channel`] for more details.
use crate::error::{Error, Result};
use crate::event::Event;
use crate::filter::{Decision, Filter, FilterChain, Filters};
use crate::formatter::{Formatter, FormatterSource};
use crate::layer::ChannelLayer;
use crate::transport::{Discard, MakeStderr, MakeStdout, Transport, Writer};
use std::fmt;
use tracing::{debug, trace};

/// A named sink for log events.
///
/// A `Channel` owns an ordered [`FilterChain`], exactly one [`Formatter`], and
/// a [`Transport`]. Every event passed to [`send`] is tested against the
/// filters; if admitted, it is formatted and delivered by the transport.
///
/// # Examples
///
/// ```
/// # use log_channel::filter::{filter_fn, FilterResult};
/// # use log_channel::transport::Capture;
/// # use log_channel::{Channel, Event};
/// # use tracing::Level;
/// # fn main() -> Result<(), log_channel::Error> {
/// let capture = Capture::new();
/// let logs = capture.handle();
///
/// let mut channel = Channel::new("audit", None, capture, ())?;
/// channel.add_filter(filter_fn(|event: &Event| match event.level() {
///     Level::TRACE | Level::DEBUG => FilterResult::Deny,
///     _ => FilterResult::Neutral,
/// }));
///
/// channel.send(&Event::new(Level::DEBUG, "dropped"))?;
/// channel.send(&Event::new(Level::WARN, "kept"))?;
///
/// assert_eq!(logs.len(), 1);
/// # Ok(())
/// # }
/// ```
///
/// Only [`Filter`]s can be added:
///
/// ```compile_fail
/// # use log_channel::Channel;
/// # use log_channel::transport::Discard;
/// let mut channel = Channel::new("strict", None, Discard, ()).unwrap();
/// channel.add_filter("not a filter");
/// ```
///
/// [`send`]: Channel::send
pub struct Channel<T: Transport> {
    name: String,
    formatter: Box<dyn Formatter>,
    filters: FilterChain,
    transport: T,
    closed: bool,
}

impl<T: Transport> Channel<T> {
    /// Creates a new [`Channel`].
    ///
    /// The formatter is resolved from `format`: `None` selects the
    /// [`BasicFormatter`], a function is wrapped in a [`WrapperFormatter`], and
    /// a formatter is used as is. `options` are handed to
    /// [`Transport::config`] once everything else is in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is empty or only
    /// whitespace.
    ///
    /// [`BasicFormatter`]: crate::formatter::BasicFormatter
    /// [`WrapperFormatter`]: crate::formatter::WrapperFormatter
    pub fn new(
        name: impl Into<String>,
        format: Option<FormatterSource>,
        transport: T,
        options: T::Options,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument {
                argument: "name",
                reason: "must contain at least one non-whitespace character",
            });
        }

        let mut channel = Channel {
            name,
            formatter: FormatterSource::resolve(format),
            filters: FilterChain::new(),
            transport,
            closed: false,
        };

        channel.transport.config(options);
        debug!(channel = %channel.name, "configured channel");

        Ok(channel)
    }

    /// Returns the channel's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the formatter every admitted event is rendered with.
    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Appends `filter` to the end of the filter chain.
    ///
    /// Filters run in the order they were added.
    pub fn add_filter<F>(&mut self, filter: F)
    where
        F: 'static + Filter,
    {
        self.filters.push(filter);
        debug!(channel = %self.name, filters = self.filters.len(), "added filter");
    }

    /// Removes every filter, so the channel admits everything again.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        debug!(channel = %self.name, "cleared filters");
    }

    /// Returns an iterator over the filters, in evaluation order.
    pub fn filters(&self) -> Filters<'_> {
        self.filters.iter()
    }

    /// Runs `event` through the filter chain without sending it.
    pub fn admits(&self, event: &Event) -> bool {
        self.filters.evaluate(event).is_accepted()
    }

    /// Sends `event` through the channel.
    ///
    /// The filter chain is evaluated first. A rejected event is dropped and
    /// `Ok(Decision::Reject)` is returned without touching the formatter or
    /// the transport. An admitted event is formatted and delivered.
    ///
    /// # Errors
    ///
    /// This method is fail-fast: it returns [`Error::Closed`] after
    /// [`close`], [`Error::Format`] if the formatter fails, and
    /// [`Error::Transport`] if delivery fails. The event is lost in each case.
    ///
    /// [`close`]: Channel::close
    pub fn send(&mut self, event: &Event) -> Result<Decision> {
        if self.closed {
            return Err(Error::Closed {
                channel: self.name.clone(),
            });
        }

        let decision = self.filters.evaluate(event);
        trace!(channel = %self.name, ?decision, "evaluated filter chain");
        if !decision.is_accepted() {
            return Ok(decision);
        }

        let rendered = match self.formatter.format(event) {
            Ok(rendered) => rendered,
            Err(source) => {
                return Err(Error::Format {
                    channel: self.name.clone(),
                    source,
                })
            }
        };

        self.transport
            .deliver(rendered)
            .map_err(|source| Error::Transport {
                channel: self.name.clone(),
                source,
            })?;

        Ok(decision)
    }

    /// Closes the channel, releasing the transport's resources.
    ///
    /// Closing an already closed channel does nothing. Dropping a channel
    /// closes it.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.transport.close();
        debug!(channel = %self.name, "closed channel");
    }

    /// Returns `true` once [`close`] has been called.
    ///
    /// [`close`]: Channel::close
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Converts the channel into a [`ChannelLayer`] that receives every
    /// [`tracing`] event.
    ///
    /// This is the same as `ChannelLayer::new(channel)`.
    pub fn into_layer(self) -> ChannelLayer<T> {
        ChannelLayer::new(self)
    }
}

impl Channel<Discard> {
    /// Creates a [`ChannelBuilder`] for a channel called `name`.
    ///
    /// The transport is chosen last, in [`ChannelBuilder::build`].
    pub fn builder(name: impl Into<String>) -> ChannelBuilder {
        ChannelBuilder {
            name: name.into(),
            format: None,
            filters: FilterChain::new(),
        }
    }
}

impl Channel<Writer<MakeStdout>> {
    /// Returns a channel that writes basic-formatted lines to stdout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is blank.
    pub fn stdout(name: impl Into<String>) -> Result<Self> {
        Channel::builder(name).build(Writer::new(MakeStdout))
    }
}

impl Channel<Writer<MakeStderr>> {
    /// Returns a channel that writes basic-formatted lines to stderr.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is blank.
    pub fn stderr(name: impl Into<String>) -> Result<Self> {
        Channel::builder(name).build(Writer::new(MakeStderr))
    }
}

impl<T: Transport> Drop for Channel<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T: Transport> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("filters", &self.filters)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

/// A type for configuring [`Channel`]s.
///
/// This type is returned by [`Channel::builder`].
///
/// # Examples
///
/// ```
/// # use log_channel::filter::PassFilter;
/// # use log_channel::transport::Capture;
/// # use log_channel::{Channel, Event};
/// # fn main() -> Result<(), log_channel::Error> {
/// let channel = Channel::builder("requests")
///     .format_with(|event: &Event| format!("{} {}", event.level(), event.target()))
///     .filter(PassFilter)
///     .build(Capture::new())?;
///
/// assert_eq!(channel.filters().len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ChannelBuilder {
    name: String,
    format: Option<FormatterSource>,
    filters: FilterChain,
}

impl ChannelBuilder {
    /// Formats events with `formatter`.
    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: 'static + Formatter,
    {
        self.format = Some(FormatterSource::formatter(formatter));
        self
    }

    /// Formats events by calling `function`.
    pub fn format_with<F>(mut self, function: F) -> Self
    where
        F: 'static + Fn(&Event) -> String + Send + Sync,
    {
        self.format = Some(FormatterSource::function(function));
        self
    }

    /// Appends `filter` to the channel's filter chain.
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: 'static + Filter,
    {
        self.filters.push(filter);
        self
    }

    /// Builds the channel on `transport` with default transport options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is blank.
    pub fn build<T>(self, transport: T) -> Result<Channel<T>>
    where
        T: Transport,
        T::Options: Default,
    {
        self.build_with(transport, T::Options::default())
    }

    /// Builds the channel on `transport`, configuring it with `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is blank.
    pub fn build_with<T: Transport>(self, transport: T, options: T::Options) -> Result<Channel<T>> {
        let mut channel = Channel::new(self.name, self.format, transport, options)?;
        channel.filters = self.filters;
        Ok(channel)
    }
}

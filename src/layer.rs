//! A [`Layer`] that feeds [`tracing`] events into a [`Channel`].
//!
//! See [`ChannelLayer`] for more details.
use crate::channel::Channel;
use crate::event::{self, Event, FieldSet};
use crate::fail;
use crate::transport::Transport;
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::field::{Field, Visit};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer};

// Events emitted by this crate are never fed back into a channel.
const OWN_TARGET: &str = "log_channel";

/// A [`Layer`] that converts every [`tracing`] event into an [`Event`] and
/// sends it through a [`Channel`].
///
/// A channel is driven by one caller at a time, so the layer keeps it behind
/// a [`Mutex`]. Clones of the layer share the same channel, which lets one
/// clone be installed while another adjusts filters through
/// [`with_channel`]. Failures to send are reported on stderr, since there is
/// no caller to return them to.
///
/// Events emitted while the layer is sending are not dispatched again, so
/// filters and formatters may log through [`tracing`]. The lock is also held
/// for the whole of a [`with_channel`] call, where an event would reach the
/// layer and wait on the same lock. Events targeting this crate are skipped
/// for that reason; the closure itself should not emit any.
///
/// # Examples
///
/// ```
/// # use log_channel::transport::Capture;
/// # use log_channel::Channel;
/// # use tracing_subscriber::layer::SubscriberExt;
/// # use tracing_subscriber::Registry;
/// # fn main() -> Result<(), log_channel::Error> {
/// let capture = Capture::new();
/// let logs = capture.handle();
///
/// let layer = Channel::builder("app").build(capture)?.into_layer();
/// tracing::subscriber::with_default(Registry::default().with(layer), || {
///     tracing::info!(user = "ada", "logged in");
/// });
///
/// assert!(logs.lines()[0].ends_with("logged in | user: ada"));
/// # Ok(())
/// # }
/// ```
///
/// [`Layer`]: tracing_subscriber::layer::Layer
/// [`with_channel`]: ChannelLayer::with_channel
pub struct ChannelLayer<T: Transport> {
    channel: Arc<Mutex<Channel<T>>>,
}

impl<T: Transport> ChannelLayer<T> {
    /// Wraps `channel` in a new [`ChannelLayer`].
    pub fn new(channel: Channel<T>) -> Self {
        ChannelLayer {
            channel: Arc::new(Mutex::new(channel)),
        }
    }

    /// Runs `f` with exclusive access to the wrapped channel.
    ///
    /// This can be used to change filters while the layer is installed.
    pub fn with_channel<R>(&self, f: impl FnOnce(&mut Channel<T>) -> R) -> R {
        let mut channel = self.channel.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut channel)
    }
}

impl<T: Transport> Clone for ChannelLayer<T> {
    fn clone(&self) -> Self {
        ChannelLayer {
            channel: Arc::clone(&self.channel),
        }
    }
}

impl<T: Transport> From<Channel<T>> for ChannelLayer<T> {
    fn from(channel: Channel<T>) -> Self {
        ChannelLayer::new(channel)
    }
}

impl<T: Transport> fmt::Debug for ChannelLayer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelLayer")
            .field("channel", &self.channel)
            .finish()
    }
}

fn is_own_target(target: &str) -> bool {
    match target.strip_prefix(OWN_TARGET) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

struct Visitor {
    message: Option<String>,
    fields: FieldSet,
}

impl Visit for Visitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record(field, format!("{:?}", value));
    }
}

impl Visitor {
    fn record(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" if self.message.is_none() => self.message = Some(value),
            key => self.fields.push(event::Field::new(key, value)),
        }
    }
}

impl<T, S> Layer<S> for ChannelLayer<T>
where
    T: Transport,
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }

        let mut visitor = Visitor {
            message: None,
            fields: FieldSet::new(),
        };

        event.record(&mut visitor);

        let event = Event::with_parts(
            *metadata.level(),
            Cow::Borrowed(metadata.target()),
            visitor.message,
            visitor.fields,
        );

        if let Err(err) = self.with_channel(|channel| channel.send(&event)) {
            fail::send_failed(&err);
        }
    }
}

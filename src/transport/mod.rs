//! Trait for delivering rendered events to their destination.
//!
//! See [`Transport`] for more details.
use std::error::Error;
use std::fmt;
use std::io;
use std::sync::mpsc::{Sender, SyncSender};

mod capture;
pub use capture::{Capture, CaptureHandle};

mod writer;
pub use writer::{MakeStderr, MakeStdout, Writer, WriterOptions};

cfg_sync! {
    mod sync;
    pub use sync::AsyncWriter;
}

/// The destination half of a [`Channel`].
///
/// A channel does the filtering and formatting; a `Transport` only moves the
/// rendered output somewhere, such as:
/// * Writing to stdout or a file
/// * Sending over a network
/// * Storing in memory for later access
/// * Ignoring
///
/// Every hook has a no-op default, so a transport that overrides nothing is a
/// valid null object. See [`Discard`].
///
/// [`Channel`]: crate::Channel
pub trait Transport: 'static + Send {
    /// Settings handed to [`Transport::config`] while the channel is built.
    type Options;

    /// Applies transport-specific settings.
    ///
    /// Called exactly once, as the last step of building the channel.
    fn config(&mut self, _options: Self::Options) {}

    /// Delivers one rendered event.
    ///
    /// # Errors
    ///
    /// If the output cannot be delivered, the error is returned from
    /// [`Channel::send`].
    ///
    /// [`Channel::send`]: crate::Channel::send
    fn deliver(&mut self, _rendered: String) -> io::Result<()> {
        Ok(())
    }

    /// Releases any resources held by the transport.
    ///
    /// The owning channel calls this at most once. It is best-effort and
    /// cannot fail.
    fn close(&mut self) {}
}

/// A [`Transport`] that drops every event it is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl Transport for Discard {
    type Options = ();
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    type Options = T::Options;

    fn config(&mut self, options: Self::Options) {
        self.as_mut().config(options)
    }

    fn deliver(&mut self, rendered: String) -> io::Result<()> {
        self.as_mut().deliver(rendered)
    }

    fn close(&mut self) {
        self.as_mut().close()
    }
}

/// An [`Error`] type for when the receiving half of a standard channel has
/// hung up.
#[derive(Debug)]
pub struct ReceiverClosedError;

impl fmt::Display for ReceiverClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "Sending on a closed channel, the receiving half was dropped before the log channel was closed.".fmt(f)
    }
}

impl Error for ReceiverClosedError {}

impl Transport for Sender<String> {
    type Options = ();

    fn deliver(&mut self, rendered: String) -> io::Result<()> {
        self.send(rendered)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, ReceiverClosedError))
    }
}

impl Transport for SyncSender<String> {
    type Options = ();

    fn deliver(&mut self, rendered: String) -> io::Result<()> {
        self.send(rendered)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, ReceiverClosedError))
    }
}

//! The error type returned by channel operations.
use crate::formatter::FormatError;
use std::io;
use thiserror::Error;

/// The result type of fallible [`Channel`] operations.
///
/// [`Channel`]: crate::Channel
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while constructing a [`Channel`] or sending through it.
///
/// [`Channel`]: crate::Channel
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An argument was rejected at construction time.
    ///
    /// This is a programmer error and is never retried.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: &'static str,
    },

    /// The channel's formatter could not render an admitted event.
    #[error("channel `{channel}` failed to format an event")]
    Format {
        channel: String,
        #[source]
        source: FormatError,
    },

    /// The transport could not deliver rendered output.
    #[error("channel `{channel}` failed to deliver an event")]
    Transport {
        channel: String,
        #[source]
        source: io::Error,
    },

    /// The channel was already closed.
    #[error("channel `{channel}` is closed")]
    Closed { channel: String },
}

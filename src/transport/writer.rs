use crate::transport::Transport;
#[cfg(feature = "serde")]
use serde::Deserialize;
use std::io::{self, Write};
use tracing::debug;
use tracing_subscriber::fmt::MakeWriter;

/// A [`Transport`] that writes each rendered event to a [`MakeWriter`].
///
/// # Examples
///
/// ```
/// # use log_channel::transport::{MakeStderr, Writer, WriterOptions};
/// # use log_channel::{Channel, Event};
/// # use tracing::Level;
/// # fn main() -> Result<(), log_channel::Error> {
/// let mut channel = Channel::builder("console")
///     .build_with(Writer::new(MakeStderr), WriterOptions { newline: true })?;
///
/// channel.send(&Event::new(Level::INFO, "printed to stderr"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Writer<W> {
    make_writer: W,
    newline: bool,
}

/// Settings for a [`Writer`] transport.
///
/// With the `serde` feature enabled, this can be loaded from configuration
/// files; missing keys take their default values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriterOptions {
    /// Whether a newline is written after each event. Defaults to `true`.
    pub newline: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions { newline: true }
    }
}

impl<W> Writer<W>
where
    W: 'static + for<'a> MakeWriter<'a> + Send,
{
    /// Returns a new [`Writer`] that writes to `make_writer`.
    pub fn new(make_writer: W) -> Self {
        Writer {
            make_writer,
            newline: WriterOptions::default().newline,
        }
    }
}

impl<W> Transport for Writer<W>
where
    W: 'static + for<'a> MakeWriter<'a> + Send,
{
    type Options = WriterOptions;

    fn config(&mut self, options: WriterOptions) {
        self.newline = options.newline;
    }

    fn deliver(&mut self, mut rendered: String) -> io::Result<()> {
        if self.newline {
            rendered.push('\n');
        }
        self.make_writer.make_writer().write_all(rendered.as_bytes())
    }

    fn close(&mut self) {
        if let Err(err) = self.make_writer.make_writer().flush() {
            debug!(error = %err, "failed to flush writer on close");
        }
    }
}

/// A [`MakeWriter`] that writes to stdout.
///
/// This is functionally the same as using [`std::io::stdout`] as a `MakeWriter`,
/// except it has a named type and can therefore be used in type signatures.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeStdout;

/// A [`MakeWriter`] that writes to stderr.
///
/// This is functionally the same as using [`std::io::stderr`] as a `MakeWriter`,
/// except it has a named type and can therefore be used in type signatures.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeStderr;

impl<'a> MakeWriter<'a> for MakeStdout {
    type Writer = io::Stdout;

    fn make_writer(&'a self) -> Self::Writer {
        io::stdout()
    }
}

impl<'a> MakeWriter<'a> for MakeStderr {
    type Writer = io::Stderr;

    fn make_writer(&'a self) -> Self::Writer {
        io::stderr()
    }
}

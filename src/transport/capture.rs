use crate::transport::Transport;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A [`Transport`] that keeps rendered events in memory.
///
/// The lines are read back through a [`CaptureHandle`], which stays usable
/// after the channel itself is gone. This is mostly useful in tests.
///
/// # Examples
///
/// ```
/// # use log_channel::transport::Capture;
/// # use log_channel::{Channel, Event};
/// # use tracing::Level;
/// # fn main() -> Result<(), log_channel::Error> {
/// let capture = Capture::new();
/// let logs = capture.handle();
///
/// let mut channel = Channel::builder("memory")
///     .format_with(|event: &Event| event.message().unwrap_or_default().to_owned())
///     .build(capture)?;
///
/// channel.send(&Event::new(Level::INFO, "kept"))?;
/// assert_eq!(logs.lines(), vec!["kept".to_owned()]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Capture {
    shared: Arc<Mutex<Captured>>,
}

/// Read access to what a [`Capture`] transport received.
#[derive(Clone, Debug)]
pub struct CaptureHandle {
    shared: Arc<Mutex<Captured>>,
}

#[derive(Debug, Default)]
struct Captured {
    lines: Vec<String>,
    closed: bool,
}

impl Capture {
    pub fn new() -> Self {
        Capture::default()
    }

    /// Returns a handle onto this transport's lines.
    pub fn handle(&self) -> CaptureHandle {
        CaptureHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Transport for Capture {
    type Options = ();

    fn deliver(&mut self, rendered: String) -> io::Result<()> {
        lock(&self.shared).lines.push(rendered);
        Ok(())
    }

    fn close(&mut self) {
        lock(&self.shared).closed = true;
    }
}

impl CaptureHandle {
    /// Returns a copy of every line delivered so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        lock(&self.shared).lines.clone()
    }

    /// Removes and returns every line delivered so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut lock(&self.shared).lines)
    }

    pub fn len(&self) -> usize {
        lock(&self.shared).lines.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.shared).lines.is_empty()
    }

    /// Returns `true` once the owning channel has been closed.
    pub fn is_closed(&self) -> bool {
        lock(&self.shared).closed
    }
}

// A panic while holding the lock cannot leave `Captured` half-written.
fn lock(shared: &Mutex<Captured>) -> MutexGuard<'_, Captured> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

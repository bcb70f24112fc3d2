use crate::transport::{ReceiverClosedError, Transport};
use std::future::Future;
use std::io::{self, Write};
use tokio::sync::mpsc;
use tracing_subscriber::fmt::MakeWriter;

/// A [`Transport`] that hands rendered events to a [`tokio`] task for writing.
///
/// The sending side never blocks on I/O. Closing the channel drops the
/// sender, after which the writing task drains what is left and finishes.
pub struct AsyncWriter {
    tx: Option<mpsc::UnboundedSender<String>>,
}

impl AsyncWriter {
    /// Creates a new [`AsyncWriter`] and the [`Future`] that writes its output,
    /// returning both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use log_channel::transport::{AsyncWriter, MakeStdout};
    /// # use log_channel::{Channel, Event};
    /// # use tracing::Level;
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let (transport, fut) = AsyncWriter::spawn(MakeStdout);
    ///     let handle = tokio::spawn(fut);
    ///
    ///     let mut channel = Channel::builder("async").build(transport)?;
    ///     channel.send(&Event::new(Level::INFO, "written off-thread"))?;
    ///
    ///     // closing drops the sender so the task can finish
    ///     channel.close();
    ///     handle.await?;
    ///     Ok(())
    /// }
    /// ```
    pub fn spawn<W>(make_writer: W) -> (Self, impl Future<Output = ()>)
    where
        W: 'static + for<'a> MakeWriter<'a> + Send,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let handle = async move {
            while let Some(mut rendered) = rx.recv().await {
                rendered.push('\n');
                if let Err(err) = make_writer.make_writer().write_all(rendered.as_bytes()) {
                    eprintln!("{}, dropping log line...", err);
                }
            }
        };

        let transport = AsyncWriter::from(tx);

        (transport, handle)
    }
}

impl From<mpsc::UnboundedSender<String>> for AsyncWriter {
    fn from(tx: mpsc::UnboundedSender<String>) -> Self {
        AsyncWriter { tx: Some(tx) }
    }
}

impl Transport for AsyncWriter {
    type Options = ();

    fn deliver(&mut self, rendered: String) -> io::Result<()> {
        match self.tx.as_ref() {
            Some(tx) => tx
                .send(rendered)
                .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, ReceiverClosedError)),
            None => Err(io::Error::new(io::ErrorKind::NotConnected, ReceiverClosedError)),
        }
    }

    fn close(&mut self) {
        self.tx = None;
    }
}

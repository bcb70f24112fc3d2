use crate::event::Event;
use crate::formatter::{FormatError, Formatter};
use std::fmt::{self, Write};
use tracing::Level;

/// The default [`Formatter`], one line per event.
///
/// # Examples
///
/// ```log
/// INFO     💬 [request]: served /index.html | status: 200 | micros: 412
/// ERROR    🚨 [db]: connection reset
/// WARN     🚧 event without a target
/// ```
///
/// With the `uuid` and `chrono` features enabled, each line is prefixed with
/// the event ID and an RFC 3339 timestamp. No trailing newline is written;
/// that is up to the transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicFormatter {
    _priv: (),
}

impl BasicFormatter {
    pub const fn new() -> Self {
        BasicFormatter { _priv: () }
    }

    fn format_shared(&self, event: &Event, writer: &mut String) -> fmt::Result {
        #[cfg(feature = "uuid")]
        write!(writer, "{} ", event.uuid())?;

        #[cfg(feature = "chrono")]
        write!(writer, "{:<32} ", event.timestamp().to_rfc3339())?;

        write!(writer, "{:<8} ", event.level())
    }

    fn format_event(&self, event: &Event, writer: &mut String) -> fmt::Result {
        let message = event.message().unwrap_or("");

        match event.target() {
            "" => write!(writer, "{} {}", icon(event.level()), message)?,
            target => write!(writer, "{} [{}]: {}", icon(event.level()), target, message)?,
        }

        for field in event.fields().iter() {
            write!(writer, " | {}: {}", field.key(), field.value())?;
        }

        Ok(())
    }
}

impl Formatter for BasicFormatter {
    fn format(&self, event: &Event) -> Result<String, FormatError> {
        let mut writer = String::with_capacity(128);

        self.format_shared(event, &mut writer)?;
        self.format_event(event, &mut writer)?;

        Ok(writer)
    }
}

fn icon(level: Level) -> char {
    match level {
        Level::TRACE => '📍',
        Level::DEBUG => '🐛',
        Level::INFO => '💬',
        Level::WARN => '🚧',
        _ => '🚨',
    }
}

use crate::event::Event;
use crate::formatter::{FormatError, Formatter};

/// Format events as JSON objects.
///
/// # Examples
///
/// ```json
/// {"uuid":"5aacc2d4-f625-401b-9bb8-dc5c355fd31b","timestamp":"2022-03-24T16:08:17.761149+00:00","level":"INFO","target":"request","message":"served","fields":{"status":"200"}}
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Json {
    /// Whether or not the output is pretty-printed over several lines.
    pretty: bool,
}

impl Json {
    /// One object per line.
    pub const fn compact() -> Self {
        Json { pretty: false }
    }

    /// Indented, multi-line objects.
    pub const fn pretty() -> Self {
        Json { pretty: true }
    }
}

impl Default for Json {
    fn default() -> Self {
        Json::compact()
    }
}

impl Formatter for Json {
    fn format(&self, event: &Event) -> Result<String, FormatError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(event)?
        } else {
            serde_json::to_string(event)?
        };
        Ok(rendered)
    }
}

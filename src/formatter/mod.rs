//! Strategies for rendering an [`Event`] into a string.
//!
//! A [`Channel`] holds exactly one [`Formatter`], chosen when the channel is
//! built from a [`FormatterSource`]:
//! * nothing: [`BasicFormatter`] is used;
//! * a function: it is wrapped in a [`WrapperFormatter`];
//! * a formatter: it is used as is.
//!
//! [`Channel`]: crate::Channel
use crate::event::Event;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

mod basic;
pub use basic::BasicFormatter;

cfg_json! {
    mod json;
    pub use json::Json;
}

/// The error a [`Formatter`] returns when it cannot render an event.
pub type FormatError = Box<dyn Error + Send + Sync>;

/// Format an [`Event`] into a `String`.
///
/// # Examples
///
/// ```
/// # use log_channel::formatter::{FormatError, Formatter};
/// # use log_channel::Event;
/// # use tracing::Level;
/// struct MessageOnly;
///
/// impl Formatter for MessageOnly {
///     fn format(&self, event: &Event) -> Result<String, FormatError> {
///         Ok(event.message().unwrap_or_default().to_owned())
///     }
/// }
///
/// let event = Event::new(Level::INFO, "hi");
/// assert_eq!(MessageOnly.format(&event).unwrap(), "hi");
/// ```
pub trait Formatter: Send + Sync {
    /// Renders the event, or returns an error.
    ///
    /// # Errors
    ///
    /// If the event cannot be rendered, an error is returned and the sending
    /// channel reports it to its caller.
    fn format(&self, event: &Event) -> Result<String, FormatError>;
}

impl<F: Formatter + ?Sized> Formatter for Box<F> {
    fn format(&self, event: &Event) -> Result<String, FormatError> {
        self.as_ref().format(event)
    }
}

impl<F: Formatter + ?Sized> Formatter for Arc<F> {
    fn format(&self, event: &Event) -> Result<String, FormatError> {
        self.as_ref().format(event)
    }
}

/// A [`Formatter`] that delegates to a plain function.
///
/// The function's output is returned unchanged.
///
/// # Examples
///
/// ```
/// # use log_channel::formatter::{Formatter, WrapperFormatter};
/// # use log_channel::Event;
/// # use tracing::Level;
/// let upper = WrapperFormatter::new(|event: &Event| {
///     event.message().unwrap_or_default().to_uppercase()
/// });
///
/// let event = Event::new(Level::INFO, "quiet please");
/// assert_eq!(upper.format(&event).unwrap(), "QUIET PLEASE");
/// ```
#[derive(Clone)]
pub struct WrapperFormatter<F> {
    function: F,
}

impl<F> WrapperFormatter<F>
where
    F: Fn(&Event) -> String + Send + Sync,
{
    /// Wraps `function`.
    pub fn new(function: F) -> Self {
        WrapperFormatter { function }
    }
}

impl<F> Formatter for WrapperFormatter<F>
where
    F: Fn(&Event) -> String + Send + Sync,
{
    #[inline]
    fn format(&self, event: &Event) -> Result<String, FormatError> {
        Ok((self.function)(event))
    }
}

impl<F> fmt::Debug for WrapperFormatter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperFormatter").finish_non_exhaustive()
    }
}

type RenderFn = Box<dyn Fn(&Event) -> String + Send + Sync>;

/// What a [`Channel`] is built to format with.
///
/// Anything that is neither a [`Formatter`] nor a function cannot become a
/// `FormatterSource`:
///
/// ```compile_fail
/// # use log_channel::formatter::FormatterSource;
/// let source = FormatterSource::formatter("not a formatter");
/// ```
///
/// [`Channel`]: crate::Channel
pub enum FormatterSource {
    /// A complete formatting strategy.
    Formatter(Box<dyn Formatter>),
    /// A plain function, wrapped in a [`WrapperFormatter`] on resolution.
    Function(RenderFn),
}

impl FormatterSource {
    /// Use `formatter` as is.
    pub fn formatter<F>(formatter: F) -> Self
    where
        F: 'static + Formatter,
    {
        FormatterSource::Formatter(Box::new(formatter))
    }

    /// Render with `function`.
    pub fn function<F>(function: F) -> Self
    where
        F: 'static + Fn(&Event) -> String + Send + Sync,
    {
        FormatterSource::Function(Box::new(function))
    }

    /// Resolves an optional source into the single formatter a channel holds.
    pub(crate) fn resolve(source: Option<FormatterSource>) -> Box<dyn Formatter> {
        match source {
            None => Box::new(BasicFormatter::new()),
            Some(FormatterSource::Function(function)) => Box::new(WrapperFormatter::new(function)),
            Some(FormatterSource::Formatter(formatter)) => formatter,
        }
    }
}

impl fmt::Debug for FormatterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterSource::Formatter(_) => f.pad("FormatterSource::Formatter(..)"),
            FormatterSource::Function(_) => f.pad("FormatterSource::Function(..)"),
        }
    }
}

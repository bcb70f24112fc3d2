//! Named log channels with ordered filter chains and pluggable formatters.
//!
//! # Overview
//!
//! A [`Channel`] is the unit of log dispatch. It receives [`Event`]s, runs
//! each one through an ordered chain of [`Filter`]s, and, if the event is
//! admitted, renders it with a [`Formatter`] before handing the output to a
//! [`Transport`].
//!
//! ```text
//! caller ──▶ Channel::send ──▶ filters ──▶ formatter ──▶ transport
//!                                 │
//!                                 └─ rejected: dropped
//! ```
//!
//! [`Filter`]: crate::filter::Filter
//! [`Formatter`]: crate::formatter::Formatter
//! [`Transport`]: crate::transport::Transport
//!
//! # Getting started
//!
//! ```
//! # use log_channel::filter::{filter_fn, FilterResult};
//! # use log_channel::{Channel, Event};
//! # use tracing::Level;
//! # fn main() -> Result<(), log_channel::Error> {
//! let mut channel = Channel::stdout("app")?;
//! channel.add_filter(filter_fn(|event: &Event| {
//!     if event.target() == "healthcheck" {
//!         FilterResult::Deny
//!     } else {
//!         FilterResult::Neutral
//!     }
//! }));
//!
//! channel.send(&Event::new(Level::INFO, "listening").with_field("port", 8080))?;
//! channel.send(&Event::new(Level::INFO, "ok").with_target("healthcheck"))?;
//! channel.close();
//! # Ok(())
//! # }
//! ```
//! ```log
//! INFO     💬 listening | port: 8080
//! ```
//!
//! # Filters
//!
//! Filters answer [`Pass`], [`Deny`], or [`Neutral`]. They are evaluated in
//! the order they were added and the first answer that is not [`Neutral`]
//! decides. When no filter decides, the event is admitted. See the
//! [`filter` module documentation][crate::filter].
//!
//! [`Pass`]: crate::filter::FilterResult::Pass
//! [`Deny`]: crate::filter::FilterResult::Deny
//! [`Neutral`]: crate::filter::FilterResult::Neutral
//!
//! # Formatters
//!
//! A channel is built with a formatter, a plain function, or neither, and
//! always ends up with exactly one [`Formatter`]:
//!
//! ```
//! # use log_channel::formatter::FormatterSource;
//! # use log_channel::transport::Discard;
//! # use log_channel::{Channel, Event};
//! # fn main() -> Result<(), log_channel::Error> {
//! // basic formatting
//! let basic = Channel::new("basic", None, Discard, ())?;
//!
//! // a function, wrapped into a formatter
//! let terse = Channel::new(
//!     "terse",
//!     Some(FormatterSource::function(|event: &Event| {
//!         event.message().unwrap_or_default().to_owned()
//!     })),
//!     Discard,
//!     (),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Integrating with `tracing`
//!
//! [`Channel::into_layer`] turns a channel into a [`ChannelLayer`], a
//! [`tracing_subscriber`] layer that sends every [`tracing`] event through the
//! channel.
//!
//! # Feature flags
//!
//! * `full`: Enables all features listed below.
//! * `uuid`: Gives each event a unique ID.
//! * `chrono`: Enables timestamps on events.
//! * `smallvec`: Enables some performance optimizations.
//! * `sync`: Enables the [`AsyncWriter`] transport.
//! * `json`: Enables the [`Json`] formatter.
//! * `env-filter`: Re-exports [`EnvFilter`] from the prelude.
//!
//! [`AsyncWriter`]: crate::transport::AsyncWriter
//! [`Json`]: crate::formatter::Json
//! [`EnvFilter`]: tracing_subscriber::filter::EnvFilter

#[doc(hidden)]
#[macro_use]
mod cfg;
pub mod channel;
pub mod error;
pub mod event;
mod fail;
pub mod filter;
pub mod formatter;
pub mod layer;
pub mod prelude;
#[cfg(feature = "serde")]
mod ser;
pub mod transport;

pub use crate::channel::{Channel, ChannelBuilder};
pub use crate::error::{Error, Result};
pub use crate::event::Event;
pub use crate::layer::ChannelLayer;

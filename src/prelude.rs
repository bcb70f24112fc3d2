//! Re-exports the items most programs need to build and install a
//! channel.

pub use crate::filter::{filter_fn, DenyFilter, Filter, FilterResult, PassFilter};
pub use crate::formatter::{BasicFormatter, Formatter, FormatterSource, WrapperFormatter};
pub use crate::transport::{Capture, Discard, Transport, Writer};
pub use crate::{Channel, ChannelLayer, Event};

pub use tracing::Level;
pub use tracing::{debug, error, info, trace, warn};

pub use tracing_subscriber::layer::SubscriberExt;

pub mod filter {
    pub use tracing_subscriber::filter::LevelFilter;
    #[cfg(feature = "env-filter")]
    pub use tracing_subscriber::filter::EnvFilter;
}

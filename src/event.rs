//! The log event that flows through a [`Channel`].
//!
//! A [`Channel`] never looks inside an [`Event`]; only filters and formatters
//! do.
//!
//! [`Channel`]: crate::Channel
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::Serialize;
use std::borrow::Cow;
use tracing::Level;
#[cfg(feature = "uuid")]
use uuid::Uuid;

#[cfg(feature = "smallvec")]
pub(crate) type FieldSet = smallvec::SmallVec<[Field; 3]>;
#[cfg(not(feature = "smallvec"))]
pub(crate) type FieldSet = Vec<Field>;

/// A single log event.
///
/// # Examples
///
/// ```
/// # use log_channel::Event;
/// # use tracing::Level;
/// let event = Event::new(Level::WARN, "disk almost full")
///     .with_target("storage")
///     .with_field("free_mb", 112);
///
/// assert_eq!(event.message(), Some("disk almost full"));
/// assert_eq!(event.fields()[0].value(), "112");
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Event {
    /// The unique ID of the event.
    #[cfg(feature = "uuid")]
    pub(crate) uuid: Uuid,

    /// When the event was created.
    #[cfg(feature = "chrono")]
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::ser::timestamp"))]
    pub(crate) timestamp: DateTime<Utc>,

    /// The level the event occurred at.
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::ser::level"))]
    pub(crate) level: Level,

    /// The part of the system the event came from.
    pub(crate) target: Cow<'static, str>,

    /// The message associated with the event.
    pub(crate) message: Option<String>,

    /// Key-value data.
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::ser::fields"))]
    pub(crate) fields: FieldSet,
}

/// A key-value pair recorded on an [`Event`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    key: &'static str,
    value: String,
}

impl Field {
    pub(crate) fn new(key: &'static str, value: String) -> Self {
        Field { key, value }
    }

    /// Returns the key.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the value, already rendered as a string.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Event {
    /// Creates an event with a message and no fields.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Event::with_parts(level, Cow::Borrowed(""), Some(message.into()), FieldSet::new())
    }

    pub(crate) fn with_parts(
        level: Level,
        target: Cow<'static, str>,
        message: Option<String>,
        fields: FieldSet,
    ) -> Self {
        Event {
            #[cfg(feature = "uuid")]
            uuid: Uuid::new_v4(),
            #[cfg(feature = "chrono")]
            timestamp: Utc::now(),
            level,
            target,
            message,
            fields,
        }
    }

    /// Sets the target.
    pub fn with_target(mut self, target: impl Into<Cow<'static, str>>) -> Self {
        self.target = target.into();
        self
    }

    /// Appends a key-value pair.
    pub fn with_field(mut self, key: &'static str, value: impl ToString) -> Self {
        self.fields.push(Field::new(key, value.to_string()));
        self
    }

    cfg_uuid! {
        /// Returns the event's [`Uuid`].
        pub fn uuid(&self) -> Uuid {
            self.uuid
        }
    }

    cfg_chrono! {
        /// Returns the [`DateTime`] that the event occurred at.
        pub fn timestamp(&self) -> DateTime<Utc> {
            self.timestamp
        }
    }

    /// Returns the event's [`Level`].
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the event's target, which is empty unless one was set.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the event's message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the event's fields as a slice of key-value pairs.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

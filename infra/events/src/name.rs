use crate::error::EventBusError;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Separates the segments of a hierarchical event name (`user.created`).
pub const SEPARATOR: char = '.';
/// Final segment of a wildcard pattern (`user.*`).
pub const WILDCARD: &str = "*";

/// A validated, cheaply clonable event name.
///
/// Names are conventionally dot-segmented; the only rule enforced is that they
/// are not empty.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventName(Arc<str>);

impl EventName {
    /// Validates and wraps a name.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidEventName`] when `name` is empty.
    ///
    /// # Examples
    /// ```rust
    /// use dash_event_bus::EventName;
    ///
    /// let name = EventName::new("user.created").unwrap();
    /// assert_eq!(name.as_str(), "user.created");
    /// assert!(EventName::new("").is_err());
    /// ```
    pub fn new(name: impl AsRef<str>) -> Result<Self, EventBusError> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(EventBusError::InvalidEventName {
                message: "event name cannot be empty".into(),
                context: None,
            });
        }
        Ok(Self(Arc::from(name)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for names that end in a wildcard segment (`user.*`, `*`).
    #[must_use]
    pub fn is_pattern(&self) -> bool {
        self.0.rsplit(SEPARATOR).next() == Some(WILDCARD)
    }

    /// The parent wildcard pattern this name is delivered to, if any.
    #[must_use]
    pub fn wildcard(&self) -> Option<String> {
        wildcard_for(&self.0)
    }
}

/// Derives the one-level parent wildcard for an emitted name.
///
/// Everything after the last separator is replaced by `*`. Names without a
/// separator have no parent pattern. Only the immediate parent is derived:
/// `a.b.c` maps to `a.b.*`, never to `a.*` or `*`.
///
/// # Examples
/// ```rust
/// use dash_event_bus::wildcard_for;
///
/// assert_eq!(wildcard_for("user.created").as_deref(), Some("user.*"));
/// assert_eq!(wildcard_for("a.b.c").as_deref(), Some("a.b.*"));
/// assert_eq!(wildcard_for("refresh"), None);
/// ```
#[must_use]
pub fn wildcard_for(name: &str) -> Option<String> {
    let cut = name.rfind(SEPARATOR)?;
    let mut pattern = String::with_capacity(cut + 1 + WILDCARD.len());
    pattern.push_str(&name[..=cut]);
    pattern.push_str(WILDCARD);
    Some(pattern)
}

impl Borrow<str> for EventName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for EventName {
    type Error = EventBusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for EventName {
    type Error = EventBusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl PartialEq<str> for EventName {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for EventName {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventName({:?})", &*self.0)
    }
}

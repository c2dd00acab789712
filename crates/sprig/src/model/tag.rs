//! Tags attached to features and scenarios.

use std::fmt;

/// A label such as `@slow` or `@issue(42)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
pub struct Tag {
    /// Tag name without the leading `@`.
    pub name: String,
    /// Text between the parentheses, when present.
    pub argument: Option<String>,
}

impl Tag {
    /// Build a tag from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, argument: Option<String>) -> Self {
        Self {
            name: name.into(),
            argument,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.argument {
            Some(arg) => write!(f, "@{}({arg})", self.name),
            None => write!(f, "@{}", self.name),
        }
    }
}

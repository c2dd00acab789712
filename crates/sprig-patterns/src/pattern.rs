//! Step-pattern compilation.
//!
//! A registered pattern is either a regular expression searched anywhere in a
//! step sentence, or a literal that must equal the whole sentence. Both forms
//! compile to a [`Regex`] so the registry can treat them uniformly.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

use crate::errors::PatternError;

/// How registered pattern text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatternMode {
    /// Pattern text is a regular expression searched within the sentence.
    #[default]
    Regex,
    /// Pattern text must equal the sentence byte for byte.
    Literal,
}

impl PatternMode {
    /// Lowercase name used in configuration values.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regex => "regex",
            Self::Literal => "literal",
        }
    }
}

impl fmt::Display for PatternMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a [`PatternMode`] name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pattern mode '{0}', expected 'regex' or 'literal'")]
pub struct PatternModeParseError(pub String);

impl FromStr for PatternMode {
    type Err = PatternModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regex" | "regexp" => Ok(Self::Regex),
            "literal" | "exact" => Ok(Self::Literal),
            _ => Err(PatternModeParseError(s.trim().to_owned())),
        }
    }
}

/// Compile `pattern` into a matcher according to `mode`.
///
/// # Errors
/// Returns [`PatternError::Empty`] for empty text and
/// [`PatternError::Regex`] when the expression does not compile.
///
/// # Examples
/// ```
/// use sprig_patterns::{PatternMode, compile_step_pattern};
///
/// let re = compile_step_pattern(r"I have the number (\d+)", PatternMode::Regex)
///     .expect("valid pattern");
/// assert!(re.is_match("Given I have the number 5"));
///
/// let exact = compile_step_pattern("When I call (some) step", PatternMode::Literal)
///     .expect("valid pattern");
/// assert!(exact.is_match("When I call (some) step"));
/// assert!(!exact.is_match("And When I call (some) step"));
/// ```
pub fn compile_step_pattern(pattern: &str, mode: PatternMode) -> Result<Regex, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }
    let source = match mode {
        PatternMode::Regex => pattern.to_owned(),
        PatternMode::Literal => format!("^{}$", regex::escape(pattern)),
    };
    Regex::new(&source).map_err(|err| PatternError::regex(pattern, err))
}

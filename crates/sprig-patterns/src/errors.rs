//! Error types raised while turning step patterns into matchers.

use thiserror::Error;

/// Errors surfaced while compiling a step pattern.
///
/// # Examples
/// ```
/// use sprig_patterns::{PatternError, PatternMode, compile_step_pattern};
///
/// let err = compile_step_pattern("I have (unclosed", PatternMode::Regex).unwrap_err();
/// assert!(matches!(err, PatternError::Regex { .. }));
/// assert!(err.to_string().contains("I have (unclosed"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatternError {
    /// The pattern text is empty, which would match every sentence.
    #[error("step pattern must not be empty")]
    Empty,
    /// The pattern (or its escaped literal form) failed to compile.
    #[error("cannot compile step pattern '{pattern}': {source}")]
    Regex {
        /// Pattern text as registered.
        pattern: String,
        /// Underlying compilation failure.
        #[source]
        source: regex::Error,
    },
}

impl PatternError {
    pub(crate) fn regex(pattern: &str, source: regex::Error) -> Self {
        Self::Regex {
            pattern: pattern.to_owned(),
            source,
        }
    }
}

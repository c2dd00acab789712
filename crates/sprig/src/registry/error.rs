//! Errors raised while registering or resolving steps.

use camino::Utf8PathBuf;
use sprig_patterns::PatternError;
use thiserror::Error;

/// Errors surfaced by [`StepRegistry`](super::StepRegistry).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The pattern could not be compiled into a matcher.
    #[error("Cannot register step {step}: {source}")]
    BadPattern {
        /// Pattern text as registered.
        pattern: String,
        /// Name of the implementation being registered.
        step: String,
        /// Compilation failure.
        #[source]
        source: PatternError,
    },
    /// The exact pattern text is already registered.
    #[error(
        "Cannot register step {incoming} with regex '{pattern}' because it is already used by step {existing}"
    )]
    DuplicatePattern {
        /// Pattern text in conflict.
        pattern: String,
        /// Name of the implementation already holding the pattern.
        existing: String,
        /// Name of the implementation that was rejected.
        incoming: String,
    },
    /// No registered pattern matches the step sentence.
    #[error("Cannot find step definition for step '{sentence}' in {path}:{line}")]
    StepDefinitionNotFound {
        /// Sentence that failed to match.
        sentence: String,
        /// Feature file containing the step.
        path: Utf8PathBuf,
        /// 1-based line of the step.
        line: usize,
    },
    /// More than one registered pattern matches the step sentence.
    #[error(
        "step '{sentence}' in {path}:{line} matches several step definitions: {}",
        .patterns.join(", ")
    )]
    AmbiguousStep {
        /// Sentence that matched several patterns.
        sentence: String,
        /// Feature file containing the step.
        path: Utf8PathBuf,
        /// 1-based line of the step.
        line: usize,
        /// Every matching pattern, in registration order.
        patterns: Vec<String>,
    },
}

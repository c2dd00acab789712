//! The result of resolving a step against the registry.

use sprig_patterns::Captures;

use super::implementation::{StepArguments, StepFailure, StepImplementation};
use crate::model::Step;
use crate::panic::run_guarded;

/// A step bound to the single implementation whose pattern matched it.
#[derive(Debug)]
pub struct StepMatch<'r> {
    pub(super) pattern: &'r str,
    pub(super) implementation: &'r StepImplementation,
    pub(super) captures: Captures,
}

impl<'r> StepMatch<'r> {
    /// Pattern that matched.
    #[must_use]
    pub fn pattern(&self) -> &'r str {
        self.pattern
    }

    /// Implementation bound to the pattern.
    #[must_use]
    pub fn implementation(&self) -> &'r StepImplementation {
        self.implementation
    }

    /// Values captured from the sentence.
    #[must_use]
    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    /// Execute the implementation for `step`.
    ///
    /// A panic inside the implementation is reported as a failure carrying
    /// the panic message.
    ///
    /// # Errors
    ///
    /// Returns the implementation's failure, or the rendered panic.
    pub fn run(&self, step: &Step) -> Result<(), StepFailure> {
        let args = StepArguments {
            step,
            captures: &self.captures,
        };
        log::trace!(
            "running step '{}' with {}",
            step.sentence,
            self.implementation.name()
        );
        run_guarded(|| self.implementation.call(&args)).unwrap_or_else(|message| {
            Err(format!("step {} panicked: {message}", self.implementation.name()).into())
        })
    }
}

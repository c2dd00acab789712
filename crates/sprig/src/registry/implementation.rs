//! Type-erased step implementations.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use sprig_patterns::Captures;

use crate::model::Step;

/// Failure reported by a step implementation.
pub type StepFailure = Box<dyn std::error::Error + Send + Sync>;

/// Shared callable backing a step.
pub type StepFn = Arc<dyn Fn(&StepArguments<'_>) -> Result<(), StepFailure> + Send + Sync>;

/// Plain function pointer form accepted by [`step!`](crate::step).
pub type StepHandler = for<'a> fn(&StepArguments<'a>) -> Result<(), StepFailure>;

/// Everything an implementation receives when it runs.
#[derive(Debug, Clone, Copy)]
pub struct StepArguments<'a> {
    /// The step being executed.
    pub step: &'a Step,
    /// Values captured from the step sentence by its pattern.
    pub captures: &'a Captures,
}

impl StepArguments<'_> {
    /// Positional capture at `index`, starting from 0.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.captures.positional.get(index).map(String::as_str)
    }

    /// Data table attached to the step.
    #[must_use]
    pub fn table(&self) -> &[Vec<String>] {
        &self.step.table
    }
}

/// Share a closure as a [`StepFn`].
pub(crate) fn erase<F>(run: F) -> StepFn
where
    F: Fn(&StepArguments<'_>) -> Result<(), StepFailure> + Send + Sync + 'static,
{
    Arc::new(run)
}

/// Where an implementation was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
pub struct SourceLocation {
    /// Source file.
    pub file: &'static str,
    /// 1-based line.
    pub line: u32,
}

impl SourceLocation {
    /// Location of the caller of a `#[track_caller]` function.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A named callable bound to one or more step patterns.
#[derive(Clone)]
pub struct StepImplementation {
    name: String,
    location: SourceLocation,
    run: StepFn,
}

impl StepImplementation {
    /// Wrap a closure, recording the caller as its location.
    #[must_use]
    #[track_caller]
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&StepArguments<'_>) -> Result<(), StepFailure> + Send + Sync + 'static,
    {
        Self::with_location(name, SourceLocation::caller(), erase(run))
    }

    /// Wrap an already shared callable with an explicit location.
    #[must_use]
    pub fn with_location(name: impl Into<String>, location: SourceLocation, run: StepFn) -> Self {
        Self {
            name: name.into(),
            location,
            run,
        }
    }

    /// Implementation name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration site.
    #[must_use]
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    /// Invoke the implementation directly.
    ///
    /// # Errors
    ///
    /// Propagates whatever the implementation returns.
    pub fn call(&self, args: &StepArguments<'_>) -> Result<(), StepFailure> {
        (self.run)(args)
    }
}

impl fmt::Debug for StepImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepImplementation")
            .field("name", &self.name)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

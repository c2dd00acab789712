//! Registering every step a type declares in one call.
//!
//! A [`StepBearer`] lists its step methods together with a descriptive
//! string; the first non-blank line of that string becomes the pattern.

use std::sync::Arc;

use super::implementation::{
    SourceLocation, StepArguments, StepFailure, StepImplementation, erase,
};

/// Method signature a bearer exposes for each step.
pub type BearerFn<B> = fn(&B, &StepArguments<'_>) -> Result<(), StepFailure>;

/// One step method of a [`StepBearer`].
pub struct StepMethod<B> {
    name: &'static str,
    doc: &'static str,
    location: SourceLocation,
    call: BearerFn<B>,
}

impl<B> StepMethod<B> {
    /// Describe a method; the caller location is recorded for diagnostics.
    #[must_use]
    #[track_caller]
    pub fn new(name: &'static str, doc: &'static str, call: BearerFn<B>) -> Self {
        Self {
            name,
            doc,
            location: SourceLocation::caller(),
            call,
        }
    }

    /// Method name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Descriptive text as declared.
    #[must_use]
    pub fn doc(&self) -> &'static str {
        self.doc
    }

    /// Pattern derived from the descriptive text, if it has any content.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::{StepArguments, StepFailure, StepMethod};
    ///
    /// fn noop(_: &(), _: &StepArguments<'_>) -> Result<(), StepFailure> {
    ///     Ok(())
    /// }
    ///
    /// let method = StepMethod::new("noop", "\n    Then I expect some behaviour\n    more\n", noop);
    /// assert_eq!(method.pattern(), Some("Then I expect some behaviour"));
    /// assert_eq!(StepMethod::new("bare", "  \n", noop).pattern(), None);
    /// ```
    #[must_use]
    pub fn pattern(&self) -> Option<&'static str> {
        self.doc.lines().map(str::trim).find(|line| !line.is_empty())
    }
}

impl<B: Send + Sync + 'static> StepMethod<B> {
    /// Bind the method to a shared receiver.
    pub(crate) fn bind(&self, receiver: &Arc<B>) -> StepImplementation {
        let receiver = Arc::clone(receiver);
        let call = self.call;
        let run = erase(move |args| call(&*receiver, args));
        StepImplementation::with_location(self.name, self.location, run)
    }
}

/// A type whose methods implement steps.
pub trait StepBearer: Send + Sync + Sized + 'static {
    /// Every candidate step method; methods without descriptive text are
    /// skipped at registration.
    fn step_methods() -> Vec<StepMethod<Self>>;
}

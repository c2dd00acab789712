//! Scoped lifecycle callbacks.
//!
//! Hooks run before or after one of four fixed scopes. Each (timing, scope)
//! pair owns an ordered list; [`HookRegistry::call`] runs that list in
//! registration order and stops at the first failure.

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::model::{Feature, Scenario, Step};
use crate::registry::SourceLocation;

mod registrar;
mod registry;

pub use registrar::HookRegistrar;
pub use registry::HookRegistry;

/// Failure reported by a hook callback.
pub type HookFailure = Box<dyn std::error::Error + Send + Sync>;

/// Shared callable backing a hook.
pub type HookFn = Arc<dyn for<'a> Fn(&HookArgs<'a>) -> Result<(), HookFailure> + Send + Sync>;

/// Whether a hook runs before or after its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookTiming {
    /// Runs when the scope is entered.
    Before,
    /// Runs when the scope is left.
    After,
}

/// The boundary a hook brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookScope {
    /// The whole run.
    All,
    /// Each feature file.
    EachFeature,
    /// Each scenario, generated ones included.
    EachScenario,
    /// Each step.
    EachStep,
}

/// Error returned when a timing or scope name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hook {kind} '{value}'")]
pub struct HookNameError {
    kind: &'static str,
    value: String,
}

impl HookTiming {
    /// Both timings.
    pub const ALL: [Self; 2] = [Self::Before, Self::After];

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl HookScope {
    /// Every scope.
    pub const ALL: [Self; 4] = [
        Self::All,
        Self::EachFeature,
        Self::EachScenario,
        Self::EachStep,
    ];

    /// Snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::EachFeature => "each_feature",
            Self::EachScenario => "each_scenario",
            Self::EachStep => "each_step",
        }
    }
}

impl fmt::Display for HookTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for HookScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookTiming {
    type Err = HookNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|timing| timing.as_str() == s)
            .ok_or_else(|| HookNameError {
                kind: "timing",
                value: s.to_owned(),
            })
    }
}

impl FromStr for HookScope {
    type Err = HookNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| HookNameError {
                kind: "scope",
                value: s.to_owned(),
            })
    }
}

/// Arguments forwarded to every hook of one [`HookRegistry::call`].
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum HookArgs<'a> {
    /// Nothing is forwarded, as for the `all` scope.
    None,
    /// The feature being entered or left.
    Feature(&'a Feature),
    /// The scenario being entered or left.
    Scenario(&'a Scenario),
    /// The step being entered or left.
    Step(&'a Step),
    /// Runner-defined data.
    Payload(&'a dyn Any),
}

impl<'a> HookArgs<'a> {
    /// The forwarded feature, if any.
    #[must_use]
    pub fn feature(&self) -> Option<&'a Feature> {
        match *self {
            Self::Feature(feature) => Some(feature),
            _ => None,
        }
    }

    /// The forwarded scenario, if any.
    #[must_use]
    pub fn scenario(&self) -> Option<&'a Scenario> {
        match *self {
            Self::Scenario(scenario) => Some(scenario),
            _ => None,
        }
    }

    /// The forwarded step, if any.
    #[must_use]
    pub fn step(&self) -> Option<&'a Step> {
        match *self {
            Self::Step(step) => Some(step),
            _ => None,
        }
    }

    /// The forwarded payload downcast to `T`.
    #[must_use]
    pub fn payload<T: Any>(&self) -> Option<&'a T> {
        match *self {
            Self::Payload(payload) => payload.downcast_ref(),
            _ => None,
        }
    }
}

/// A named callback with the location it was declared at.
#[derive(Clone)]
pub struct Hook {
    name: String,
    location: SourceLocation,
    run: HookFn,
}

impl Hook {
    /// Wrap a closure, recording the caller as its location.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::{Hook, HookArgs};
    ///
    /// let hook = Hook::new("needs_feature", |args: &HookArgs<'_>| {
    ///     args.feature().map(|_| ()).ok_or_else(|| "no feature forwarded".into())
    /// });
    /// assert_eq!(hook.name(), "needs_feature");
    /// ```
    #[must_use]
    #[track_caller]
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: for<'a> Fn(&HookArgs<'a>) -> Result<(), HookFailure> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            location: SourceLocation::caller(),
            run: Arc::new(run),
        }
    }

    /// Hook name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration site.
    #[must_use]
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    fn invoke(&self, args: &HookArgs<'_>) -> Result<(), HookFailure> {
        (self.run)(args)
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("name", &self.name)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// Errors raised while running hooks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HookError {
    /// A hook returned an error or panicked; later hooks were skipped.
    #[error("Hook '{hook}' from {location} raised: {cause}")]
    Failed {
        /// Name of the failing hook.
        hook: String,
        /// Where the failing hook was declared.
        location: SourceLocation,
        /// Timing of the interrupted call.
        timing: HookTiming,
        /// Scope of the interrupted call.
        scope: HookScope,
        /// What the hook reported.
        #[source]
        cause: HookFailure,
    },
}

//! Registration and execution phases for the step and hook registries.
//!
//! [`Registries`] is mutable while steps and hooks are being declared.
//! [`Registries::freeze`] ends that phase: the returned
//! [`FrozenRegistries`] is a cheap, shareable, read-only handle that
//! concurrent runners can use without locking.

use std::sync::Arc;

use crate::hooks::{HookArgs, HookError, HookRegistry, HookScope, HookTiming};
use crate::model::Step;
use crate::registry::{RegistryError, StepMatch, StepRegistry};

/// Step and hook registries in their registration phase.
#[derive(Debug, Default)]
pub struct Registries {
    /// Step patterns and their implementations.
    pub steps: StepRegistry,
    /// Lifecycle hooks.
    pub hooks: HookRegistry,
}

impl Registries {
    /// Create empty registries using the configured pattern mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// End the registration phase.
    #[must_use]
    pub fn freeze(self) -> FrozenRegistries {
        log::debug!(
            "freezing {} step(s) and {} hook(s)",
            self.steps.len(),
            self.hooks.len()
        );
        FrozenRegistries {
            inner: Arc::new(self),
        }
    }
}

/// Read-only registries shared across threads during execution.
///
/// ```
/// use sprig::{FrozenRegistries, Registries, StepImplementation};
///
/// let mut registries = Registries::new();
/// registries
///     .steps
///     .register("ready", StepImplementation::new("ready", |_| Ok(())))
///     .expect("pattern registers");
/// let frozen: FrozenRegistries = registries.freeze();
/// let worker = frozen.clone();
/// std::thread::spawn(move || assert_eq!(worker.steps().len(), 1))
///     .join()
///     .expect("worker finishes");
/// ```
#[derive(Debug, Clone)]
pub struct FrozenRegistries {
    inner: Arc<Registries>,
}

impl FrozenRegistries {
    /// The step registry.
    #[must_use]
    pub fn steps(&self) -> &StepRegistry {
        &self.inner.steps
    }

    /// The hook registry.
    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.inner.hooks
    }

    /// Resolve `step` against the step registry.
    ///
    /// # Errors
    ///
    /// See [`StepRegistry::find`].
    pub fn find(&self, step: &Step) -> Result<StepMatch<'_>, RegistryError> {
        self.inner.steps.find(step)
    }

    /// Run the hooks for `timing` and `scope`.
    ///
    /// # Errors
    ///
    /// See [`HookRegistry::call`].
    pub fn call_hooks(
        &self,
        timing: HookTiming,
        scope: HookScope,
        args: &HookArgs<'_>,
    ) -> Result<(), HookError> {
        self.inner.hooks.call(timing, scope, args)
    }
}

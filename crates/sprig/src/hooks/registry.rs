//! Storage and invocation of hooks.

use hashbrown::HashMap;

use super::{Hook, HookArgs, HookError, HookFailure, HookRegistrar, HookScope, HookTiming};
use crate::panic::run_guarded;

/// Ordered hook lists keyed by timing and scope.
#[derive(Debug, Default, Clone)]
pub struct HookRegistry {
    hooks: HashMap<(HookTiming, HookScope), Vec<Hook>>,
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `hook` to the list for `timing` and `scope`.
    ///
    /// Duplicates are kept; a hook registered twice runs twice.
    pub fn register(&mut self, timing: HookTiming, scope: HookScope, hook: Hook) {
        log::debug!(
            "registered {timing} {scope} hook '{}' from {}",
            hook.name(),
            hook.location()
        );
        self.hooks.entry((timing, scope)).or_default().push(hook);
    }

    /// Registrar for `before` hooks.
    pub fn before(&mut self) -> HookRegistrar<'_> {
        HookRegistrar::new(self, HookTiming::Before)
    }

    /// Registrar for `after` hooks.
    pub fn after(&mut self) -> HookRegistrar<'_> {
        HookRegistrar::new(self, HookTiming::After)
    }

    /// Hooks registered for `timing` and `scope`, in registration order.
    #[must_use]
    pub fn hooks(&self, timing: HookTiming, scope: HookScope) -> &[Hook] {
        self.hooks.get(&(timing, scope)).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.values().map(Vec::len).sum()
    }

    /// Whether no hook is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run every hook for `timing` and `scope` in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Failed`] for the first hook that fails or
    /// panics. Hooks after it are not run.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::{Hook, HookArgs, HookError, HookRegistry, HookScope, HookTiming};
    ///
    /// let mut hooks = HookRegistry::new();
    /// hooks.before().each_step(Hook::new("fails", |_: &HookArgs<'_>| Err("nope".into())));
    /// let err = hooks
    ///     .call(HookTiming::Before, HookScope::EachStep, &HookArgs::None)
    ///     .expect_err("hook fails");
    /// assert!(matches!(err, HookError::Failed { ref hook, .. } if hook == "fails"));
    /// ```
    pub fn call(
        &self,
        timing: HookTiming,
        scope: HookScope,
        args: &HookArgs<'_>,
    ) -> Result<(), HookError> {
        for hook in self.hooks(timing, scope) {
            log::trace!("running {timing} {scope} hook '{}'", hook.name());
            let outcome: Result<(), HookFailure> =
                run_guarded(|| hook.invoke(args)).unwrap_or_else(|message| Err(message.into()));
            outcome.map_err(|cause| HookError::Failed {
                hook: hook.name().to_owned(),
                location: hook.location(),
                timing,
                scope,
                cause,
            })?;
        }
        Ok(())
    }
}

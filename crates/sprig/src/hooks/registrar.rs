//! `before`/`after` registration sugar.

use super::{Hook, HookRegistry, HookScope, HookTiming};

/// Registers hooks for one timing; each method names a scope.
///
/// ```
/// use sprig::{Hook, HookArgs, HookRegistry, HookScope, HookTiming};
///
/// let mut hooks = HookRegistry::new();
/// hooks
///     .after()
///     .each_scenario(Hook::new("cleanup", |_: &HookArgs<'_>| Ok(())))
///     .all(Hook::new("report", |_: &HookArgs<'_>| Ok(())));
/// assert_eq!(hooks.hooks(HookTiming::After, HookScope::EachScenario).len(), 1);
/// assert_eq!(hooks.hooks(HookTiming::After, HookScope::All).len(), 1);
/// ```
#[derive(Debug)]
pub struct HookRegistrar<'r> {
    registry: &'r mut HookRegistry,
    timing: HookTiming,
}

impl<'r> HookRegistrar<'r> {
    pub(super) fn new(registry: &'r mut HookRegistry, timing: HookTiming) -> Self {
        Self { registry, timing }
    }

    /// Timing every hook is registered under.
    #[must_use]
    pub fn timing(&self) -> HookTiming {
        self.timing
    }

    fn scoped(&mut self, scope: HookScope, hook: Hook) -> &mut Self {
        self.registry.register(self.timing, scope, hook);
        self
    }

    /// Register for the whole run.
    pub fn all(&mut self, hook: Hook) -> &mut Self {
        self.scoped(HookScope::All, hook)
    }

    /// Register around each feature.
    pub fn each_feature(&mut self, hook: Hook) -> &mut Self {
        self.scoped(HookScope::EachFeature, hook)
    }

    /// Register around each scenario.
    pub fn each_scenario(&mut self, hook: Hook) -> &mut Self {
        self.scoped(HookScope::EachScenario, hook)
    }

    /// Register around each step.
    pub fn each_step(&mut self, hook: Hook) -> &mut Self {
        self.scoped(HookScope::EachStep, hook)
    }
}

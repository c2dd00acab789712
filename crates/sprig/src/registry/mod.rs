//! Step registration and lookup.
//!
//! A [`StepRegistry`] maps pattern text to a [`StepImplementation`]. Patterns
//! are keyed by their exact text: two overlapping expressions may coexist,
//! but registering the same text twice is rejected. Lookups compile nothing;
//! every pattern is compiled once when it is registered.

use hashbrown::HashMap;
use regex::Regex;
use sprig_patterns::{PatternMode, compile_step_pattern, extract_captures};

mod bearer;
mod collect;
#[cfg(feature = "diagnostics")]
mod diagnostics;
mod error;
mod implementation;
mod matching;

pub use bearer::{BearerFn, StepBearer, StepMethod};
pub use collect::StepDefinition;
#[cfg(feature = "diagnostics")]
pub use diagnostics::dump_registry;
pub use error::RegistryError;
pub use implementation::{
    SourceLocation, StepArguments, StepFailure, StepFn, StepHandler, StepImplementation,
};
pub use matching::StepMatch;

use crate::config;
use crate::model::Step;

#[derive(Debug)]
struct RegisteredStep {
    pattern: String,
    regex: Regex,
    implementation: StepImplementation,
}

/// Pattern to implementation table used to bind parsed steps.
#[derive(Debug)]
pub struct StepRegistry {
    mode: PatternMode,
    steps: Vec<RegisteredStep>,
    index: HashMap<String, usize>,
}

impl Default for StepRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StepRegistry {
    /// Create an empty registry using the configured pattern mode.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mode(config::pattern_mode())
    }

    /// Create an empty registry with an explicit pattern mode.
    #[must_use]
    pub fn with_mode(mode: PatternMode) -> Self {
        Self {
            mode,
            steps: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// How pattern text is interpreted.
    #[must_use]
    pub fn mode(&self) -> PatternMode {
        self.mode
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Implementation registered under the exact `pattern` text.
    #[must_use]
    pub fn get(&self, pattern: &str) -> Option<&StepImplementation> {
        let idx = *self.index.get(pattern)?;
        self.steps.get(idx).map(|entry| &entry.implementation)
    }

    /// Registered patterns with their implementations, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StepImplementation)> {
        self.steps
            .iter()
            .map(|entry| (entry.pattern.as_str(), &entry.implementation))
    }

    /// Register `implementation` under `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicatePattern`] when the exact text is
    /// already registered and [`RegistryError::BadPattern`] when it does not
    /// compile. The registry is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig::{RegistryError, StepImplementation, StepRegistry};
    ///
    /// let mut registry = StepRegistry::new();
    /// registry
    ///     .register("abc", StepImplementation::new("step_a", |_| Ok(())))
    ///     .expect("first registration succeeds");
    /// let err = registry
    ///     .register("abc", StepImplementation::new("step_b", |_| Ok(())))
    ///     .expect_err("duplicate text is rejected");
    /// assert!(matches!(err, RegistryError::DuplicatePattern { .. }));
    /// assert_eq!(registry.get("abc").map(|i| i.name()), Some("step_a"));
    /// ```
    pub fn register(
        &mut self,
        pattern: &str,
        implementation: StepImplementation,
    ) -> Result<(), RegistryError> {
        let staged = self.stage(vec![(pattern.to_owned(), implementation)])?;
        self.commit(staged);
        Ok(())
    }

    /// Register every described step method of `bearer`.
    ///
    /// Methods named in `ignore` and methods without descriptive text are
    /// skipped. Either every remaining method is registered or none is.
    /// Returns the number of methods registered.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate or bad pattern among the methods.
    pub fn register_object<B: StepBearer>(
        &mut self,
        bearer: &std::sync::Arc<B>,
        ignore: &[&str],
    ) -> Result<usize, RegistryError> {
        let entries = B::step_methods()
            .iter()
            .filter(|method| !ignore.contains(&method.name()))
            .filter_map(|method| {
                let Some(pattern) = method.pattern() else {
                    log::debug!("skipping step method {} without description", method.name());
                    return None;
                };
                Some((pattern.to_owned(), method.bind(bearer)))
            })
            .collect();
        let staged = self.stage(entries)?;
        let count = staged.len();
        self.commit(staged);
        Ok(count)
    }

    /// Register every step declared with [`step!`](crate::step) in this
    /// binary, all or nothing. Returns the number registered.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate or bad pattern among the declarations.
    pub fn register_collected(&mut self) -> Result<usize, RegistryError> {
        let entries = collect::collected()
            .into_iter()
            .map(|def| (def.pattern.to_owned(), def.implementation()))
            .collect();
        let staged = self.stage(entries)?;
        let count = staged.len();
        self.commit(staged);
        Ok(count)
    }

    /// Validate and compile entries without touching the registry.
    fn stage(
        &self,
        entries: Vec<(String, StepImplementation)>,
    ) -> Result<Vec<RegisteredStep>, RegistryError> {
        let mut staged: Vec<RegisteredStep> = Vec::with_capacity(entries.len());
        for (pattern, implementation) in entries {
            let existing = self.get(&pattern).or_else(|| {
                staged
                    .iter()
                    .find(|entry| entry.pattern == pattern)
                    .map(|entry| &entry.implementation)
            });
            if let Some(existing) = existing {
                return Err(RegistryError::DuplicatePattern {
                    existing: existing.name().to_owned(),
                    incoming: implementation.name().to_owned(),
                    pattern,
                });
            }
            let regex = compile_step_pattern(&pattern, self.mode).map_err(|source| {
                RegistryError::BadPattern {
                    pattern: pattern.clone(),
                    step: implementation.name().to_owned(),
                    source,
                }
            })?;
            staged.push(RegisteredStep {
                pattern,
                regex,
                implementation,
            });
        }
        Ok(staged)
    }

    fn commit(&mut self, staged: Vec<RegisteredStep>) {
        for entry in staged {
            log::debug!(
                "registered step {} for pattern '{}' ({})",
                entry.implementation.name(),
                entry.pattern,
                entry.implementation.location()
            );
            self.index.insert(entry.pattern.clone(), self.steps.len());
            self.steps.push(entry);
        }
    }

    /// Resolve `step` to the unique implementation whose pattern matches its
    /// sentence.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StepDefinitionNotFound`] when nothing matches
    /// and [`RegistryError::AmbiguousStep`] when several patterns do.
    pub fn find(&self, step: &Step) -> Result<StepMatch<'_>, RegistryError> {
        let mut hits = self.steps.iter().filter_map(|entry| {
            extract_captures(&entry.regex, &step.sentence).map(|captures| (entry, captures))
        });
        let Some((entry, captures)) = hits.next() else {
            return Err(RegistryError::StepDefinitionNotFound {
                sentence: step.sentence.clone(),
                path: step.path.clone(),
                line: step.line,
            });
        };
        let others: Vec<String> = hits.map(|(other, _)| other.pattern.clone()).collect();
        if !others.is_empty() {
            let patterns = std::iter::once(entry.pattern.clone()).chain(others).collect();
            return Err(RegistryError::AmbiguousStep {
                sentence: step.sentence.clone(),
                path: step.path.clone(),
                line: step.line,
                patterns,
            });
        }
        Ok(StepMatch {
            pattern: &entry.pattern,
            implementation: &entry.implementation,
            captures,
        })
    }
}

//! Core library for `sprig`.
//!
//! Sprig turns Gherkin-style feature files into a tree of features,
//! scenarios and steps, binds each step sentence to an implementation
//! through a [`StepRegistry`], and keeps ordered lifecycle callbacks in a
//! [`HookRegistry`]. Executing the resulting plan is left to the runner.
//!
//! ```
//! use sprig::{FeatureParser, StepImplementation, StepRegistry};
//!
//! let parser = FeatureParser::new((), "calc.feature", 1, "en").expect("english");
//! let feature = parser
//!     .parse_str("Feature: calc\n  Scenario: add\n    Given I have 2 apples\n")
//!     .expect("valid feature");
//!
//! let mut registry = StepRegistry::new();
//! registry
//!     .register(r"I have (\d+) apples", StepImplementation::new("apples", |_| Ok(())))
//!     .expect("pattern registers");
//!
//! for scenario in feature.runnable_scenarios() {
//!     for step in &scenario.steps {
//!         let found = registry.find(step).expect("every step is implemented");
//!         assert_eq!(found.captures().positional, ["2"]);
//!         found.run(step).expect("step passes");
//!     }
//! }
//! ```

pub use inventory::{iter, submit};

pub mod config;
mod error;
pub mod hooks;
mod loader;
pub mod model;
mod panic;
pub mod parser;
mod registries;
pub mod registry;
mod selection;

pub use error::{Error, ParseError, SelectionError, StructureError};
pub use hooks::{
    Hook, HookArgs, HookError, HookFailure, HookNameError, HookRegistrar, HookRegistry,
    HookScope, HookTiming,
};
pub use loader::load_features;
pub use model::{
    Example, Feature, Scenario, ScenarioBlock, ScenarioLoop, ScenarioOutline, Step, Tag,
};
pub use panic::panic_message;
pub use parser::FeatureParser;
pub use registries::{FrozenRegistries, Registries};
#[cfg(feature = "diagnostics")]
pub use registry::dump_registry;
pub use registry::{
    RegistryError, SourceLocation, StepArguments, StepBearer, StepDefinition, StepFailure,
    StepImplementation, StepMatch, StepMethod, StepRegistry,
};
pub use selection::select_scenarios;
pub use sprig_patterns::{KeywordLookup, KeywordSet, PatternMode, StepKeyword};

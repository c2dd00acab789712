//! Plain data types for a parsed feature file.
//!
//! The tree is built once by [`FeatureParser::parse`](crate::FeatureParser::parse)
//! and never mutated afterwards. Every node owns its children outright.

mod feature;
mod scenario;
mod step;
mod tag;

pub use feature::Feature;
pub use scenario::{Example, Scenario, ScenarioBlock, ScenarioLoop, ScenarioOutline};
pub use step::Step;
pub use tag::Tag;

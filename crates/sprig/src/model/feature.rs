//! The feature root node.

use camino::Utf8PathBuf;

use super::{Scenario, ScenarioBlock, Tag};

/// Root of the plan built from one feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
pub struct Feature {
    /// Caller-supplied identifier, unique across a run.
    pub id: usize,
    /// Header text after the keyword and colon.
    pub sentence: String,
    /// Free-text lines between the header and the first tag or scenario.
    pub description: Vec<String>,
    /// Path the feature was read from.
    pub path: Utf8PathBuf,
    /// 1-based source line of the header.
    pub line: usize,
    /// Tags declared above the header.
    pub tags: Vec<Tag>,
    /// Scenario blocks in source order.
    pub scenarios: Vec<ScenarioBlock>,
}

impl Feature {
    /// Total number of scenario identifiers issued for this feature,
    /// counting template headers and generated scenarios.
    #[must_use]
    pub fn total_scenarios(&self) -> usize {
        self.scenarios.iter().map(ScenarioBlock::id_span).sum()
    }

    /// Look up a scenario by its feature-global identifier.
    ///
    /// Identifiers of outline and loop headers resolve to the template;
    /// generated identifiers resolve to the concrete scenario.
    #[must_use]
    pub fn scenario_by_id(&self, id: usize) -> Option<&Scenario> {
        self.scenarios.iter().find_map(|block| block.find(id))
    }

    /// Every scenario a runner would execute, in document order.
    pub fn runnable_scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().flat_map(ScenarioBlock::runnable)
    }

    /// Whether a tag with `name` is attached to the feature.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }

    /// Render the feature as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[cfg(feature = "diagnostics")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

//! Scenario nodes and the templates that expand into them.

use camino::Utf8PathBuf;

use super::{Step, Tag};

/// One concrete, runnable sequence of steps.
///
/// The same type doubles as the header of an outline or loop; in that role
/// its steps are the unexpanded template.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
pub struct Scenario {
    /// Feature-global identifier, starting at 1.
    pub id: usize,
    /// Header text after the keyword and colon.
    pub sentence: String,
    /// Feature file the scenario was read from.
    pub path: Utf8PathBuf,
    /// 1-based source line.
    pub line: usize,
    /// Tags declared directly above the header.
    pub tags: Vec<Tag>,
    /// Steps in source order.
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Whether a tag with `name` is attached.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }
}

/// One data row of an outline's Examples table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
pub struct Example {
    /// Raw cell values aligned with the examples header.
    pub data: Vec<String>,
    /// 1-based source line of the row.
    pub line: usize,
}

/// Scenario template parameterised by `<column>` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
pub struct ScenarioOutline {
    /// Header and template steps.
    pub template: Scenario,
    /// Column names from the first Examples row.
    pub examples_header: Vec<String>,
    /// Remaining Examples rows in source order.
    pub examples: Vec<Example>,
    /// One generated scenario per example, in row order.
    pub scenarios: Vec<Scenario>,
}

/// Scenario template repeated a fixed number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
pub struct ScenarioLoop {
    /// Header and template steps.
    pub template: Scenario,
    /// Declared iteration count.
    pub iterations: usize,
    /// One generated scenario per iteration.
    pub scenarios: Vec<Scenario>,
}

/// A top-level block inside a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "diagnostics",
    derive(serde::Serialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum ScenarioBlock {
    /// A plain scenario.
    Scenario(Scenario),
    /// A scenario outline with its Examples and expansion.
    Outline(ScenarioOutline),
    /// A scenario loop with its expansion.
    Loop(ScenarioLoop),
}

impl ScenarioBlock {
    /// The header node: the scenario itself or the template of an outline
    /// or loop.
    #[must_use]
    pub fn header(&self) -> &Scenario {
        match self {
            Self::Scenario(scenario) => scenario,
            Self::Outline(outline) => &outline.template,
            Self::Loop(repeat) => &repeat.template,
        }
    }

    /// Identifier of the header.
    #[must_use]
    pub fn id(&self) -> usize {
        self.header().id
    }

    /// Header sentence.
    #[must_use]
    pub fn sentence(&self) -> &str {
        &self.header().sentence
    }

    /// Header line.
    #[must_use]
    pub fn line(&self) -> usize {
        self.header().line
    }

    /// Header tags.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.header().tags
    }

    /// Header steps; template steps for outlines and loops.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.header().steps
    }

    /// Scenarios generated by expansion; empty for a plain scenario.
    #[must_use]
    pub fn generated(&self) -> &[Scenario] {
        match self {
            Self::Scenario(_) => &[],
            Self::Outline(outline) => &outline.scenarios,
            Self::Loop(repeat) => &repeat.scenarios,
        }
    }

    /// Scenarios a runner executes for this block.
    ///
    /// A plain scenario runs itself; templates run their expansion only.
    pub fn runnable(&self) -> impl Iterator<Item = &Scenario> {
        let own = matches!(self, Self::Scenario(_)).then(|| self.header());
        own.into_iter().chain(self.generated())
    }

    /// Number of identifiers the block consumed: its own plus one per
    /// generated scenario.
    #[must_use]
    pub fn id_span(&self) -> usize {
        1 + self.generated().len()
    }

    /// Find the header or a generated scenario by identifier.
    #[must_use]
    pub fn find(&self, id: usize) -> Option<&Scenario> {
        if self.id() == id {
            return Some(self.header());
        }
        self.generated().iter().find(|scenario| scenario.id == id)
    }

    /// Return the outline when this block is one.
    #[must_use]
    pub fn as_outline(&self) -> Option<&ScenarioOutline> {
        match self {
            Self::Outline(outline) => Some(outline),
            _ => None,
        }
    }

    /// Return the loop when this block is one.
    #[must_use]
    pub fn as_loop(&self) -> Option<&ScenarioLoop> {
        match self {
            Self::Loop(repeat) => Some(repeat),
            _ => None,
        }
    }
}

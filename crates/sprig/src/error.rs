//! Error types for parsing, selection, and the crate-wide umbrella.
//!
//! Each concern has its own enum so callers can branch on the kind of
//! failure; [`Error`] collects them for code that only wants `?`.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::hooks::HookError;
use crate::registry::RegistryError;

/// Shape violations detected while reading a feature file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StructureError {
    /// The file contained no Feature header.
    #[error("no Feature found")]
    NoFeature,
    /// A second Feature header was found.
    #[error("only one Feature per feature file is supported")]
    MultipleFeatures,
    /// Content appeared before the Feature header.
    #[error("expected a Feature header")]
    ExpectedFeature,
    /// An Examples block followed something other than a Scenario Outline.
    #[error("Scenario does not support Examples. Use 'Scenario Outline'")]
    ExamplesWithoutOutline,
    /// A Scenario Outline ended without an Examples table.
    #[error("Scenario Outline has no Examples table")]
    MissingExamples,
    /// An Examples row has a different number of cells than the header.
    #[error("Examples row has {found} cells but the header has {expected}")]
    ExampleRowWidth {
        /// Header width.
        expected: usize,
        /// Cells found in the row.
        found: usize,
    },
    /// A table row did not follow a step or an Examples marker.
    #[error("table row does not belong to a step")]
    TableWithoutStep,
    /// A step appeared outside any scenario.
    #[error("step found outside of a scenario")]
    StepOutsideScenario,
    /// A step followed the Examples table of an outline.
    #[error("step found after the Examples table")]
    StepAfterExamples,
    /// A line named a scenario keyword but was not a valid header.
    #[error("invalid scenario header")]
    InvalidScenarioHeader,
    /// A line could not be interpreted in its position.
    #[error("unexpected line '{text}'")]
    UnexpectedLine {
        /// The offending line, trimmed.
        text: String,
    },
    /// Tags were not followed by a Feature or Scenario header.
    #[error("tags must precede a Feature or Scenario header")]
    DanglingTags,
}

/// Errors raised while constructing a parser or parsing a file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// No keyword table is registered for the requested language.
    #[error("Language {language} could not be found")]
    LanguageNotSupported {
        /// The requested language code.
        language: String,
    },
    /// The feature file does not exist.
    #[error("Feature file '{path}': No such file")]
    FeatureFileNotFound {
        /// Path that was requested.
        path: Utf8PathBuf,
    },
    /// Reading the feature file failed for another reason.
    #[error("cannot read feature file '{path}': {source}")]
    Io {
        /// Path that was requested.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// Consecutive feature identifiers ran past `usize::MAX`.
    #[error("no feature id left for '{path}' after {first_id} + {offset}")]
    FeatureIdOverflow {
        /// File that could not be numbered.
        path: Utf8PathBuf,
        /// Identifier of the first file in the batch.
        first_id: usize,
        /// Position of the file within the batch.
        offset: usize,
    },
    /// The file was read but its structure is invalid.
    #[error("{path}:{line}: {kind}")]
    Structure {
        /// Feature file path.
        path: Utf8PathBuf,
        /// 1-based line where the problem was detected.
        line: usize,
        /// What went wrong.
        kind: StructureError,
    },
}

impl ParseError {
    /// Return the structure violation when this is one.
    #[must_use]
    pub fn structure(&self) -> Option<&StructureError> {
        match self {
            Self::Structure { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// Errors raised when resolving scenarios by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SelectionError {
    /// The identifier lies outside `[1, total]`.
    #[error("No scenario with id {scenario_id} found. Specify a scenario id between 1 and {total}")]
    ScenarioNotFound {
        /// Requested identifier.
        scenario_id: usize,
        /// Number of identifiers the feature issued.
        total: usize,
    },
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Step registration or lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A hook failed.
    #[error(transparent)]
    Hook(#[from] HookError),
    /// Scenario selection failed.
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

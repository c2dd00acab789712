//! Step nodes.

use camino::Utf8PathBuf;
use sprig_patterns::StepKeyword;

/// One action or assertion line inside a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
pub struct Step {
    /// Position within the owning scenario, starting at 1.
    pub id: usize,
    /// Keyword the line starts with, as written.
    pub keyword: StepKeyword,
    /// Full text of the line including its keyword.
    pub sentence: String,
    /// Feature file the step was read from.
    pub path: Utf8PathBuf,
    /// 1-based source line.
    pub line: usize,
    /// Data table rows following the step; empty when none were given.
    pub table: Vec<Vec<String>>,
}


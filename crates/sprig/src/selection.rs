//! Picking scenarios out of a parsed feature by identifier.

use crate::error::SelectionError;
use crate::model::{Feature, Scenario};

/// Resolve `ids` to scenarios of `feature`, in the order requested.
///
/// Identifiers are the feature-wide ones the parser issued, so the id of an
/// outline or loop header selects its template and the ids after it select
/// the scenarios generated from it.
///
/// # Errors
///
/// Returns [`SelectionError::ScenarioNotFound`] for the first id outside
/// `1..=feature.total_scenarios()`.
///
/// # Examples
///
/// ```
/// use sprig::{FeatureParser, SelectionError, select_scenarios};
///
/// let parser = FeatureParser::new((), "demo.feature", 1, "en").expect("english exists");
/// let feature = parser
///     .parse_str("Feature: demo\n  Scenario: one\n  Scenario: two\n")
///     .expect("valid feature");
/// let picked = select_scenarios(&feature, &[2]).expect("id 2 exists");
/// assert_eq!(picked[0].sentence, "two");
/// assert_eq!(
///     select_scenarios(&feature, &[3]).unwrap_err(),
///     SelectionError::ScenarioNotFound { scenario_id: 3, total: 2 }
/// );
/// ```
pub fn select_scenarios<'f>(
    feature: &'f Feature,
    ids: &[usize],
) -> Result<Vec<&'f Scenario>, SelectionError> {
    ids.iter()
        .map(|&id| {
            feature
                .scenario_by_id(id)
                .ok_or_else(|| SelectionError::ScenarioNotFound {
                    scenario_id: id,
                    total: feature.total_scenarios(),
                })
        })
        .collect()
}

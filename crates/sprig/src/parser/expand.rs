//! Expansion of outlines and loops into concrete scenarios.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::{Example, Scenario, ScenarioLoop, ScenarioOutline, Step};

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^>\s][^>]*)>").unwrap_or_else(|_| unreachable!("placeholder regex is valid"))
});

/// Replace every `<column>` token in `text` with the value for that column.
///
/// Tokens naming no column are left verbatim. Substituted values are not
/// scanned again.
///
/// # Examples
///
/// ```
/// use sprig::parser::substitute_placeholders;
///
/// let header = ["count".to_string(), "item".to_string()];
/// let row = ["5".to_string(), "apples".to_string()];
/// assert_eq!(
///     substitute_placeholders("I have <count> <item> and <other>", &header, &row),
///     "I have 5 apples and <other>"
/// );
/// ```
#[must_use]
pub fn substitute_placeholders(text: &str, header: &[String], row: &[String]) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let token = caps.get(0).map_or("", |m| m.as_str());
            let name = caps.get(1).map_or("", |m| m.as_str());
            header
                .iter()
                .position(|column| column == name)
                .and_then(|idx| row.get(idx))
                .cloned()
                .unwrap_or_else(|| {
                    log::warn!("placeholder {token} has no matching Examples column");
                    token.to_owned()
                })
        })
        .into_owned()
}

/// Hands out feature-global scenario identifiers in document order.
#[derive(Debug)]
pub(crate) struct IdCounter(usize);

impl IdCounter {
    pub(crate) fn starting_at(first: usize) -> Self {
        Self(first)
    }

    pub(crate) fn next(&mut self) -> usize {
        let id = self.0;
        self.0 += 1;
        id
    }
}

fn renumber(steps: impl Iterator<Item = Step>) -> Vec<Step> {
    steps
        .enumerate()
        .map(|(idx, step)| Step { id: idx + 1, ..step })
        .collect()
}

/// Build the outline and its per-row scenarios.
pub(crate) fn expand_outline(
    template: Scenario,
    examples_header: Vec<String>,
    examples: Vec<Example>,
    ids: &mut IdCounter,
) -> ScenarioOutline {
    let scenarios = examples
        .iter()
        .enumerate()
        .map(|(row, example)| {
            let steps = template.steps.iter().map(|step| Step {
                sentence: substitute_placeholders(&step.sentence, &examples_header, &example.data),
                ..step.clone()
            });
            let scenario = Scenario {
                id: ids.next(),
                sentence: format!("{} - row {row}", template.sentence),
                path: template.path.clone(),
                line: example.line,
                tags: template.tags.clone(),
                steps: renumber(steps),
            };
            log::trace!(
                "outline {} row {row} expanded as scenario {}",
                template.id,
                scenario.id
            );
            scenario
        })
        .collect();
    ScenarioOutline {
        template,
        examples_header,
        examples,
        scenarios,
    }
}

/// Build the loop and its iterations.
pub(crate) fn expand_loop(template: Scenario, iterations: usize, ids: &mut IdCounter) -> ScenarioLoop {
    let scenarios = (0..iterations)
        .map(|iteration| Scenario {
            id: ids.next(),
            sentence: format!("{} - iteration {iteration}", template.sentence),
            path: template.path.clone(),
            line: template.line,
            tags: template.tags.clone(),
            steps: renumber(template.steps.iter().cloned()),
        })
        .collect();
    log::trace!("loop {} expanded {iterations} times", template.id);
    ScenarioLoop {
        template,
        iterations,
        scenarios,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use sprig_patterns::StepKeyword;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[fixture]
    fn template() -> Scenario {
        let path = Utf8PathBuf::from("add.feature");
        Scenario {
            id: 4,
            sentence: "adding".into(),
            path: path.clone(),
            line: 2,
            tags: Vec::new(),
            steps: vec![Step {
                id: 1,
                keyword: StepKeyword::Given,
                sentence: "Given I have <n> and <n> again".into(),
                path,
                line: 3,
                table: Vec::new(),
            }],
        }
    }

    #[rstest]
    #[case("no tokens here", "no tokens here")]
    #[case("<a><b>", "12")]
    #[case("<a> then <a>", "1 then 1")]
    #[case("<missing> stays", "<missing> stays")]
    #[case("< a> is not a token", "< a> is not a token")]
    fn substitution(#[case] text: &str, #[case] expected: &str) {
        let header = strings(&["a", "b"]);
        let row = strings(&["1", "2"]);
        assert_eq!(substitute_placeholders(text, &header, &row), expected);
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let header = strings(&["a", "b"]);
        let row = strings(&["<b>", "x"]);
        assert_eq!(substitute_placeholders("<a>", &header, &row), "<b>");
    }

    #[rstest]
    fn outline_rows_take_consecutive_ids(template: Scenario) {
        let mut ids = IdCounter::starting_at(5);
        let examples = vec![
            Example {
                data: strings(&["1"]),
                line: 9,
            },
            Example {
                data: strings(&["2"]),
                line: 10,
            },
        ];
        let outline = expand_outline(template, strings(&["n"]), examples, &mut ids);
        let ids_issued: Vec<_> = outline.scenarios.iter().map(|s| s.id).collect();
        assert_eq!(ids_issued, vec![5, 6]);
        let Some(second) = outline.scenarios.get(1) else {
            panic!("two rows expand into two scenarios");
        };
        assert_eq!(second.sentence, "adding - row 1");
        assert_eq!(second.line, 10);
        assert_eq!(
            second.steps.first().map(|s| s.sentence.as_str()),
            Some("Given I have 2 and 2 again")
        );
        assert_eq!(ids.next(), 7);
    }

    #[rstest]
    fn loop_clones_template_verbatim(template: Scenario) {
        let mut ids = IdCounter::starting_at(5);
        let repeat = expand_loop(template, 3, &mut ids);
        assert_eq!(repeat.scenarios.len(), 3);
        for (offset, scenario) in repeat.scenarios.iter().enumerate() {
            assert_eq!(scenario.id, 5 + offset);
            assert_eq!(scenario.steps, repeat.template.steps);
            assert_eq!(scenario.sentence, format!("adding - iteration {offset}"));
        }
    }
}

//! Single-pass state machine assembling a [`Feature`] line by line.

use std::mem;

use camino::Utf8Path;
use sprig_patterns::{KeywordSet, StepKeyword};

use super::expand::{IdCounter, expand_loop, expand_outline};
use super::lines::{detect_scenario_loop, detect_tag, is_comment, names_keyword, split_table_row};
use crate::error::{ParseError, StructureError};
use crate::model::{Example, Feature, Scenario, ScenarioBlock, Step, Tag};

struct FeatureHeader {
    sentence: String,
    line: usize,
    tags: Vec<Tag>,
    description: Vec<String>,
}

enum Header<'l> {
    Outline(&'l str),
    Loop(&'l str, usize),
    Plain(&'l str),
}

#[derive(Default)]
struct ExamplesTable {
    header: Option<Vec<String>>,
    rows: Vec<Example>,
}

enum BlockKind {
    Plain,
    Outline(Option<ExamplesTable>),
    Loop(usize),
}

/// Where table rows currently go.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Steps,
    StepTable,
    Examples,
}

struct OpenBlock {
    kind: BlockKind,
    scenario: Scenario,
    cursor: Cursor,
}

fn push_example(
    table: &mut ExamplesTable,
    cells: Vec<String>,
    line: usize,
) -> Result<(), StructureError> {
    match table.header.as_ref().map(Vec::len) {
        None => table.header = Some(cells),
        Some(expected) if expected != cells.len() => {
            return Err(StructureError::ExampleRowWidth {
                expected,
                found: cells.len(),
            });
        }
        Some(_) => table.rows.push(Example { data: cells, line }),
    }
    Ok(())
}

pub(super) struct FeatureBuilder<'a> {
    keywords: &'a KeywordSet,
    path: &'a Utf8Path,
    feature_id: usize,
    line: usize,
    header: Option<FeatureHeader>,
    description_open: bool,
    pending_tags: Vec<Tag>,
    pending_since: usize,
    blocks: Vec<ScenarioBlock>,
    open: Option<OpenBlock>,
    ids: IdCounter,
}

impl<'a> FeatureBuilder<'a> {
    pub(super) fn new(keywords: &'a KeywordSet, path: &'a Utf8Path, feature_id: usize) -> Self {
        Self {
            keywords,
            path,
            feature_id,
            line: 0,
            header: None,
            description_open: false,
            pending_tags: Vec::new(),
            pending_since: 0,
            blocks: Vec::new(),
            open: None,
            ids: IdCounter::starting_at(1),
        }
    }

    fn fail_at(&self, line: usize, kind: StructureError) -> ParseError {
        ParseError::Structure {
            path: self.path.to_owned(),
            line,
            kind,
        }
    }

    fn fail(&self, kind: StructureError) -> ParseError {
        self.fail_at(self.line, kind)
    }

    /// Consume one source line; `number` is 1-based.
    pub(super) fn feed(&mut self, number: usize, raw: &str) -> Result<(), ParseError> {
        self.line = number;
        let text = raw.trim();
        if text.is_empty() {
            self.close_step_table();
            return Ok(());
        }
        if is_comment(text) {
            return Ok(());
        }
        if let Some(tag) = detect_tag(text) {
            return self.tag(tag);
        }
        if let Some(sentence) = KeywordSet::header(text, self.keywords.feature) {
            return self.feature(sentence);
        }
        if self.header.is_none() {
            return Err(self.fail(StructureError::ExpectedFeature));
        }
        if let Some(header) = self.scenario_header(text)? {
            return self.scenario(header);
        }
        if !self.pending_tags.is_empty() {
            return Err(self.fail(StructureError::DanglingTags));
        }
        if KeywordSet::header(text, self.keywords.examples).is_some() {
            return self.examples();
        }
        if text.starts_with('|') {
            return self.table_row(text);
        }
        if self.continues_description() {
            return self.description(text);
        }
        if let Some(keyword) = self.keywords.step_keyword(text) {
            return self.step(keyword, text);
        }
        self.description(text)
    }

    /// Whether free text has started the feature description, so that lines
    /// beginning with a step word belong to it as well.
    fn continues_description(&self) -> bool {
        self.description_open
            && self.open.is_none()
            && self
                .header
                .as_ref()
                .is_some_and(|header| !header.description.is_empty())
    }

    fn close_step_table(&mut self) {
        if let Some(open) = self.open.as_mut() {
            if open.cursor == Cursor::StepTable {
                open.cursor = Cursor::Steps;
            }
        }
    }

    fn tag(&mut self, tag: Tag) -> Result<(), ParseError> {
        if self.pending_tags.is_empty() {
            self.pending_since = self.line;
        }
        self.description_open = false;
        self.close_step_table();
        self.pending_tags.push(tag);
        Ok(())
    }

    fn feature(&mut self, sentence: &str) -> Result<(), ParseError> {
        if self.header.is_some() {
            return Err(self.fail(StructureError::MultipleFeatures));
        }
        self.header = Some(FeatureHeader {
            sentence: sentence.to_owned(),
            line: self.line,
            tags: mem::take(&mut self.pending_tags),
            description: Vec::new(),
        });
        self.description_open = true;
        Ok(())
    }

    fn scenario_header<'l>(&self, text: &'l str) -> Result<Option<Header<'l>>, ParseError> {
        let kw = self.keywords;
        if let Some(sentence) = KeywordSet::header(text, kw.scenario_outline) {
            return Ok(Some(Header::Outline(sentence)));
        }
        if let Some((sentence, iterations)) = detect_scenario_loop(text, kw) {
            return Ok(Some(Header::Loop(sentence, iterations)));
        }
        if let Some(sentence) = KeywordSet::header(text, kw.scenario) {
            return Ok(Some(Header::Plain(sentence)));
        }
        let names_scenario = [kw.scenario_outline, kw.scenario_loop, kw.scenario]
            .into_iter()
            .any(|keyword| names_keyword(text, keyword));
        if names_scenario {
            return Err(self.fail(StructureError::InvalidScenarioHeader));
        }
        Ok(None)
    }

    fn scenario(&mut self, header: Header<'_>) -> Result<(), ParseError> {
        self.finish_block()?;
        self.description_open = false;
        let (kind, sentence) = match header {
            Header::Outline(sentence) => (BlockKind::Outline(None), sentence),
            Header::Loop(sentence, iterations) => (BlockKind::Loop(iterations), sentence),
            Header::Plain(sentence) => (BlockKind::Plain, sentence),
        };
        let scenario = Scenario {
            id: self.ids.next(),
            sentence: sentence.to_owned(),
            path: self.path.to_owned(),
            line: self.line,
            tags: mem::take(&mut self.pending_tags),
            steps: Vec::new(),
        };
        self.open = Some(OpenBlock {
            kind,
            scenario,
            cursor: Cursor::Steps,
        });
        Ok(())
    }

    fn examples(&mut self) -> Result<(), ParseError> {
        let outcome = match self.open.as_mut() {
            Some(OpenBlock {
                kind: BlockKind::Outline(slot @ None),
                cursor,
                ..
            }) => {
                *slot = Some(ExamplesTable::default());
                *cursor = Cursor::Examples;
                Ok(())
            }
            Some(OpenBlock {
                kind: BlockKind::Outline(Some(_)),
                ..
            }) => Err(StructureError::UnexpectedLine {
                text: self.keywords.examples.to_owned(),
            }),
            _ => Err(StructureError::ExamplesWithoutOutline),
        };
        outcome.map_err(|kind| self.fail(kind))
    }

    fn table_row(&mut self, text: &str) -> Result<(), ParseError> {
        let line = self.line;
        let cells = split_table_row(text);
        let outcome = match self.open.as_mut() {
            Some(open) => match (open.cursor, &mut open.kind) {
                (Cursor::StepTable, _) => open
                    .scenario
                    .steps
                    .last_mut()
                    .map(|step| step.table.push(cells))
                    .ok_or(StructureError::TableWithoutStep),
                (Cursor::Examples, BlockKind::Outline(Some(table))) => {
                    push_example(table, cells, line)
                }
                _ => Err(StructureError::TableWithoutStep),
            },
            None => Err(StructureError::TableWithoutStep),
        };
        outcome.map_err(|kind| self.fail(kind))
    }

    fn step(&mut self, keyword: StepKeyword, text: &str) -> Result<(), ParseError> {
        let line = self.line;
        let path = self.path;
        let outcome = match self.open.as_mut() {
            None => Err(StructureError::StepOutsideScenario),
            Some(open) if open.cursor == Cursor::Examples => {
                Err(StructureError::StepAfterExamples)
            }
            Some(open) => {
                let steps = &mut open.scenario.steps;
                steps.push(Step {
                    id: steps.len() + 1,
                    keyword,
                    sentence: text.to_owned(),
                    path: path.to_owned(),
                    line,
                    table: Vec::new(),
                });
                open.cursor = Cursor::StepTable;
                Ok(())
            }
        };
        outcome.map_err(|kind| self.fail(kind))
    }

    fn description(&mut self, text: &str) -> Result<(), ParseError> {
        match self.header.as_mut() {
            Some(header) if self.description_open => {
                header.description.push(text.to_owned());
                Ok(())
            }
            _ => Err(self.fail(StructureError::UnexpectedLine {
                text: text.to_owned(),
            })),
        }
    }

    /// Close the open block, expanding templates with the next identifiers.
    fn finish_block(&mut self) -> Result<(), ParseError> {
        let Some(open) = self.open.take() else {
            return Ok(());
        };
        let block = match open.kind {
            BlockKind::Plain => ScenarioBlock::Scenario(open.scenario),
            BlockKind::Loop(iterations) => {
                ScenarioBlock::Loop(expand_loop(open.scenario, iterations, &mut self.ids))
            }
            BlockKind::Outline(table) => {
                let Some(ExamplesTable {
                    header: Some(columns),
                    rows,
                }) = table
                else {
                    return Err(self.fail_at(open.scenario.line, StructureError::MissingExamples));
                };
                ScenarioBlock::Outline(expand_outline(open.scenario, columns, rows, &mut self.ids))
            }
        };
        self.blocks.push(block);
        Ok(())
    }

    pub(super) fn finish(mut self) -> Result<Feature, ParseError> {
        let Some(header) = self.header.take() else {
            return Err(self.fail_at(self.line.max(1), StructureError::NoFeature));
        };
        if !self.pending_tags.is_empty() {
            return Err(self.fail_at(self.pending_since, StructureError::DanglingTags));
        }
        self.finish_block()?;
        Ok(Feature {
            id: self.feature_id,
            sentence: header.sentence,
            description: header.description,
            path: self.path.to_owned(),
            line: header.line,
            tags: header.tags,
            scenarios: self.blocks,
        })
    }
}

//! Pure classifiers for single feature-file lines.
//!
//! None of these fail: a line that does not have the expected shape yields
//! `None` and the caller moves on to the next interpretation.

use std::sync::LazyLock;

use regex::Regex;
use sprig_patterns::KeywordSet;

use crate::model::Tag;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@(?P<name>[^\s(]+)(?:\((?P<arg>[^)]*)\))?")
        .unwrap_or_else(|_| unreachable!("tag regex is valid"))
});

const COMMENT_MARKER: char = '#';

/// Whether the trimmed line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_MARKER)
}

/// Parse a tag line such as `@slow` or `@issue(42)`.
///
/// Text after the tag is ignored. Lines not starting with `@` are not tags.
///
/// # Examples
///
/// ```
/// use sprig::parser::detect_tag;
///
/// let tag = detect_tag("@some_tag_with_arg(args)").expect("tag line");
/// assert_eq!(tag.name, "some_tag_with_arg");
/// assert_eq!(tag.argument.as_deref(), Some("args"));
///
/// assert_eq!(detect_tag("@some_tag sdfg").map(|t| t.name), Some("some_tag".into()));
/// assert!(detect_tag("some_tag").is_none());
/// ```
#[must_use]
pub fn detect_tag(line: &str) -> Option<Tag> {
    let caps = TAG_RE.captures(line.trim())?;
    let name = caps.name("name")?.as_str();
    let argument = caps.name("arg").map(|m| m.as_str().to_owned());
    Some(Tag::new(name, argument))
}

/// Parse a loop header such as `Scenario Loop 10: some sentence`.
///
/// Returns the sentence and the iteration count. The count must be a plain
/// non-negative integer; anything else means the line is not a loop header.
///
/// # Examples
///
/// ```
/// use sprig::parser::detect_scenario_loop;
/// use sprig_patterns::builtin_keywords;
///
/// let en = builtin_keywords("en").expect("english table");
/// assert_eq!(
///     detect_scenario_loop("Scenario Loop 10: Some fancy scenario loop", en),
///     Some(("Some fancy scenario loop", 10))
/// );
/// assert_eq!(detect_scenario_loop("Scenario Loop 5.5: nope", en), None);
/// assert_eq!(detect_scenario_loop("Scenario Loop: nope", en), None);
/// ```
#[must_use]
pub fn detect_scenario_loop<'l>(line: &'l str, keywords: &KeywordSet) -> Option<(&'l str, usize)> {
    let rest = line.trim().strip_prefix(keywords.scenario_loop)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let (count, sentence) = rest.split_once(':')?;
    let count = count.trim();
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let iterations = count.parse().ok()?;
    Some((sentence.trim(), iterations))
}

/// Whether `line` starts with `keyword` as a whole word.
pub(crate) fn names_keyword(line: &str, keyword: &str) -> bool {
    line.strip_prefix(keyword).is_some_and(|rest| {
        rest.is_empty() || rest.starts_with(':') || rest.starts_with(char::is_whitespace)
    })
}

/// Split a `| a | b |` row into trimmed cells.
///
/// The closing pipe is optional; empty cells are kept.
pub(crate) fn split_table_row(line: &str) -> Vec<String> {
    let inner = line.trim();
    let inner = inner.strip_prefix('|').unwrap_or(inner);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_owned()).collect()
}

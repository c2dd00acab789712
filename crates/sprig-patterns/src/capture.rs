//! Regex capture helpers used when binding a sentence to its step.

use regex::Regex;

/// Values captured from a step sentence by a matching pattern.
///
/// Positional values keep one entry per capture group (group 0 excluded);
/// groups that did not participate yield empty strings so indices stay
/// aligned with the pattern. Named groups are additionally exposed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    /// Every capture group in pattern order.
    pub positional: Vec<String>,
    /// Named capture groups that participated in the match.
    pub named: Vec<(String, String)>,
}

impl Captures {
    /// Look up a named capture.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Extract the capture groups when `text` matches `re`, returning `None`
/// otherwise.
///
/// # Examples
/// ```
/// # use regex::Regex;
/// # use sprig_patterns::extract_captures;
/// let regex = Regex::new(r"number (?P<n>\d+) plus (\d+)")
///     .expect("example ensures fallible call succeeds");
/// let caps = extract_captures(&regex, "Given the number 4 plus 2")
///     .expect("example ensures fallible call succeeds");
/// assert_eq!(caps.positional, vec!["4".to_string(), "2".to_string()]);
/// assert_eq!(caps.get("n"), Some("4"));
/// ```
#[must_use]
pub fn extract_captures(re: &Regex, text: &str) -> Option<Captures> {
    let caps = re.captures(text)?;
    let positional = caps
        .iter()
        .skip(1)
        .map(|m| m.map_or_else(String::new, |m| m.as_str().to_owned()))
        .collect();
    let named = re
        .capture_names()
        .flatten()
        .filter_map(|name| {
            caps.name(name)
                .map(|m| (name.to_owned(), m.as_str().to_owned()))
        })
        .collect();
    Some(Captures { positional, named })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(
        clippy::expect_used,
        reason = "tests require descriptive panic messages"
    )]
    fn regex(src: &str) -> Regex {
        Regex::new(src).expect("test regex must compile")
    }

    #[test]
    fn returns_none_when_pattern_does_not_match() {
        assert!(extract_captures(&regex(r"^(\d+)$"), "nope").is_none());
    }

    #[test]
    fn keeps_alignment_for_optional_groups() {
        let Some(caps) = extract_captures(&regex(r"^(\d+)(-x)?-(\w+)$"), "12-answer") else {
            panic!("expected a match");
        };
        assert_eq!(
            caps.positional,
            vec!["12".to_string(), String::new(), "answer".to_string()]
        );
        assert!(caps.named.is_empty());
    }

    #[test]
    fn exposes_named_groups() {
        let Some(caps) = extract_captures(&regex(r"(?P<who>\w+) has (?P<count>\d+)"), "Bob has 3")
        else {
            panic!("expected a match");
        };
        assert_eq!(caps.get("who"), Some("Bob"));
        assert_eq!(caps.get("count"), Some("3"));
        assert_eq!(caps.get("missing"), None);
    }
}

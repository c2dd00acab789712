//! Per-language keyword tables.
//!
//! A [`KeywordSet`] is the vocabulary the feature parser uses to recognise
//! header lines (`Feature:`, `Scenario Outline:`, ...) and step lines. The
//! built-in tables cover English, German, and French; callers with other
//! needs implement [`KeywordLookup`] and hand it to the parser.

use crate::keyword::StepKeyword;

/// Header and step vocabulary for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    /// Language code the table is registered under, e.g. `"en"`.
    pub language: &'static str,
    /// Keyword introducing the single Feature of a file.
    pub feature: &'static str,
    /// Keyword introducing a plain scenario.
    pub scenario: &'static str,
    /// Keyword introducing a parameterised scenario template.
    pub scenario_outline: &'static str,
    /// Keyword introducing a repeated scenario; followed by the iteration count.
    pub scenario_loop: &'static str,
    /// Keyword introducing the data table of an outline.
    pub examples: &'static str,
    /// Spellings of `Given`.
    pub given: &'static [&'static str],
    /// Spellings of `When`.
    pub when: &'static [&'static str],
    /// Spellings of `Then`.
    pub then: &'static [&'static str],
    /// Spellings of `And`.
    pub and: &'static [&'static str],
    /// Spellings of `But`.
    pub but: &'static [&'static str],
}

impl KeywordSet {
    /// Return the localised spellings registered for `keyword`.
    #[must_use]
    pub fn spellings(&self, keyword: StepKeyword) -> &'static [&'static str] {
        match keyword {
            StepKeyword::Given => self.given,
            StepKeyword::When => self.when,
            StepKeyword::Then => self.then,
            StepKeyword::And => self.and,
            StepKeyword::But => self.but,
        }
    }

    /// Detect the step keyword a line starts with.
    ///
    /// The keyword must be followed by whitespace or end the line, and the
    /// longest matching spelling wins so multi-word forms such as
    /// `"Gegeben sei"` take precedence over shorter prefixes.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig_patterns::{StepKeyword, builtin_keywords};
    ///
    /// let en = builtin_keywords("en").unwrap();
    /// assert_eq!(en.step_keyword("Given a number"), Some(StepKeyword::Given));
    /// assert_eq!(en.step_keyword("Givens are not steps"), None);
    /// ```
    #[must_use]
    pub fn step_keyword(&self, line: &str) -> Option<StepKeyword> {
        StepKeyword::ALL
            .into_iter()
            .flat_map(|kind| self.spellings(kind).iter().map(move |word| (kind, *word)))
            .filter(|(_, word)| starts_with_word(line, word))
            .max_by_key(|(_, word)| word.len())
            .map(|(kind, _)| kind)
    }

    /// Return the text after `keyword:` when `line` is a header for `keyword`.
    ///
    /// Whitespace between the keyword and the colon is tolerated; the returned
    /// text is trimmed and may be empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprig_patterns::KeywordSet;
    ///
    /// assert_eq!(KeywordSet::header("Feature: adding", "Feature"), Some("adding"));
    /// assert_eq!(KeywordSet::header("Examples:", "Examples"), Some(""));
    /// assert_eq!(KeywordSet::header("Scenario Outline: x", "Scenario"), None);
    /// ```
    #[must_use]
    pub fn header<'l>(line: &'l str, keyword: &str) -> Option<&'l str> {
        line.strip_prefix(keyword)?
            .trim_start()
            .strip_prefix(':')
            .map(str::trim)
    }
}

fn starts_with_word(line: &str, word: &str) -> bool {
    line.strip_prefix(word)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Source of keyword tables keyed by language code.
///
/// The parser only reads from a lookup, so a single instance can serve any
/// number of concurrently running parsers.
pub trait KeywordLookup {
    /// Return the table registered for `language`, if any.
    fn keywords(&self, language: &str) -> Option<&KeywordSet>;
}

static ENGLISH: KeywordSet = KeywordSet {
    language: "en",
    feature: "Feature",
    scenario: "Scenario",
    scenario_outline: "Scenario Outline",
    scenario_loop: "Scenario Loop",
    examples: "Examples",
    given: &["Given"],
    when: &["When"],
    then: &["Then"],
    and: &["And"],
    but: &["But"],
};

static GERMAN: KeywordSet = KeywordSet {
    language: "de",
    feature: "Funktionalität",
    scenario: "Szenario",
    scenario_outline: "Szenario Auslagerung",
    scenario_loop: "Szenario Schleife",
    examples: "Beispiele",
    given: &["Angenommen", "Gegeben sei", "Gegeben seien"],
    when: &["Wenn"],
    then: &["Dann"],
    and: &["Und"],
    but: &["Aber"],
};

static FRENCH: KeywordSet = KeywordSet {
    language: "fr",
    feature: "Fonctionnalité",
    scenario: "Scénario",
    scenario_outline: "Plan du scénario",
    scenario_loop: "Scénario Boucle",
    examples: "Exemples",
    given: &["Soit", "Étant donné", "Étant donné que", "Etant donné que"],
    when: &["Quand", "Lorsque"],
    then: &["Alors"],
    and: &["Et"],
    but: &["Mais"],
};

static BUILTIN: [&KeywordSet; 3] = [&ENGLISH, &GERMAN, &FRENCH];

/// Return the built-in table for `language`.
///
/// # Examples
///
/// ```
/// use sprig_patterns::builtin_keywords;
///
/// assert_eq!(builtin_keywords("de").map(|k| k.examples), Some("Beispiele"));
/// assert!(builtin_keywords("foo").is_none());
/// ```
#[must_use]
pub fn builtin_keywords(language: &str) -> Option<&'static KeywordSet> {
    BUILTIN
        .iter()
        .copied()
        .find(|set| set.language.eq_ignore_ascii_case(language))
}

/// [`KeywordLookup`] backed by the tables compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinKeywords;

impl BuiltinKeywords {
    /// Language codes with a built-in table.
    #[must_use]
    pub fn languages() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|set| set.language)
    }
}

impl KeywordLookup for BuiltinKeywords {
    fn keywords(&self, language: &str) -> Option<&KeywordSet> {
        builtin_keywords(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en", "Feature", "Scenario Outline", "Examples")]
    #[case("de", "Funktionalität", "Szenario Auslagerung", "Beispiele")]
    #[case("fr", "Fonctionnalité", "Plan du scénario", "Exemples")]
    fn builtin_tables_expose_headers(
        #[case] language: &str,
        #[case] feature: &str,
        #[case] outline: &str,
        #[case] examples: &str,
    ) {
        let Some(set) = builtin_keywords(language) else {
            panic!("missing table for {language}");
        };
        assert_eq!(set.feature, feature);
        assert_eq!(set.scenario_outline, outline);
        assert_eq!(set.examples, examples);
    }

    #[test]
    fn unknown_language_has_no_table() {
        assert!(builtin_keywords("foo").is_none());
        assert!(BuiltinKeywords.keywords("xx").is_none());
    }

    #[rstest]
    #[case("Given I have the number 5", Some(StepKeyword::Given))]
    #[case("When I add 2", Some(StepKeyword::When))]
    #[case("Then it is 7", Some(StepKeyword::Then))]
    #[case("And more", Some(StepKeyword::And))]
    #[case("But less", Some(StepKeyword::But))]
    #[case("Given", Some(StepKeyword::Given))]
    #[case("Andrew is not a step", None)]
    #[case("In order to test", None)]
    fn detects_english_step_keywords(#[case] line: &str, #[case] expected: Option<StepKeyword>) {
        assert_eq!(ENGLISH.step_keyword(line), expected);
    }

    #[test]
    fn prefers_longest_spelling() {
        assert_eq!(
            GERMAN.step_keyword("Gegeben seien zwei Zahlen"),
            Some(StepKeyword::Given)
        );
        assert_eq!(FRENCH.step_keyword("Étant donné que x"), Some(StepKeyword::Given));
    }

    #[rstest]
    #[case("Feature: some feature", "Feature", Some("some feature"))]
    #[case("Feature : spaced", "Feature", Some("spaced"))]
    #[case("Feature:", "Feature", Some(""))]
    #[case("Features: plural", "Feature", None)]
    #[case("Scenario Loop 3: x", "Scenario", None)]
    fn header_extraction(#[case] line: &str, #[case] keyword: &str, #[case] expected: Option<&str>) {
        assert_eq!(KeywordSet::header(line, keyword), expected);
    }

    #[test]
    fn lists_builtin_languages() {
        let languages: Vec<_> = BuiltinKeywords::languages().collect();
        assert_eq!(languages, vec!["en", "de", "fr"]);
    }
}

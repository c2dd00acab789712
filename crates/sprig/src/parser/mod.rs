//! Feature-file parsing.
//!
//! [`FeatureParser`] turns one feature file into a [`Feature`] tree in a
//! single forward pass. Outlines and loops are expanded as soon as their
//! block closes, so identifiers are issued strictly in document order.

mod builder;
mod expand;
mod lines;

use std::io::{self, Read};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::File};
use sprig_patterns::{BuiltinKeywords, KeywordLookup, KeywordSet};

use crate::config;
use crate::error::ParseError;
use crate::model::{Feature, Tag};

use builder::FeatureBuilder;
pub use expand::substitute_placeholders;
pub use lines::{detect_scenario_loop, detect_tag};

/// Parser for a single feature file.
///
/// `C` is an opaque collaborator supplied by the runner. The parser only
/// carries it so the runner can recover it alongside the parsed feature.
///
/// # Examples
///
/// ```
/// use sprig::FeatureParser;
///
/// let parser = FeatureParser::new((), "features/add.feature", 1, "en").expect("english");
/// let feature = parser
///     .parse_str("Feature: adding\n  Scenario: one\n    Given a number")
///     .expect("valid feature");
/// assert_eq!(feature.sentence, "adding");
/// assert_eq!(feature.scenarios.len(), 1);
/// ```
#[derive(Debug)]
pub struct FeatureParser<C> {
    core: C,
    path: Utf8PathBuf,
    feature_id: usize,
    keywords: KeywordSet,
}

impl<C> FeatureParser<C> {
    /// Create a parser using the built-in keyword tables.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::LanguageNotSupported`] when no table exists for
    /// `language`.
    pub fn new(
        core: C,
        path: impl Into<Utf8PathBuf>,
        feature_id: usize,
        language: &str,
    ) -> Result<Self, ParseError> {
        Self::with_keywords(core, path, feature_id, language, &BuiltinKeywords)
    }

    /// Create a parser for the configured default language.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::LanguageNotSupported`] when the configured
    /// language has no built-in table.
    pub fn with_default_language(
        core: C,
        path: impl Into<Utf8PathBuf>,
        feature_id: usize,
    ) -> Result<Self, ParseError> {
        Self::new(core, path, feature_id, &config::default_language())
    }

    /// Create a parser drawing keywords from `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::LanguageNotSupported`] when `lookup` has no
    /// table for `language`.
    pub fn with_keywords(
        core: C,
        path: impl Into<Utf8PathBuf>,
        feature_id: usize,
        language: &str,
        lookup: &dyn KeywordLookup,
    ) -> Result<Self, ParseError> {
        let keywords = lookup
            .keywords(language)
            .cloned()
            .ok_or_else(|| ParseError::LanguageNotSupported {
                language: language.to_owned(),
            })?;
        Ok(Self {
            core,
            path: path.into(),
            feature_id,
            keywords,
        })
    }

    /// Keyword table in use.
    #[must_use]
    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Path of the feature file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Identifier the parsed feature will carry.
    #[must_use]
    pub fn feature_id(&self) -> usize {
        self.feature_id
    }

    /// The runner collaborator.
    pub fn core(&self) -> &C {
        &self.core
    }

    /// Give the runner collaborator back.
    pub fn into_core(self) -> C {
        self.core
    }

    /// Parse a tag line; see [`detect_tag`].
    #[must_use]
    pub fn detect_tag(&self, line: &str) -> Option<Tag> {
        detect_tag(line)
    }

    /// Parse a loop header using this parser's keywords; see
    /// [`detect_scenario_loop`].
    #[must_use]
    pub fn detect_scenario_loop<'l>(&self, line: &'l str) -> Option<(&'l str, usize)> {
        detect_scenario_loop(line, &self.keywords)
    }

    /// Read and parse the feature file.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::FeatureFileNotFound`] when the file does not
    /// exist, [`ParseError::Io`] for other read failures, and
    /// [`ParseError::Structure`] when the contents are malformed.
    pub fn parse(&self) -> Result<Feature, ParseError> {
        let source = read_feature(&self.path)?;
        self.parse_str(&source)
    }

    /// Parse `source` as if it had been read from this parser's path.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Structure`] when the contents are malformed.
    pub fn parse_str(&self, source: &str) -> Result<Feature, ParseError> {
        log::debug!("parsing feature file {}", self.path);
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let mut builder = FeatureBuilder::new(&self.keywords, &self.path, self.feature_id);
        for (idx, line) in source.lines().enumerate() {
            builder.feed(idx + 1, line)?;
        }
        let feature = builder.finish()?;
        log::debug!(
            "parsed feature '{}' from {} with {} scenario identifiers",
            feature.sentence,
            self.path,
            feature.total_scenarios()
        );
        Ok(feature)
    }
}

fn read_error(path: &Utf8Path, source: io::Error) -> ParseError {
    if source.kind() == io::ErrorKind::NotFound {
        ParseError::FeatureFileNotFound {
            path: path.to_owned(),
        }
    } else {
        ParseError::Io {
            path: path.to_owned(),
            source,
        }
    }
}

/// Read a feature file through an ambient-authority capability handle.
///
/// The whole path is opened at once so symlinks resolve as the operating
/// system resolves them.
fn read_feature(path: &Utf8Path) -> Result<String, ParseError> {
    let mut file =
        File::open_ambient(path, ambient_authority()).map_err(|err| read_error(path, err))?;
    let mut source = String::new();
    file.read_to_string(&mut source)
        .map_err(|err| read_error(path, err))?;
    Ok(source)
}

//! Parsing several feature files in one pass.

use camino::Utf8PathBuf;

use crate::error::ParseError;
use crate::model::Feature;
use crate::parser::FeatureParser;

/// Parse `paths` in order, numbering features consecutively from
/// `first_id`.
///
/// Stops at the first file that fails; nothing parsed so far is returned in
/// that case.
///
/// # Errors
///
/// Returns the [`ParseError`] of the first failing file,
/// [`ParseError::LanguageNotSupported`] before any file is read, or
/// [`ParseError::FeatureIdOverflow`] when the identifiers run out.
pub fn load_features<C, I, P>(
    core: &C,
    paths: I,
    first_id: usize,
    language: &str,
) -> Result<Vec<Feature>, ParseError>
where
    I: IntoIterator<Item = P>,
    P: Into<Utf8PathBuf>,
{
    paths
        .into_iter()
        .enumerate()
        .map(|(offset, path)| {
            let path = path.into();
            let Some(feature_id) = first_id.checked_add(offset) else {
                return Err(ParseError::FeatureIdOverflow {
                    path,
                    first_id,
                    offset,
                });
            };
            FeatureParser::new(core, path, feature_id, language)?.parse()
        })
        .collect()
}

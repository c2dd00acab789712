//! Shared vocabulary for sprig.
//!
//! The crate owns the language tables used to recognise feature-file headers
//! and step keywords, plus the helpers that turn a registered step pattern
//! into a matcher. Both are read-only once constructed, so parser instances
//! and registries may share them freely across threads.

mod capture;
mod errors;
mod keyword;
mod language;
mod pattern;

pub use capture::{Captures, extract_captures};
pub use errors::PatternError;
pub use keyword::StepKeyword;
pub use language::{BuiltinKeywords, KeywordLookup, KeywordSet, builtin_keywords};
pub use pattern::{PatternMode, PatternModeParseError, compile_step_pattern};

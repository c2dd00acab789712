//! Runtime configuration for sprig.
//!
//! Two settings are read from the environment and may be overridden in
//! process: how step patterns are interpreted (`SPRIG_PATTERN_MODE`) and which
//! keyword table the parser uses when none is given (`SPRIG_LANGUAGE`).

use std::sync::RwLock;
use std::sync::atomic::{AtomicU8, Ordering};

use sprig_patterns::PatternMode;

/// Environment variable selecting the pattern mode.
pub const PATTERN_MODE_ENV: &str = "SPRIG_PATTERN_MODE";
/// Environment variable selecting the default parser language.
pub const LANGUAGE_ENV: &str = "SPRIG_LANGUAGE";
/// Language used when nothing else is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

const OVERRIDE_UNSET: u8 = 0;
const OVERRIDE_REGEX: u8 = 1;
const OVERRIDE_LITERAL: u8 = 2;

static PATTERN_MODE_OVERRIDE: AtomicU8 = AtomicU8::new(OVERRIDE_UNSET);
static LANGUAGE_OVERRIDE: RwLock<Option<String>> = RwLock::new(None);

fn env_pattern_mode() -> Option<PatternMode> {
    let raw = std::env::var(PATTERN_MODE_ENV).ok()?;
    match raw.parse() {
        Ok(mode) => Some(mode),
        Err(err) => {
            log::warn!("ignoring {PATTERN_MODE_ENV}: {err}");
            None
        }
    }
}

fn override_pattern_mode() -> Option<PatternMode> {
    match PATTERN_MODE_OVERRIDE.load(Ordering::Relaxed) {
        OVERRIDE_REGEX => Some(PatternMode::Regex),
        OVERRIDE_LITERAL => Some(PatternMode::Literal),
        _ => None,
    }
}

/// Pattern mode used by newly created step registries.
#[must_use]
pub fn pattern_mode() -> PatternMode {
    override_pattern_mode()
        .or_else(env_pattern_mode)
        .unwrap_or_default()
}

/// Override the pattern mode for the current process.
///
/// Call [`clear_pattern_mode_override`] to return to environment driven
/// behaviour.
pub fn set_pattern_mode(mode: PatternMode) {
    let value = match mode {
        PatternMode::Regex => OVERRIDE_REGEX,
        PatternMode::Literal => OVERRIDE_LITERAL,
    };
    PATTERN_MODE_OVERRIDE.store(value, Ordering::Relaxed);
}

/// Remove any in-process pattern mode override.
pub fn clear_pattern_mode_override() {
    PATTERN_MODE_OVERRIDE.store(OVERRIDE_UNSET, Ordering::Relaxed);
}

/// Language code the parser falls back to.
#[must_use]
pub fn default_language() -> String {
    let overridden = LANGUAGE_OVERRIDE
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone();
    overridden
        .or_else(|| {
            std::env::var(LANGUAGE_ENV)
                .ok()
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned())
}

/// Override the default language for the current process; `None` restores
/// environment driven behaviour.
pub fn set_default_language(language: Option<&str>) {
    *LANGUAGE_OVERRIDE
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner) = language.map(str::to_owned);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn pattern_mode_defaults_to_regex() {
        clear_pattern_mode_override();
        if std::env::var_os(PATTERN_MODE_ENV).is_none() {
            assert_eq!(pattern_mode(), PatternMode::Regex);
        }
    }

    #[test]
    #[serial]
    fn override_sets_pattern_mode() {
        set_pattern_mode(PatternMode::Literal);
        assert_eq!(pattern_mode(), PatternMode::Literal);
        set_pattern_mode(PatternMode::Regex);
        assert_eq!(pattern_mode(), PatternMode::Regex);
        clear_pattern_mode_override();
    }

    #[test]
    #[serial]
    fn language_override_round_trips() {
        set_default_language(Some("de"));
        assert_eq!(default_language(), "de");
        set_default_language(None);
        if std::env::var_os(LANGUAGE_ENV).is_none() {
            assert_eq!(default_language(), DEFAULT_LANGUAGE);
        }
    }
}

//! Locale type: validated, copyable locale handle.
//!
//! A `Locale` can only be built for codes the registry knows, so code that
//! holds one never has to re-check membership.

use crate::i18n::{I18nError, LocaleConfig, LocaleRegistry};
use std::fmt;
use std::str::FromStr;

/// A validated locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    pub const ENGLISH: Locale = Locale { code: "en" };
    pub const ITALIAN: Locale = Locale { code: "it" };
    pub const GERMAN: Locale = Locale { code: "de" };
    pub const SPANISH: Locale = Locale { code: "es" };

    /// Create a Locale from an exact registry code.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is registered
    /// * `Err(I18nError::UnknownLocale)` otherwise
    pub fn from_code(code: &str) -> Result<Locale, I18nError> {
        LocaleRegistry::get()
            .get_by_code(code)
            .map(|config| Locale { code: config.code })
            .ok_or_else(|| I18nError::UnknownLocale(code.to_string()))
    }

    /// Create a Locale from a language tag such as `it-IT` or `de_DE.UTF-8`.
    ///
    /// Only the primary subtag is consulted, lower-cased.
    pub fn from_language_tag(tag: &str) -> Option<Locale> {
        Locale::from_code(&primary_subtag(tag)).ok()
    }

    /// The registry's default locale.
    pub fn default_locale() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_config().code,
        }
    }

    /// Get every registered locale in registry order.
    pub fn all() -> Vec<Locale> {
        LocaleRegistry::get()
            .list()
            .iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not found in the registry. This cannot happen
    /// for a Locale built through `from_code` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be registered")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn flag(&self) -> &'static str {
        self.config().flag
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::default_locale()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(s)
    }
}

/// Lower-cased primary subtag of a language tag.
///
/// Truncates at the first region/script separator (`-`) and also at the
/// POSIX separators `_`, `.` and `@` so `it_IT.UTF-8` yields `it`.
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

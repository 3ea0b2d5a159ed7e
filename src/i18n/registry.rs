//! Locale registry: Single source of truth for all supported locales.
//!
//! The registry is immutable reference data. It uses `OnceLock` so every
//! consumer (language pickers, the locale store, the catalog) sees the same
//! ordered table without any of them owning it.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Primary language subtag (e.g., "en", "it")
    pub code: &'static str,

    /// Display name in the locale's own language (e.g., "Italiano")
    pub name: &'static str,

    /// Decorative flag glyph shown next to the name in pickers
    pub flag: &'static str,

    /// Whether this is the default locale (exactly one must be true)
    pub is_default: bool,
}

/// Global locale registry.
///
/// Ordering is significant: pickers list locales in registry order.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// Matching is exact; callers normalize tags before asking.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All supported locales, in display order.
    pub fn list(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Check if a locale code is a member of the registry.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default locale
    /// (this indicates a configuration error in `default_locales`).
    pub fn default_config(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }
}

fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            name: "English",
            flag: "🇬🇧",
            is_default: true,
        },
        LocaleConfig {
            code: "it",
            name: "Italiano",
            flag: "🇮🇹",
            is_default: false,
        },
        LocaleConfig {
            code: "de",
            name: "Deutsch",
            flag: "🇩🇪",
            is_default: false,
        },
        LocaleConfig {
            code: "es",
            name: "Español",
            flag: "🇪🇸",
            is_default: false,
        },
    ]
}

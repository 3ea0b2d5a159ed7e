//! Environment language signal.
//!
//! The embedding platform reports the user's preferred language as a tag
//! (`it-IT`, `de_DE.UTF-8`). Only its primary subtag is ever consulted.

/// Process locale variables, in the order POSIX gives them precedence.
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Read-only source of the user's preferred language tag.
pub trait LanguageSignal {
    fn language_tag(&self) -> Option<String>;
}

/// Language signal backed by the process locale environment.
#[derive(Debug, Default, Copy, Clone)]
pub struct ProcessLanguage;

impl LanguageSignal for ProcessLanguage {
    /// The first non-empty variable decides. A neutral value there
    /// (`LC_ALL=C`) means no preference, even when `LANG` is set.
    fn language_tag(&self) -> Option<String> {
        let value = LOCALE_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())?;
        (!is_neutral_locale(&value)).then_some(value)
    }
}

/// A fixed signal, for embeddings that already know the tag (an
/// `Accept-Language` header, a browser's `navigator.language`) and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FixedLanguage(Option<String>);

impl FixedLanguage {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Some(tag.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl LanguageSignal for FixedLanguage {
    fn language_tag(&self) -> Option<String> {
        self.0.clone()
    }
}

// "C" and "POSIX" mean "no preference", not a language.
fn is_neutral_locale(value: &str) -> bool {
    let base = value.split('.').next().unwrap_or_default();
    base.eq_ignore_ascii_case("C") || base.eq_ignore_ascii_case("POSIX")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_locale_env() {
        for name in LOCALE_ENV_VARS {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_fixed_language() {
        assert_eq!(
            FixedLanguage::new("it-IT").language_tag().as_deref(),
            Some("it-IT")
        );
        assert_eq!(FixedLanguage::none().language_tag(), None);
    }

    #[test]
    fn test_neutral_locales() {
        assert!(is_neutral_locale("C"));
        assert!(is_neutral_locale("C.UTF-8"));
        assert!(is_neutral_locale("POSIX"));
        assert!(!is_neutral_locale("de_DE.UTF-8"));
    }

    #[test]
    #[serial]
    fn test_process_language_reads_lang() {
        clear_locale_env();
        std::env::set_var("LANG", "de_DE.UTF-8");

        assert_eq!(
            ProcessLanguage.language_tag().as_deref(),
            Some("de_DE.UTF-8")
        );

        clear_locale_env();
    }

    #[test]
    #[serial]
    fn test_process_language_lc_all_wins() {
        clear_locale_env();
        std::env::set_var("LANG", "de_DE.UTF-8");
        std::env::set_var("LC_ALL", "es_ES.UTF-8");

        assert_eq!(
            ProcessLanguage.language_tag().as_deref(),
            Some("es_ES.UTF-8")
        );

        clear_locale_env();
    }

    #[test]
    #[serial]
    fn test_process_language_neutral_lc_all_overrides_lang() {
        clear_locale_env();
        std::env::set_var("LC_ALL", "C");
        std::env::set_var("LANG", "it_IT.UTF-8");

        assert_eq!(ProcessLanguage.language_tag(), None);

        clear_locale_env();
    }

    #[test]
    #[serial]
    fn test_process_language_skips_empty_lc_all() {
        clear_locale_env();
        std::env::set_var("LC_ALL", "  ");
        std::env::set_var("LANG", "it_IT.UTF-8");

        assert_eq!(
            ProcessLanguage.language_tag().as_deref(),
            Some("it_IT.UTF-8")
        );

        clear_locale_env();
    }

    #[test]
    #[serial]
    fn test_process_language_unset() {
        clear_locale_env();
        assert_eq!(ProcessLanguage.language_tag(), None);
    }
}

//! Lookup facade: `t(path)` bound to whatever locale is active.
//!
//! The localizer is owned by the root of the embedding application and
//! handed to consumers explicitly. Consumers that cache rendered text can
//! compare `revision()` to know when the active locale really changed.

use crate::config::Config;
use crate::i18n::{
    interpolate, resolve, Catalog, FileStorage, I18nError, LanguageSignal, Locale,
    LocaleConfig, LocaleRegistry, LocaleStore, LookupMetrics, Resolution, TranslationNode,
};
use anyhow::Result;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// What `t` does when the active locale has no translation for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Return the key path itself
    #[default]
    KeyPath,

    /// Try the default locale's tree first, then return the key path
    DefaultLocale,
}

impl FromStr for FallbackPolicy {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "key" | "keypath" | "key-path" => Ok(FallbackPolicy::KeyPath),
            "default" | "default-locale" => Ok(FallbackPolicy::DefaultLocale),
            _ => Err(I18nError::UnknownFallbackPolicy(s.to_string())),
        }
    }
}

/// The consumption surface: current locale, setter, and lookups.
#[derive(Debug)]
pub struct Localizer {
    catalog: Arc<Catalog>,
    store: LocaleStore,
    fallback: FallbackPolicy,
    metrics: Arc<LookupMetrics>,
}

impl Localizer {
    pub fn new(catalog: Arc<Catalog>, store: LocaleStore) -> Self {
        let metrics = store.metrics();
        Self {
            catalog,
            store,
            fallback: FallbackPolicy::default(),
            metrics,
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Build a localizer from configuration: catalog from the configured
    /// directory (or the embedded documents), file-backed preference storage.
    pub fn from_config(config: &Config, signal: &dyn LanguageSignal) -> Result<Self> {
        let catalog = match &config.locales_dir {
            Some(dir) => Catalog::load_dir(dir)?,
            None => Catalog::embedded()?,
        };
        let storage = FileStorage::new(&config.storage_path);
        let store = LocaleStore::initialize_with_key(storage, &config.storage_key, signal);

        Ok(Self::new(Arc::new(catalog), store).with_fallback(config.fallback))
    }

    pub fn locale(&self) -> Locale {
        self.store.current_locale()
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.store.set_locale(locale);
    }

    /// Switch by code; an unsupported code changes nothing.
    pub fn set_locale_code(&mut self, code: &str) -> Result<Locale, I18nError> {
        self.store.set_locale_code(code)
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn store(&self) -> &LocaleStore {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }

    /// Supported locales for rendering a language picker.
    pub fn languages(&self) -> &'static [LocaleConfig] {
        LocaleRegistry::get().list()
    }

    /// Resolve without collapsing a miss into the key path.
    pub fn lookup<'a>(&'a self, path: &'a str) -> Resolution<'a> {
        let locale = self.locale();
        let resolution = self.resolve_in(locale, path);
        if resolution.is_found() {
            self.metrics.record_hit();
            return resolution;
        }

        let default = Locale::default_locale();
        if self.fallback == FallbackPolicy::DefaultLocale && locale != default {
            let fallback = self.resolve_in(default, path);
            if fallback.is_found() {
                debug!("'{}' missing in '{}', using '{}'", path, locale, default);
                self.metrics.record_fallback_hit();
                return fallback;
            }
        }

        debug!("Missing translation for '{}' in '{}'", path, locale);
        self.metrics.record_miss();
        Resolution::Missing(path)
    }

    /// Translate `path` in the active locale. A miss yields `path` itself.
    pub fn t(&self, path: &str) -> String {
        self.lookup(path).into_text()
    }

    /// Translate and fill `{{name}}` placeholders.
    pub fn t_with(&self, path: &str, vars: &[(&str, &str)]) -> String {
        interpolate(&self.t(path), vars)
    }

    /// Items of a list-of-text leaf, without a JSON round-trip.
    ///
    /// `None` when the path is not such a list in the active locale (or in
    /// the default locale, under `FallbackPolicy::DefaultLocale`).
    pub fn t_list(&self, path: &str) -> Option<Vec<String>> {
        let locale = self.locale();
        let mut candidates = vec![locale];
        if self.fallback == FallbackPolicy::DefaultLocale && !locale.is_default() {
            candidates.push(Locale::default_locale());
        }

        candidates.into_iter().find_map(|candidate| {
            match self.catalog.tree(candidate)?.get(path)? {
                TranslationNode::List(items) => items
                    .iter()
                    .map(|item| item.as_text().map(ToString::to_string))
                    .collect(),
                _ => None,
            }
        })
    }

    fn resolve_in<'a>(&'a self, locale: Locale, path: &'a str) -> Resolution<'a> {
        match self.catalog.tree(locale) {
            Some(tree) => resolve(tree, path),
            None => Resolution::Missing(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{FixedLanguage, MemoryStorage, TranslationTree};
    use serde_json::json;

    fn tree(value: serde_json::Value) -> TranslationTree {
        TranslationTree::from_value(value).expect("Test tree should load")
    }

    fn test_catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::new()
                .with_tree(
                    Locale::ENGLISH,
                    tree(json!({
                        "hero": {"title": "Hello", "only_en": "English only"},
                        "faq": {"bullets": ["one", "two"]},
                        "contact": {"success": "Thanks, {{name}}!"}
                    })),
                )
                .with_tree(
                    Locale::ITALIAN,
                    tree(json!({
                        "hero": {"title": "Ciao"},
                        "faq": {"bullets": ["uno", "due"]},
                        "contact": {"success": "Grazie, {{name}}!"}
                    })),
                ),
        )
    }

    fn localizer(tag: &str) -> Localizer {
        let store = LocaleStore::initialize(MemoryStorage::new(), &FixedLanguage::new(tag));
        Localizer::new(test_catalog(), store)
    }

    // ==================== t Tests ====================

    #[test]
    fn test_t_uses_active_locale() {
        let i18n = localizer("it-IT");
        assert_eq!(i18n.t("hero.title"), "Ciao");
    }

    #[test]
    fn test_t_follows_locale_change() {
        let mut i18n = localizer("it-IT");
        i18n.set_locale(Locale::ENGLISH);
        assert_eq!(i18n.t("hero.title"), "Hello");
    }

    #[test]
    fn test_t_miss_returns_path() {
        let i18n = localizer("it");
        assert_eq!(i18n.t("hero.only_en"), "hero.only_en");
        assert_eq!(i18n.metrics().misses(), 1);
    }

    #[test]
    fn test_t_locale_without_tree_returns_path() {
        let i18n = localizer("de");
        assert_eq!(i18n.locale(), Locale::GERMAN);
        assert_eq!(i18n.t("hero.title"), "hero.title");
    }

    #[test]
    fn test_t_list_leaf_as_json() {
        let i18n = localizer("it");
        assert_eq!(i18n.t("faq.bullets"), r#"["uno","due"]"#);
    }

    // ==================== Fallback Tests ====================

    #[test]
    fn test_default_locale_fallback() {
        let i18n = localizer("it").with_fallback(FallbackPolicy::DefaultLocale);
        assert_eq!(i18n.t("hero.only_en"), "English only");
        assert_eq!(i18n.t("hero.nowhere"), "hero.nowhere");

        let report = i18n.metrics().report();
        assert_eq!(report.fallback_hits, 1);
        assert_eq!(report.misses, 1);
    }

    #[test]
    fn test_default_locale_fallback_for_missing_tree() {
        let i18n = localizer("es").with_fallback(FallbackPolicy::DefaultLocale);
        assert_eq!(i18n.t("hero.title"), "Hello");
    }

    #[test]
    fn test_fallback_policy_from_str() {
        assert_eq!("key".parse::<FallbackPolicy>(), Ok(FallbackPolicy::KeyPath));
        assert_eq!(
            "Default".parse::<FallbackPolicy>(),
            Ok(FallbackPolicy::DefaultLocale)
        );
        assert_eq!(
            "nearest".parse::<FallbackPolicy>(),
            Err(I18nError::UnknownFallbackPolicy("nearest".to_string()))
        );
    }

    // ==================== t_with / t_list Tests ====================

    #[test]
    fn test_t_with_interpolates() {
        let i18n = localizer("it");
        assert_eq!(
            i18n.t_with("contact.success", &[("name", "Marco")]),
            "Grazie, Marco!"
        );
    }

    #[test]
    fn test_t_list() {
        let i18n = localizer("it");
        assert_eq!(
            i18n.t_list("faq.bullets"),
            Some(vec!["uno".to_string(), "due".to_string()])
        );
        assert_eq!(i18n.t_list("hero.title"), None);
        assert_eq!(i18n.t_list("faq.missing"), None);
    }

    // ==================== Locale Change Tests ====================

    #[test]
    fn test_revision_only_changes_on_switch() {
        let mut i18n = localizer("it");
        i18n.set_locale(Locale::ITALIAN);
        assert_eq!(i18n.revision(), 0);
        i18n.set_locale(Locale::ENGLISH);
        assert_eq!(i18n.revision(), 1);
    }

    #[test]
    fn test_set_locale_code_unsupported_keeps_lookups() {
        let mut i18n = localizer("it");
        assert!(i18n.set_locale_code("fr").is_err());
        assert_eq!(i18n.t("hero.title"), "Ciao");
    }

    #[test]
    fn test_languages_lists_registry() {
        let i18n = localizer("en");
        assert_eq!(i18n.languages().len(), 4);
        assert_eq!(i18n.languages()[1].name, "Italiano");
    }
}

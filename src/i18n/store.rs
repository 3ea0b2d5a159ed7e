//! Locale store: owns the active locale and keeps it persisted.
//!
//! A store only exists once initialization has picked a locale, so there is
//! no "uninitialized" value to guard against. Storage problems never reach
//! the caller: a failed read falls through to the next source, a failed
//! write is logged and counted.

use crate::i18n::{I18nError, LanguageSignal, Locale, LookupMetrics, PreferenceStorage};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Storage key for the persisted locale.
pub const DEFAULT_STORAGE_KEY: &str = "fd-lang";

/// Where the initial locale came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    Persisted,
    Environment,
    Default,
}

/// Receives the active locale code (the document-level `lang` attribute
/// in a web embedding).
pub trait DocumentLanguage {
    fn set_language(&self, code: &str);
}

/// Document sink for embeddings without a document.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDocument;

impl DocumentLanguage for NoDocument {
    fn set_language(&self, _code: &str) {}
}

/// Shared language attribute. Clones observe the same value.
#[derive(Debug, Default, Clone)]
pub struct LangAttribute {
    value: Arc<Mutex<Option<String>>>,
}

impl LangAttribute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Option<String> {
        self.value.lock().ok().and_then(|value| value.clone())
    }
}

impl DocumentLanguage for LangAttribute {
    fn set_language(&self, code: &str) {
        if let Ok(mut value) = self.value.lock() {
            *value = Some(code.to_string());
        }
    }
}

/// Pick the initial locale: persisted value, then environment signal, then
/// the registry default. First registered match wins.
pub fn initial_locale(
    storage: &dyn PreferenceStorage,
    storage_key: &str,
    signal: &dyn LanguageSignal,
) -> (Locale, LocaleSource) {
    let (locale, source, _) = pick_initial(storage, storage_key, signal);
    (locale, source)
}

// Third element reports whether reading the persisted value failed.
fn pick_initial(
    storage: &dyn PreferenceStorage,
    storage_key: &str,
    signal: &dyn LanguageSignal,
) -> (Locale, LocaleSource, bool) {
    let mut read_failed = false;
    match storage.read(storage_key) {
        Ok(Some(saved)) => match Locale::from_code(&saved) {
            Ok(locale) => return (locale, LocaleSource::Persisted, false),
            Err(_) => debug!("Ignoring unsupported persisted locale '{}'", saved),
        },
        Ok(None) => debug!("No persisted locale under '{}'", storage_key),
        Err(e) => {
            warn!("Could not read persisted locale, ignoring: {}", e);
            read_failed = true;
        }
    }

    if let Some(tag) = signal.language_tag() {
        match Locale::from_language_tag(&tag) {
            Some(locale) => return (locale, LocaleSource::Environment, read_failed),
            None => debug!("Ignoring unsupported environment language '{}'", tag),
        }
    }

    (Locale::default_locale(), LocaleSource::Default, read_failed)
}

/// Holder of the active locale.
pub struct LocaleStore {
    current: Locale,
    source: LocaleSource,
    revision: u64,
    storage_key: String,
    storage: Box<dyn PreferenceStorage>,
    document: Box<dyn DocumentLanguage>,
    metrics: Arc<LookupMetrics>,
}

impl LocaleStore {
    /// Initialize under the default storage key.
    pub fn initialize(
        storage: impl PreferenceStorage + 'static,
        signal: &dyn LanguageSignal,
    ) -> Self {
        Self::initialize_with_key(storage, DEFAULT_STORAGE_KEY, signal)
    }

    pub fn initialize_with_key(
        storage: impl PreferenceStorage + 'static,
        storage_key: &str,
        signal: &dyn LanguageSignal,
    ) -> Self {
        let (current, source, read_failed) = pick_initial(&storage, storage_key, signal);
        info!("Active locale: {} (from {:?})", current, source);

        let metrics = Arc::new(LookupMetrics::new());
        if read_failed {
            metrics.record_storage_failure();
        }

        Self {
            current,
            source,
            revision: 0,
            storage_key: storage_key.to_string(),
            storage: Box::new(storage),
            document: Box::new(NoDocument),
            metrics,
        }
    }

    /// Attach a document sink; it immediately receives the active locale.
    pub fn with_document(mut self, document: impl DocumentLanguage + 'static) -> Self {
        document.set_language(self.current.code());
        self.document = Box::new(document);
        self
    }

    pub fn current_locale(&self) -> Locale {
        self.current
    }

    pub fn source(&self) -> LocaleSource {
        self.source
    }

    /// Bumped every time the active locale actually changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn metrics(&self) -> Arc<LookupMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Switch the active locale, persist it and reflect it in the document.
    ///
    /// Setting the already-active locale re-persists it but does not bump
    /// the revision.
    pub fn set_locale(&mut self, locale: Locale) {
        if locale != self.current {
            info!("Locale changed: {} -> {}", self.current, locale);
            self.current = locale;
            self.revision += 1;
            self.metrics.record_locale_change();
        }

        if let Err(e) = self.storage.write(&self.storage_key, locale.code()) {
            warn!(
                "Could not persist locale '{}', keeping it for this session: {}",
                locale, e
            );
            self.metrics.record_storage_failure();
        }

        self.document.set_language(locale.code());
    }

    /// Switch by code. An unsupported code changes nothing.
    pub fn set_locale_code(&mut self, code: &str) -> Result<Locale, I18nError> {
        match Locale::from_code(code) {
            Ok(locale) => {
                self.set_locale(locale);
                Ok(locale)
            }
            Err(e) => {
                warn!("Rejected locale change to '{}': not a supported locale", code);
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for LocaleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleStore")
            .field("current", &self.current)
            .field("source", &self.source)
            .field("revision", &self.revision)
            .field("storage_key", &self.storage_key)
            .finish_non_exhaustive()
    }
}

//! Internationalization (i18n) module for multi-language site content.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported locales and their metadata
//! - `language`: Type-safe `Locale` handle validated against the registry
//! - `tree`: Nested translation documents (`Text | List | Branch`)
//! - `resolver`: Dot-path lookup with a visible miss (the path itself)
//! - `catalog`: Every locale's tree, embedded or loaded from a directory
//! - `storage`: Durable preference storage (file, memory, disabled)
//! - `signal`: Environment-reported language
//! - `store`: Active locale, initial-locale priority, persistence
//! - `facade`: `Localizer::t`, the lookup consumers call
//! - `validator`: Cross-locale consistency checks
//! - `metrics`: Lookup counters
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use site_i18n::i18n::{Catalog, FixedLanguage, LocaleStore, Localizer, MemoryStorage};
//!
//! let catalog = Arc::new(Catalog::embedded().unwrap());
//! let store = LocaleStore::initialize(MemoryStorage::new(), &FixedLanguage::new("it-IT"));
//! let mut i18n = Localizer::new(catalog, store);
//!
//! assert_eq!(i18n.t("nav.contact"), "Contatti");
//! assert_eq!(i18n.t("nav.nowhere"), "nav.nowhere");
//!
//! i18n.set_locale_code("de").unwrap();
//! assert_eq!(i18n.t("nav.contact"), "Kontakt");
//! ```

mod catalog;
mod error;
mod facade;
mod interpolation;
mod language;
mod metrics;
mod registry;
mod resolver;
mod signal;
mod storage;
mod store;
mod tree;
mod validator;

pub use catalog::Catalog;
pub use error::{I18nError, StorageError, TreeError};
pub use facade::{FallbackPolicy, Localizer};
pub use interpolation::{interpolate, placeholders};
pub use language::{primary_subtag, Locale};
pub use metrics::{LookupMetrics, MetricsReport};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use resolver::{resolve, resolve_text, Resolution};
pub use signal::{FixedLanguage, LanguageSignal, ProcessLanguage, LOCALE_ENV_VARS};
pub use storage::{DisabledStorage, FileStorage, MemoryStorage, PreferenceStorage};
pub use store::{
    initial_locale, DocumentLanguage, LangAttribute, LocaleSource, LocaleStore, NoDocument,
    DEFAULT_STORAGE_KEY,
};
pub use tree::{NodeKind, TranslationNode, TranslationTree};
pub use validator::{CatalogValidator, ValidationReport};

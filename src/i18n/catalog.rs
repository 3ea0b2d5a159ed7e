//! Catalog: every locale's translation tree, loaded once and shared.

use crate::i18n::{Locale, TranslationTree};
use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Translation documents compiled into the binary.
const EMBEDDED: [(Locale, &str); 4] = [
    (Locale::ENGLISH, include_str!("../../locales/en.json")),
    (Locale::ITALIAN, include_str!("../../locales/it.json")),
    (Locale::GERMAN, include_str!("../../locales/de.json")),
    (Locale::SPANISH, include_str!("../../locales/es.json")),
];

/// Read-only map of locale to translation tree.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    trees: HashMap<Locale, TranslationTree>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the documents embedded at build time.
    pub fn embedded() -> Result<Self> {
        let mut catalog = Self::new();
        for (locale, json) in EMBEDDED {
            let tree = TranslationTree::from_json_str(json)
                .with_context(|| format!("Embedded translations for '{}' are invalid", locale))?;
            catalog.insert(locale, tree);
        }
        debug!("Loaded {} embedded translation trees", catalog.trees.len());
        Ok(catalog)
    }

    /// Load `<dir>/<code>.json` for every registered locale.
    ///
    /// The default locale's document is required. Other missing documents
    /// are logged and skipped; lookups in those locales return key paths.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut catalog = Self::new();

        for locale in Locale::all() {
            let path = dir.join(format!("{}.json", locale.code()));
            if !path.exists() {
                if locale.is_default() {
                    bail!(
                        "Translations for default locale '{}' not found at {}",
                        locale,
                        path.display()
                    );
                }
                warn!("No translations for '{}' at {}", locale, path.display());
                continue;
            }

            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let tree = TranslationTree::from_json_str(&json)
                .with_context(|| format!("Invalid translation document {}", path.display()))?;
            catalog.insert(locale, tree);
        }

        info!(
            "Loaded {} translation trees from {}",
            catalog.trees.len(),
            dir.display()
        );
        Ok(catalog)
    }

    pub fn insert(&mut self, locale: Locale, tree: TranslationTree) {
        self.trees.insert(locale, tree);
    }

    pub fn with_tree(mut self, locale: Locale, tree: TranslationTree) -> Self {
        self.insert(locale, tree);
        self
    }

    pub fn tree(&self, locale: Locale) -> Option<&TranslationTree> {
        self.trees.get(&locale)
    }

    /// Locales that have a tree, in registry order.
    pub fn locales(&self) -> Vec<Locale> {
        Locale::all()
            .into_iter()
            .filter(|locale| self.trees.contains_key(locale))
            .collect()
    }
}

use crate::i18n::{FallbackPolicy, DEFAULT_STORAGE_KEY};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `<code>.json` documents; embedded documents when unset
    pub locales_dir: Option<PathBuf>,

    // Persisted preference
    pub storage_path: PathBuf,
    pub storage_key: String,

    pub fallback: FallbackPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            locales_dir: std::env::var("SITE_I18N_LOCALES_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),

            storage_path: std::env::var("SITE_I18N_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".site-i18n/preferences.json")),
            storage_key: std::env::var("SITE_I18N_STORAGE_KEY")
                .unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string()),

            fallback: match std::env::var("SITE_I18N_FALLBACK") {
                Ok(value) => value
                    .parse()
                    .context("SITE_I18N_FALLBACK must be 'key' or 'default'")?,
                Err(_) => FallbackPolicy::default(),
            },
        })
    }
}

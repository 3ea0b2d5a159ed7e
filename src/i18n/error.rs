//! Error types for the i18n subsystem.
//!
//! Lookups never fail; these errors only come out of the operations that
//! load content, touch durable storage, or accept an arbitrary locale code.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when a caller supplies a value the registry does not know.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum I18nError {
    /// The code is not a member of the locale registry
    #[error("Unknown locale code: '{0}'")]
    UnknownLocale(String),

    /// The fallback policy name is not recognized
    #[error("Unknown fallback policy: '{0}' (expected 'key' or 'default')")]
    UnknownFallbackPolicy(String),
}

/// Errors raised while turning a JSON document into a translation tree.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Failed to parse translation document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Translation document root must be an object, found {found}")]
    RootNotObject { found: &'static str },

    /// Numbers, booleans and nulls have no place in a translation tree
    #[error("Unsupported {found} value at '{path}' (expected string, array or object)")]
    UnsupportedValue { path: String, found: &'static str },
}

/// Errors raised by durable preference storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Preference storage is unavailable")]
    Unavailable,

    #[error("Failed to access preference file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preference file {} is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Preference storage lock was poisoned")]
    Poisoned,
}

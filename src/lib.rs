//! Locale resolution and nested translation lookup for multi-language sites.

pub mod config;
pub mod i18n;

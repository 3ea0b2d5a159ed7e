//! `{{name}}` placeholder handling.
//!
//! Values are inserted as-is; escaping is the renderer's job.

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").expect("Placeholder pattern is valid")
    })
}

/// Replace every `{{name}}` with its value from `vars`.
///
/// Placeholders without a value are left untouched so they stay visible.
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Names of all placeholders in `text`.
pub fn placeholders(text: &str) -> BTreeSet<String> {
    placeholder_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

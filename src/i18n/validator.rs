//! Catalog consistency validation.
//!
//! Every locale's tree should have the same key paths as the default
//! locale's tree, with the same leaf kinds and the same `{{placeholders}}`.
//! Nothing enforces this at lookup time; a miss just shows the key path.
//! This module finds those problems before a user does.

use crate::i18n::{placeholders, Catalog, Locale, TranslationNode};
use std::collections::BTreeMap;

/// Validation report containing errors and warnings about a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make a lookup return the key path or the wrong shape
    pub errors: Vec<String>,

    /// Problems that render, but probably not as intended
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for catalog consistency.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Compare every registered locale against the default locale.
    ///
    /// Errors:
    /// - a registered locale has no tree
    /// - a key path of the default locale is missing
    /// - a leaf has a different kind (text vs list)
    ///
    /// Warnings:
    /// - a key path not present in the default locale
    /// - list leaves with a different number of items
    /// - text leaves with different placeholder sets
    /// - an empty text where the default locale has content
    pub fn validate(catalog: &Catalog) -> ValidationReport {
        let mut report = ValidationReport::new();
        let default = Locale::default_locale();

        let Some(reference) = catalog.tree(default) else {
            report
                .errors
                .push(format!("Default locale '{}' has no translations", default));
            return report;
        };
        let reference_leaves: BTreeMap<_, _> = reference.leaves().into_iter().collect();

        for locale in Locale::all().into_iter().filter(|l| *l != default) {
            match catalog.tree(locale) {
                Some(tree) => {
                    let leaves: BTreeMap<_, _> = tree.leaves().into_iter().collect();
                    Self::compare(default, &reference_leaves, locale, &leaves, &mut report);
                }
                None => report
                    .errors
                    .push(format!("Locale '{}' has no translations", locale)),
            }
        }

        report
    }

    fn compare(
        default: Locale,
        reference: &BTreeMap<String, &TranslationNode>,
        locale: Locale,
        leaves: &BTreeMap<String, &TranslationNode>,
        report: &mut ValidationReport,
    ) {
        for (path, expected) in reference {
            let Some(actual) = leaves.get(path) else {
                report
                    .errors
                    .push(format!("Missing key '{}' in '{}'", path, locale));
                continue;
            };

            if expected.kind() != actual.kind() {
                report.errors.push(format!(
                    "Leaf type mismatch at '{}': '{}' has {}, '{}' has {}",
                    path,
                    default,
                    expected.kind(),
                    locale,
                    actual.kind()
                ));
                continue;
            }

            match (expected, actual) {
                (TranslationNode::List(expected_items), TranslationNode::List(actual_items))
                    if expected_items.len() != actual_items.len() =>
                {
                    report.warnings.push(format!(
                        "List length mismatch at '{}': '{}' has {} items, '{}' has {}",
                        path,
                        default,
                        expected_items.len(),
                        locale,
                        actual_items.len()
                    ));
                }
                (TranslationNode::Text(expected_text), TranslationNode::Text(actual_text)) => {
                    if actual_text.trim().is_empty() && !expected_text.trim().is_empty() {
                        report
                            .warnings
                            .push(format!("Empty translation at '{}' in '{}'", path, locale));
                    }

                    let expected_vars = placeholders(expected_text);
                    let actual_vars = placeholders(actual_text);
                    if expected_vars != actual_vars {
                        report.warnings.push(format!(
                            "Placeholder mismatch at '{}': '{}' has {:?}, '{}' has {:?}",
                            path, default, expected_vars, locale, actual_vars
                        ));
                    }
                }
                _ => {}
            }
        }

        for path in leaves.keys().filter(|path| !reference.contains_key(*path)) {
            report.warnings.push(format!(
                "Extra key '{}' in '{}' (not present in '{}')",
                path, locale, default
            ));
        }
    }
}

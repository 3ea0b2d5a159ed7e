//! Key resolver: maps `(tree, "dotted.key.path")` to a display string.
//!
//! A miss is never an error. It comes back as `Resolution::Missing` carrying
//! the requested path, and callers that want display text turn that into the
//! literal path so untranslated labels stay visible on screen.

use crate::i18n::{TranslationNode, TranslationTree};
use std::borrow::Cow;

/// Outcome of resolving a key path against one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The path reached a leaf. Lists arrive as compact JSON text.
    Found(Cow<'a, str>),

    /// The path missed or stopped on a branch; holds the path unmodified.
    Missing(&'a str),
}

impl<'a> Resolution<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// Display text: the found value, or the path itself on a miss.
    pub fn into_text(self) -> String {
        match self {
            Resolution::Found(text) => text.into_owned(),
            Resolution::Missing(path) => path.to_string(),
        }
    }
}

/// Resolve `path` against `tree`.
///
/// * text leaf: returned verbatim
/// * list leaf: serialized as JSON, e.g. `["a","b"]`
/// * branch, missing key, out-of-range index: `Missing(path)`
pub fn resolve<'a>(tree: &'a TranslationTree, path: &'a str) -> Resolution<'a> {
    match tree.get(path) {
        Some(TranslationNode::Text(text)) => Resolution::Found(Cow::Borrowed(text)),
        Some(node @ TranslationNode::List(_)) => match serde_json::to_string(node) {
            Ok(json) => Resolution::Found(Cow::Owned(json)),
            Err(_) => Resolution::Missing(path),
        },
        Some(TranslationNode::Branch(_)) | None => Resolution::Missing(path),
    }
}

/// Resolve straight to display text.
pub fn resolve_text(tree: &TranslationTree, path: &str) -> String {
    resolve(tree, path).into_text()
}

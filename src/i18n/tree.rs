//! Translation trees: the nested, read-only documents of localized strings.

use crate::i18n::TreeError;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A node in a translation tree.
///
/// Serializes back to plain JSON (no variant tags), which is what list
/// leaves resolve to. Branch keys keep the order they were written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranslationNode {
    Text(String),
    List(Vec<TranslationNode>),
    Branch(IndexMap<String, TranslationNode>),
}

/// Shape of a node, used when comparing trees across locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    List,
    Branch,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Text => "text",
            NodeKind::List => "list",
            NodeKind::Branch => "branch",
        })
    }
}

impl TranslationNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            TranslationNode::Text(_) => NodeKind::Text,
            TranslationNode::List(_) => NodeKind::List,
            TranslationNode::Branch(_) => NodeKind::Branch,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TranslationNode::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Descend one path segment.
    ///
    /// Branches are addressed by key, lists by canonical decimal index
    /// (`"3"`, never `"03"` or `"+3"`). Text has no children.
    pub fn child(&self, segment: &str) -> Option<&TranslationNode> {
        match self {
            TranslationNode::Branch(children) => children.get(segment),
            TranslationNode::List(items) => {
                let index: usize = segment.parse().ok()?;
                if index.to_string() != segment {
                    return None;
                }
                items.get(index)
            }
            TranslationNode::Text(_) => None,
        }
    }

    /// True for lists whose items are all text, i.e. list-shaped leaf values.
    pub fn is_text_list(&self) -> bool {
        match self {
            TranslationNode::List(items) => items
                .iter()
                .all(|item| matches!(item, TranslationNode::Text(_))),
            _ => false,
        }
    }

    fn from_value(value: Value, path: &str) -> Result<TranslationNode, TreeError> {
        match value {
            Value::String(text) => Ok(TranslationNode::Text(text)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    TranslationNode::from_value(item, &join_path(path, &index.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(TranslationNode::List),
            Value::Object(map) => branch_from_map(map, path).map(TranslationNode::Branch),
            other => Err(TreeError::UnsupportedValue {
                path: path.to_string(),
                found: value_kind(&other),
            }),
        }
    }
}

/// A translation document for one locale. The root is always a mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTree {
    root: IndexMap<String, TranslationNode>,
}

impl TranslationTree {
    /// Parse a JSON document into a tree.
    ///
    /// # Errors
    /// Fails on malformed JSON, a non-object root, or any number, boolean or
    /// null value (the error names the offending key path).
    pub fn from_json_str(json: &str) -> Result<Self, TreeError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, TreeError> {
        match value {
            Value::Object(map) => Ok(Self {
                root: branch_from_map(map, "")?,
            }),
            other => Err(TreeError::RootNotObject {
                found: value_kind(&other),
            }),
        }
    }

    pub fn root(&self) -> &IndexMap<String, TranslationNode> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Walk a dot-separated path. Returns `None` as soon as a segment misses.
    pub fn get(&self, path: &str) -> Option<&TranslationNode> {
        let mut segments = path.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            node = node.child(segment)?;
        }
        Some(node)
    }

    /// Every leaf in the tree with its full key path, sorted by path.
    ///
    /// Text and lists of text are leaves. Lists holding records are walked
    /// by index so `faq.items.0.question` shows up as its own leaf.
    pub fn leaves(&self) -> Vec<(String, &TranslationNode)> {
        let mut leaves = Vec::new();
        for (key, node) in &self.root {
            collect_leaves(key.clone(), node, &mut leaves);
        }
        leaves.sort_by(|a, b| a.0.cmp(&b.0));
        leaves
    }
}

fn collect_leaves<'a>(
    path: String,
    node: &'a TranslationNode,
    leaves: &mut Vec<(String, &'a TranslationNode)>,
) {
    match node {
        TranslationNode::Text(_) => leaves.push((path, node)),
        TranslationNode::List(_) if node.is_text_list() => leaves.push((path, node)),
        TranslationNode::List(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_leaves(join_path(&path, &index.to_string()), item, leaves);
            }
        }
        TranslationNode::Branch(children) => {
            for (key, child) in children {
                collect_leaves(join_path(&path, key), child, leaves);
            }
        }
    }
}

fn branch_from_map(
    map: serde_json::Map<String, Value>,
    path: &str,
) -> Result<IndexMap<String, TranslationNode>, TreeError> {
    map.into_iter()
        .map(|(key, child)| {
            let child_path = join_path(path, &key);
            TranslationNode::from_value(child, &child_path).map(|node| (key, node))
        })
        .collect()
}

fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", parent, segment)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

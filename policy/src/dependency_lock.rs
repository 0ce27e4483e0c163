//! Dependency lock scanning.
//!
//! Finds dependencies pinned to a source-control commit instead of a
//! released version. The lock file's `DEPENDENCIES` section is decoded into a
//! [`DependencyNode`] tree and walked in pre-order.
//!
//! Example lock entries:
//!
//! ```text
//! DEPENDENCIES:
//!   - Kanvas (from `https://github.com/tumblr/Kanvas-iOS.git`, branch `main`)
//!   - WordPress-Editor-iOS (~> 1.19.8)
//!   - WordPressUI (from `https://github.com/wordpress-mobile/WordPressUI-iOS`, commit `5ab5fd3`)
//! ```
//!
//! Only the textual dialect above is recognized: `commit` followed by a value
//! quoted with backticks or single quotes. Entries in any other dialect do not
//! match and are not reported.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use crate::error::{PolicyError, PolicyResult};

/// Top-level lock section listing the declared dependencies.
pub const DEPENDENCIES_KEY: &str = "DEPENDENCIES";

static COMMIT_PIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)\(from .*, commit [`'].*[`']")
        .expect("COMMIT_PIN_PATTERN regex should compile")
});

/// One entry of the dependency tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyNode {
    /// A single dependency descriptor
    Leaf(String),
    /// A dependency descriptor with its transitive dependencies
    Node {
        key: String,
        children: Vec<DependencyNode>,
    },
}

impl DependencyNode {
    pub fn leaf(descriptor: impl Into<String>) -> Self {
        Self::Leaf(descriptor.into())
    }

    pub fn node(key: impl Into<String>, children: Vec<DependencyNode>) -> Self {
        Self::Node {
            key: key.into(),
            children,
        }
    }
}

impl TryFrom<&Value> for DependencyNode {
    type Error = PolicyError;

    fn try_from(value: &Value) -> PolicyResult<Self> {
        match value {
            Value::String(descriptor) => Ok(Self::Leaf(descriptor.clone())),
            Value::Mapping(map) => {
                let mut entries = map.iter();
                let (key, children) = match (entries.next(), entries.next()) {
                    (Some(entry), None) => entry,
                    _ => {
                        return Err(PolicyError::malformed(format!(
                            "expected a single-key mapping, found {} keys",
                            map.len()
                        )))
                    }
                };
                let key = key
                    .as_str()
                    .ok_or_else(|| PolicyError::malformed("dependency key is not a string"))?;
                let children = match children {
                    Value::Sequence(items) => items
                        .iter()
                        .map(DependencyNode::try_from)
                        .collect::<PolicyResult<Vec<_>>>()?,
                    Value::Null => Vec::new(),
                    other => {
                        return Err(PolicyError::malformed(format!(
                            "children of '{key}' are a {}, expected a sequence",
                            value_kind(other)
                        )))
                    }
                };
                Ok(Self::node(key, children))
            }
            other => Err(PolicyError::malformed(format!(
                "unexpected {} entry",
                value_kind(other)
            ))),
        }
    }
}

/// Return the name of a commit-pinned descriptor, or `None`.
///
/// Branch pins and version requirements never match.
pub fn commit_pinned_name(descriptor: &str) -> Option<String> {
    COMMIT_PIN_PATTERN
        .captures(descriptor)
        .and_then(|caps| caps.get(1))
        .map(|name| name.as_str().trim().to_string())
}

/// Names of every commit-pinned dependency under `node`, in pre-order.
pub fn find_commit_pods(node: &DependencyNode) -> Vec<String> {
    match node {
        DependencyNode::Leaf(descriptor) => commit_pinned_name(descriptor).into_iter().collect(),
        DependencyNode::Node { key, children } => {
            let mut names: Vec<String> = commit_pinned_name(key).into_iter().collect();
            names.extend(children.iter().flat_map(find_commit_pods));
            names
        }
    }
}

/// The declared dependencies of a lock file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyManifest {
    pub dependencies: Vec<DependencyNode>,
}

impl DependencyManifest {
    /// Decode the `DEPENDENCIES` section of a lock file.
    ///
    /// Blank text, an empty document, or a missing section all yield an empty
    /// manifest.
    pub fn from_lock_str(text: &str) -> PolicyResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let document: Value = serde_yaml::from_str(text)?;
        let section = match &document {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(map) => map.get(DEPENDENCIES_KEY),
            other => {
                return Err(PolicyError::malformed(format!(
                    "lock document is a {}, expected a mapping",
                    value_kind(other)
                )))
            }
        };

        let dependencies = match section {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(items)) => items
                .iter()
                .map(DependencyNode::try_from)
                .collect::<PolicyResult<Vec<_>>>()?,
            Some(other) => {
                return Err(PolicyError::malformed(format!(
                    "{DEPENDENCIES_KEY} is a {}, expected a sequence",
                    value_kind(other)
                )))
            }
        };

        Ok(Self { dependencies })
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Commit-pinned dependency names across the whole manifest, in order.
    pub fn commit_pinned(&self) -> Vec<String> {
        self.dependencies.iter().flat_map(find_commit_pods).collect()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

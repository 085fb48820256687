//! Recursive JSON subset matching.
//!
//! `expected` is a pattern: only the keys and elements it names are checked
//! against `actual`.
//!
//! - objects: every expected key must exist in `actual` and match recursively
//! - arrays: every expected element must match at least one actual element,
//!   in any order; two expected elements may match the same actual element
//! - scalars: equality, except that two strings which both parse as JSON are
//!   compared by their parsed values
//! - a `null` actual never matches
//!
//! [`matches`] only answers yes or no and builds no mismatch. [`check_subset`]
//! is the strict form and reports the first mismatch with its path.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Category of a subset mismatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MismatchKind {
    MissingKey,
    MissingListItem,
    ValueMismatch,
    NullActual,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey => write!(f, "MissingKey"),
            Self::MissingListItem => write!(f, "MissingListItem"),
            Self::ValueMismatch => write!(f, "ValueMismatch"),
            Self::NullActual => write!(f, "NullActual"),
        }
    }
}

/// First point at which `expected` is not contained in `actual`
///
/// `path` is a JSONPath-style location rooted at `$`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubsetMismatch {
    #[error("Key '{key}' not found in '{actual}' (at {path})")]
    MissingKey {
        path: String,
        key: String,
        actual: Value,
    },

    #[error("Item '{item}' not found in {actual} (at {path})")]
    MissingListItem {
        path: String,
        item: Value,
        actual: Value,
    },

    #[error("Value mismatch: {expected} != {actual} (at {path})")]
    ValueMismatch {
        path: String,
        expected: Value,
        actual: Value,
    },

    #[error("Event is null (at {path}), expected {expected}")]
    NullActual { path: String, expected: Value },
}

impl SubsetMismatch {
    pub fn kind(&self) -> MismatchKind {
        match self {
            Self::MissingKey { .. } => MismatchKind::MissingKey,
            Self::MissingListItem { .. } => MismatchKind::MissingListItem,
            Self::ValueMismatch { .. } => MismatchKind::ValueMismatch,
            Self::NullActual { .. } => MismatchKind::NullActual,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::MissingKey { path, .. }
            | Self::MissingListItem { path, .. }
            | Self::ValueMismatch { path, .. }
            | Self::NullActual { path, .. } => path,
        }
    }
}

const ROOT_PATH: &str = "$";

/// True if `expected` is contained in `actual`
pub fn matches(actual: &Value, expected: &Value) -> bool {
    contains(actual, expected)
}

/// Check that `expected` is contained in `actual`, reporting the first mismatch
pub fn check_subset(actual: &Value, expected: &Value) -> Result<(), SubsetMismatch> {
    check_at(actual, expected, ROOT_PATH)
}

fn check_at(actual: &Value, expected: &Value, path: &str) -> Result<(), SubsetMismatch> {
    if actual.is_null() {
        return Err(SubsetMismatch::NullActual {
            path: path.to_string(),
            expected: expected.clone(),
        });
    }

    match expected {
        Value::Object(expected_map) => {
            for (key, expected_value) in expected_map {
                let Some(actual_value) = actual.as_object().and_then(|m| m.get(key)) else {
                    return Err(SubsetMismatch::MissingKey {
                        path: path.to_string(),
                        key: key.clone(),
                        actual: actual.clone(),
                    });
                };
                check_at(actual_value, expected_value, &format!("{path}.{key}"))?;
            }
            Ok(())
        }
        Value::Array(expected_items) => {
            let Some(actual_items) = actual.as_array() else {
                return Err(SubsetMismatch::MissingListItem {
                    path: path.to_string(),
                    item: expected.clone(),
                    actual: actual.clone(),
                });
            };
            for expected_item in expected_items {
                let found = actual_items
                    .iter()
                    .any(|actual_item| contains(actual_item, expected_item));
                if !found {
                    return Err(SubsetMismatch::MissingListItem {
                        path: path.to_string(),
                        item: expected_item.clone(),
                        actual: actual.clone(),
                    });
                }
            }
            Ok(())
        }
        scalar => {
            if scalar == actual || json_strings_equal(actual, scalar) {
                Ok(())
            } else {
                Err(SubsetMismatch::ValueMismatch {
                    path: path.to_string(),
                    expected: scalar.clone(),
                    actual: actual.clone(),
                })
            }
        }
    }
}

/// Same rules as `check_at` without building a mismatch
fn contains(actual: &Value, expected: &Value) -> bool {
    if actual.is_null() {
        return false;
    }

    match expected {
        Value::Object(expected_map) => actual.as_object().is_some_and(|actual_map| {
            expected_map.iter().all(|(key, expected_value)| {
                actual_map
                    .get(key)
                    .is_some_and(|actual_value| contains(actual_value, expected_value))
            })
        }),
        Value::Array(expected_items) => actual.as_array().is_some_and(|actual_items| {
            expected_items.iter().all(|expected_item| {
                actual_items
                    .iter()
                    .any(|actual_item| contains(actual_item, expected_item))
            })
        }),
        scalar => scalar == actual || json_strings_equal(actual, scalar),
    }
}

/// `{"command": "whoami"}` and `{\n  "command": "whoami"\n}` are the same payload
fn json_strings_equal(actual: &Value, expected: &Value) -> bool {
    let (Value::String(actual), Value::String(expected)) = (actual, expected) else {
        return false;
    };
    match (
        serde_json::from_str::<Value>(actual),
        serde_json::from_str::<Value>(expected),
    ) {
        (Ok(actual), Ok(expected)) => actual == expected,
        _ => false,
    }
}

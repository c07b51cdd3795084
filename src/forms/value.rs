use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single collected form input.
///
/// Inputs arrive as text from the view layer; numeric readers parse on demand
/// so a store can hold `"250"` or `250.0` interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    Group(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Reads a number from a numeric value or parseable text.
    pub fn as_number(&self) -> Option<f64> {
        let parsed = match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Text(value) => value.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|value| value.is_finite())
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(value) => Some(*value),
            FieldValue::Text(value) => match value.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" | "true" | "1" => Some(true),
                "n" | "no" | "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Group(entries) => Some(entries),
            _ => None,
        }
    }

    /// Whether the value counts as "provided" for required-field checks.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Group(entries) => entries.is_empty(),
            FieldValue::Number(value) => !value.is_finite(),
            FieldValue::Flag(_) => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Flag(value) => write!(f, "{}", if *value { "yes" } else { "no" }),
            FieldValue::Number(value) => {
                if value.fract().abs() < f64::EPSILON {
                    write!(f, "{:.0}", value)
                } else {
                    write!(f, "{:.2}", value)
                }
            }
            FieldValue::Text(value) => write!(f, "{}", value),
            FieldValue::List(items) => write!(f, "{}", items.join(", ")),
            FieldValue::Group(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(str::to_string).collect())
    }
}

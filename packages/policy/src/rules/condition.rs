use atelier_model::StyleMap;
use serde::{Deserialize, Serialize};

/// Predicate over a node's current style values
///
/// Values are compared trimmed and case-insensitively. An empty value
/// counts as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Condition {
    Always,
    Equals { key: String, value: String },
    NotEquals { key: String, value: String },
    OneOf { key: String, values: Vec<String> },
    NoneOf { key: String, values: Vec<String> },
    Present { key: String },
    Absent { key: String },
    All { conditions: Vec<Condition> },
    Any { conditions: Vec<Condition> },
    Not { condition: Box<Condition> },
}

impl Condition {
    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::Equals {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn one_of<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::OneOf {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn none_of<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::NoneOf {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn absent(key: impl Into<String>) -> Self {
        Condition::Absent { key: key.into() }
    }

    pub fn any(conditions: Vec<Condition>) -> Self {
        Condition::Any { conditions }
    }

    pub fn matches(&self, values: &StyleMap) -> bool {
        match self {
            Condition::Always => true,
            Condition::Equals { key, value } => {
                lookup(values, key).is_some_and(|current| same_value(current, value))
            }
            Condition::NotEquals { key, value } => {
                !lookup(values, key).is_some_and(|current| same_value(current, value))
            }
            Condition::OneOf { key, values: options } => lookup(values, key)
                .is_some_and(|current| options.iter().any(|option| same_value(current, option))),
            Condition::NoneOf { key, values: options } => !lookup(values, key)
                .is_some_and(|current| options.iter().any(|option| same_value(current, option))),
            Condition::Present { key } => lookup(values, key).is_some(),
            Condition::Absent { key } => lookup(values, key).is_none(),
            Condition::All { conditions } => conditions.iter().all(|c| c.matches(values)),
            Condition::Any { conditions } => conditions.iter().any(|c| c.matches(values)),
            Condition::Not { condition } => !condition.matches(values),
        }
    }
}

fn lookup<'a>(values: &'a StyleMap, key: &str) -> Option<&'a str> {
    values
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn same_value(current: &str, expected: &str) -> bool {
    current.eq_ignore_ascii_case(expected.trim())
}

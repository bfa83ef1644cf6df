use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single answer submitted by an end user during a traversal.
///
/// Externally tagged on the wire (`{"number": 7.0}`), so both the JSON and
/// the bincode document codecs can decode it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl ResponseValue {
    /// Numeric view used by score accumulation and ordered comparisons.
    ///
    /// Booleans count as 0/1 and numeric text parses, so an upstream form
    /// that submits `"7"` instead of `7` still scores.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ResponseValue::Number(n) => Some(*n),
            ResponseValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            ResponseValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Loose equality against a declared case value: numeric values compare
    /// numerically, everything else by canonical text, so `Number(2.0)`
    /// matches the case `"2"`.
    pub fn matches_text(&self, case: &str) -> bool {
        match (self.as_number(), case.trim().parse::<f64>()) {
            (Some(answer), Ok(declared)) => answer == declared,
            _ => self.to_string() == case,
        }
    }

    /// Loose equality between two response values, same policy as
    /// [`matches_text`](Self::matches_text).
    pub fn matches(&self, other: &ResponseValue) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for ResponseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseValue::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            ResponseValue::Bool(b) => write!(f, "{}", b),
            ResponseValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for ResponseValue {
    fn from(n: f64) -> Self {
        ResponseValue::Number(n)
    }
}

impl From<bool> for ResponseValue {
    fn from(b: bool) -> Self {
        ResponseValue::Bool(b)
    }
}

impl From<&str> for ResponseValue {
    fn from(s: &str) -> Self {
        ResponseValue::Text(s.to_string())
    }
}

/// The answers one end user has submitted so far, keyed by response key.
///
/// Scoped to a single traversal of a single flow; never shared across users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    answers: AHashMap<String, ResponseValue>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ResponseValue>) {
        self.answers.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ResponseValue> {
        self.answers.get(key)
    }

    /// Numeric view of one answer; `None` when absent or non-numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.answers.get(key).and_then(ResponseValue::as_number)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.answers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<K: Into<String>, V: Into<ResponseValue>> FromIterator<(K, V)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let answers = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { answers }
    }
}

/// One end user's traversal state: a stable visitor identity plus the
/// responses collected so far.
///
/// The visitor identity seeds a-b-test splits, so repeat visits by the same
/// user take the same branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub visitor: String,
    #[serde(default)]
    pub responses: ResponseSet,
}

impl Session {
    pub fn new(visitor: impl Into<String>) -> Self {
        Self {
            visitor: visitor.into(),
            responses: ResponseSet::new(),
        }
    }

    /// Records one answer, replacing any earlier answer under the same key.
    pub fn answer(&mut self, key: impl Into<String>, value: impl Into<ResponseValue>) -> &mut Self {
        self.responses.insert(key, value);
        self
    }
}

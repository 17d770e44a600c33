// SPDX-License-Identifier: MIT

//! Workflow state threaded through the NL2SQL pipeline
//!
//! The state is immutable from a node's point of view: every transition
//! returns a fresh copy with one field changed and all other keys intact.

use chrono::Local;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Nl2SqlError, Result};

/// Keys backed by named fields rather than the extra map
const NAMED_FIELDS: [&str; 5] = [
    "question",
    "candidate_sql",
    "sql_generated_at",
    "execution_result",
    "executed_at",
];

/// Outcome of running the candidate SQL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub ok: bool,
    pub message: String,
    pub row_count: u64,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// State shared by all pipeline nodes
///
/// Serializes to a flat JSON object: named fields and caller-supplied keys
/// sit side by side, and unset fields are omitted. A named key that arrived
/// as `null` is held in `extra` until a transition sets it, so it survives
/// the round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Nl2SqlState {
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidate_sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sql_generated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    execution_result: Option<ExecutionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    executed_at: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Nl2SqlState {
    /// Create a state carrying only the user's question
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            ..Self::default()
        }
    }

    /// Create an empty state
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    pub fn candidate_sql(&self) -> Option<&str> {
        self.candidate_sql.as_deref()
    }

    pub fn sql_generated_at(&self) -> Option<&str> {
        self.sql_generated_at.as_deref()
    }

    pub fn execution_result(&self) -> Option<&ExecutionResult> {
        self.execution_result.as_ref()
    }

    pub fn executed_at(&self) -> Option<&str> {
        self.executed_at.as_deref()
    }

    /// Caller-supplied keys that have no named field, plus named keys given as null
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Copy of this state with a generated query and its timestamp
    pub fn with_candidate_sql(&self, sql: impl Into<String>, at: impl Into<String>) -> Self {
        let mut next = Self {
            candidate_sql: Some(sql.into()),
            sql_generated_at: Some(at.into()),
            ..self.clone()
        };
        next.extra.remove("candidate_sql");
        next.extra.remove("sql_generated_at");
        next
    }

    /// Copy of this state with an execution outcome and its timestamp
    pub fn with_execution_result(&self, result: ExecutionResult, at: impl Into<String>) -> Self {
        let mut next = Self {
            execution_result: Some(result),
            executed_at: Some(at.into()),
            ..self.clone()
        };
        next.extra.remove("execution_result");
        next.extra.remove("executed_at");
        next
    }

    /// Copy of this state with an arbitrary key set
    ///
    /// Named fields are type-checked, so e.g. a numeric `question` is an error.
    pub fn with_value(&self, key: &str, value: Value) -> Result<Self> {
        if NAMED_FIELDS.contains(&key) {
            let mut obj = self.to_json_map();
            obj.insert(key.to_string(), value);
            return Self::from_json(Value::Object(obj));
        }

        let mut next = self.clone();
        next.extra.insert(key.to_string(), value);
        Ok(next)
    }

    /// Look up any key as JSON
    pub fn get(&self, key: &str) -> Option<Value> {
        let named = match key {
            "question" => self.question.clone().map(Value::String),
            "candidate_sql" => self.candidate_sql.clone().map(Value::String),
            "sql_generated_at" => self.sql_generated_at.clone().map(Value::String),
            "executed_at" => self.executed_at.clone().map(Value::String),
            "execution_result" => self
                .execution_result
                .as_ref()
                .and_then(|r| serde_json::to_value(r).ok()),
            _ => None,
        };
        named.or_else(|| self.extra.get(key).cloned())
    }

    /// Get a nested value using dot notation (e.g., "execution_result.ok")
    ///
    /// A key that itself contains dots, such as `generate_sql.error`, is
    /// matched whole before the path is split.
    pub fn get_path(&self, path: &str) -> Option<Value> {
        if let Some(value) = self.get(path) {
            return Some(value);
        }

        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?.clone();
        }
        Some(current)
    }

    /// Parse a state from a JSON object
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Err(Nl2SqlError::other(format!(
                "State must be a JSON object, got: {}",
                other
            ))),
        }
    }

    fn from_map(mut map: Map<String, Value>) -> Result<Self> {
        Ok(Self {
            question: take_field(&mut map, "question")?,
            candidate_sql: take_field(&mut map, "candidate_sql")?,
            sql_generated_at: take_field(&mut map, "sql_generated_at")?,
            execution_result: take_field(&mut map, "execution_result")?,
            executed_at: take_field(&mut map, "executed_at")?,
            extra: map,
        })
    }

    /// Convert state to a flat JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(self.to_json_map())
    }

    fn to_json_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

impl<'de> Deserialize<'de> for Nl2SqlState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_map(map).map_err(de::Error::custom)
    }
}

/// Remove and decode a named field; a null value stays behind in `map`
fn take_field<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &str) -> Result<Option<T>> {
    match map.remove(key) {
        None => Ok(None),
        Some(Value::Null) => {
            map.insert(key.to_string(), Value::Null);
            Ok(None)
        }
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

/// Current local time, formatted for state timestamps
///
/// The fraction is always printed, even when the microseconds are zero.
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

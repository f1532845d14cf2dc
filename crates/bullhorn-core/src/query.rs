// SPDX-FileCopyrightText: 2026 Bullhorn Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured query matching over job views.
//!
//! A query is a JSON object treated as a conjunction of per-field
//! constraints. A constraint whose value is an object of comparison
//! operators (`gte`, `gt`, `lte`, `lt`, `ne`) compares the field; any other
//! object recurses into the named field; scalars and arrays compare by
//! equality. The listing pipeline composes the operator-supplied query with
//! the derived `--time-ago` lower bound as one more conjunct.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::BullhornError;

const OPERATORS: [&str; 5] = ["gte", "gt", "lte", "lt", "ne"];

/// A conjunction of JSON-object clauses, all of which must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    clauses: Vec<Map<String, Value>>,
}

impl Query {
    /// Parses an operator-supplied query string. Empty input and `"{}"`
    /// both yield the match-all query.
    pub fn parse(raw: &str) -> Result<Self, BullhornError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_str(trimmed).map_err(|_| {
            BullhornError::Validation(format!("\"{trimmed}\" is not a valid JSON query"))
        })?;
        match value {
            Value::Object(map) if map.is_empty() => Ok(Self::default()),
            Value::Object(map) => Ok(Self { clauses: vec![map] }),
            _ => Err(BullhornError::Validation(
                "query must be a JSON object".into(),
            )),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Adds a `field >= lower` conjunct, as derived from `--time-ago`.
    pub fn and_at_least(&mut self, field: &str, lower: i64) {
        let mut bound = Map::new();
        bound.insert("gte".to_string(), Value::from(lower));
        let mut clause = Map::new();
        clause.insert(field.to_string(), Value::Object(bound));
        self.clauses.push(clause);
    }

    /// True when the record satisfies every clause.
    pub fn matches(&self, record: &Value) -> bool {
        self.clauses
            .iter()
            .all(|clause| matches_object(record, clause))
    }

    /// Retains the records that match, preserving order.
    pub fn filter<T: Serialize + Clone>(&self, records: &[T]) -> Vec<T> {
        if self.is_empty() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|record| {
                serde_json::to_value(record)
                    .map(|value| self.matches(&value))
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }
}

fn matches_object(record: &Value, constraints: &Map<String, Value>) -> bool {
    constraints.iter().all(|(field, expected)| {
        let actual = record.get(field);
        matches_constraint(actual, expected)
    })
}

fn matches_constraint(actual: Option<&Value>, expected: &Value) -> bool {
    match expected {
        Value::Object(map) if is_operator_object(map) => {
            map.iter().all(|(op, bound)| apply_operator(actual, op, bound))
        }
        Value::Object(map) => match actual {
            Some(value) => matches_object(value, map),
            None => false,
        },
        other => actual == Some(other),
    }
}

fn is_operator_object(map: &Map<String, Value>) -> bool {
    !map.is_empty() && map.keys().all(|key| OPERATORS.contains(&key.as_str()))
}

fn apply_operator(actual: Option<&Value>, op: &str, bound: &Value) -> bool {
    if op == "ne" {
        return actual != Some(bound);
    }
    let Some(actual) = actual else { return false };
    let Some(ordering) = compare(actual, bound) else {
        return false;
    };
    match op {
        "gte" => ordering != Ordering::Less,
        "gt" => ordering == Ordering::Greater,
        "lte" => ordering != Ordering::Greater,
        "lt" => ordering == Ordering::Less,
        _ => false,
    }
}

/// Numbers compare numerically, strings lexically; mixed types do not
/// compare.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.as_str().cmp(y.as_str())),
        _ => None,
    }
}

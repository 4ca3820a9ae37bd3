//! Global game state: a typed key -> value store.
//!
//! Games set an initial template (`Engine::set_state`), mutate the live copy
//! during play, and get the template back on reset. Each key keeps one type
//! for the whole session; the typed accessors return `None` on a type
//! mismatch rather than coercing.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateStore {
    entries: HashMap<String, Value>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key)? {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        match self.entries.get(key)? {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.entries.get(key)? {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            Value::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Add to an integer key (score, lives). Missing keys start at zero.
    pub fn add(&mut self, key: &str, delta: i64) -> i64 {
        let next = self.int(key).unwrap_or(0) + delta;
        self.set(key, next);
        next
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for StateStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = StateStore::new();
        for (k, v) in iter {
            store.set(k, v);
        }
        store
    }
}

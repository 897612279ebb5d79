//! Structured-payload splitting
//!
//! Used when a record line is JSON-shaped data rather than prose: the value
//! is subdivided at its natural element boundaries (object entries, array
//! elements) until every fragment's serialized form fits the configured
//! size. Scalars cannot be subdivided; an oversize scalar is emitted alone.

use serde_json::{Map, Value};

/// Splits JSON values into fragments bounded by serialized size
#[derive(Debug, Clone)]
pub struct JsonSplitter {
    max_chunk_size: usize,
}

impl JsonSplitter {
    pub fn new(max_chunk_size: usize) -> Self {
        Self {
            max_chunk_size: max_chunk_size.max(1),
        }
    }

    /// Splits `value` so that each returned fragment serializes to at most
    /// `max_chunk_size` bytes (best effort for indivisible scalars)
    pub fn split(&self, value: &Value) -> Vec<Value> {
        self.split_with_budget(value, self.max_chunk_size)
    }

    fn split_with_budget(&self, value: &Value, budget: usize) -> Vec<Value> {
        if serialized_len(value) <= budget {
            return vec![value.clone()];
        }

        match value {
            Value::Object(map) => self.split_object(map, budget),
            Value::Array(items) => self.split_array(items, budget),
            // Indivisible; emitted alone even though it exceeds the budget
            _ => vec![value.clone()],
        }
    }

    fn split_object(&self, map: &Map<String, Value>, budget: usize) -> Vec<Value> {
        let mut fragments = Vec::new();
        let mut current = Map::new();

        for (key, value) in map {
            // "key": plus quotes, colon, and braces
            let entry_budget = budget.saturating_sub(key.len() + 6);
            let entry = singleton_object(key, value.clone());

            if serialized_len(&entry) > budget {
                // The single entry is too big on its own: flush what we
                // have, then recurse into its value
                if !current.is_empty() {
                    fragments.push(Value::Object(std::mem::take(&mut current)));
                }
                for piece in self.split_with_budget(value, entry_budget) {
                    fragments.push(singleton_object(key, piece));
                }
                continue;
            }

            let mut candidate = current.clone();
            candidate.insert(key.clone(), value.clone());
            if serialized_len(&Value::Object(candidate.clone())) > budget && !current.is_empty() {
                fragments.push(Value::Object(std::mem::take(&mut current)));
                current.insert(key.clone(), value.clone());
            } else {
                current = candidate;
            }
        }

        if !current.is_empty() {
            fragments.push(Value::Object(current));
        }

        fragments
    }

    fn split_array(&self, items: &[Value], budget: usize) -> Vec<Value> {
        let mut fragments = Vec::new();
        let mut current: Vec<Value> = Vec::new();

        for item in items {
            if serialized_len(item) + 2 > budget {
                if !current.is_empty() {
                    fragments.push(Value::Array(std::mem::take(&mut current)));
                }
                for piece in self.split_with_budget(item, budget.saturating_sub(2)) {
                    fragments.push(Value::Array(vec![piece]));
                }
                continue;
            }

            let mut candidate = current.clone();
            candidate.push(item.clone());
            if serialized_len(&Value::Array(candidate.clone())) > budget && !current.is_empty() {
                fragments.push(Value::Array(std::mem::take(&mut current)));
                current.push(item.clone());
            } else {
                current = candidate;
            }
        }

        if !current.is_empty() {
            fragments.push(Value::Array(current));
        }

        fragments
    }
}

fn singleton_object(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

fn serialized_len(value: &Value) -> usize {
    serde_json::to_string(value).map(|s| s.len()).unwrap_or(0)
}

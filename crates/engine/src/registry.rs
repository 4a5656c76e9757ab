//! The selection registry: parameter name → current normalized value.
//!
//! The registry is owned by exactly one [`crate::form::ParameterForm`] and is
//! written only through that form's reducer path; widgets never read it, and
//! no two widgets share a key, so exclusion is structural rather than locked.
//! Absence of an entry means "this parameter contributes nothing to the
//! query".

use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
pub struct SelectionRegistry {
    entries: IndexMap<String, Vec<String>>,
}

impl SelectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or overwrite the value for a name. Overwrites keep the entry's
    /// original position, so iteration order stays mount order.
    pub fn publish(&mut self, name: &str, value: Vec<String>) {
        match self.entries.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.entries.insert(name.to_string(), value);
            }
        }
    }

    /// Remove a name's entry (widget unmounted or publication suppressed).
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.entries.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    /// Flatten into query pairs: each name repeated once per element of its
    /// value sequence, preserving entry order and intra-value order.
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (name, values) in &self.entries {
            for value in values {
                pairs.push((name.clone(), value.clone()));
            }
        }
        pairs
    }
}

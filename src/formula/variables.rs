//! Named numeric bindings for `[name]` references.

use std::collections::HashMap;

/// Variable bindings.
///
/// Names are case-insensitive: the lexer folds formula text to lower case,
/// so keys are stored and looked up lower-cased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    values: HashMap<String, f64>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, returning the previous value if any.
    pub fn insert(&mut self, name: impl AsRef<str>, value: f64) -> Option<f64> {
        self.values.insert(name.as_ref().to_lowercase(), value)
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl AsRef<str>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(&value) => Some(value),
            None => self.values.get(&name.to_lowercase()).copied(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl<K: AsRef<str>> FromIterator<(K, f64)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        vars.extend(iter);
        vars
    }
}

impl<K: AsRef<str>> Extend<(K, f64)> for Variables {
    fn extend<I: IntoIterator<Item = (K, f64)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<K: AsRef<str>, const N: usize> From<[(K, f64); N]> for Variables {
    fn from(pairs: [(K, f64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

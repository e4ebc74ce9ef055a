use crate::check::Check;
use crate::value::Value;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// ValidatorRegistry
// ---------------------------------------------------------------------------

/// Slot name → check. Read-only once the resolver is built.
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    checks: HashMap<String, Check>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, check: Check) -> Self {
        self.insert(name, check);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, check: Check) {
        self.checks.insert(name.into(), check);
    }

    pub fn get(&self, name: &str) -> Option<&Check> {
        self.checks.get(name)
    }

    /// The check registered for `name`, or `fallback` when there is none.
    pub fn check_for<'a>(&'a self, name: &str, fallback: &'a Check) -> &'a Check {
        self.checks.get(name).unwrap_or(fallback)
    }
}

// ---------------------------------------------------------------------------
// DefaultRegistry
// ---------------------------------------------------------------------------

/// Slot name → fallback value for `(Optional)` slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultRegistry {
    values: HashMap<String, Value>,
}

impl DefaultRegistry {
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

impl From<HashMap<String, Value>> for DefaultRegistry {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

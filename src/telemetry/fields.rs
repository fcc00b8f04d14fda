//! Ordered key/value fields attached to telemetry events.

use std::fmt;

/// Structured fields for a telemetry event.
///
/// Keys come from [`Fields::KEYS`]; values are rendered eagerly. Insertion
/// order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    entries: Vec<(&'static str, String)>,
}

impl Fields {
    /// Every key an event may carry. Sinks emit each as its own field.
    pub const KEYS: [&str; 7] = [
        "hostname",
        "ip",
        "hosts",
        "statusCode",
        "change",
        "hint",
        "error",
    ];

    /// Creates an empty field set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a field.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        debug_assert!(Self::KEYS.contains(&key), "unknown field key {key}");
        self.entries.push((key, value.to_string()));
        self
    }

    /// Returns the first value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Returns true if no field has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

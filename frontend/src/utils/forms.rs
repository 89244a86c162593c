use std::collections::BTreeMap;

/// Field-level validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Records `message` for `field` when `value` is blank.
    pub fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    /// Keeps the first message per field.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.errors {
            self.add(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.values().cloned().collect()
    }

    /// `Ok(value)` when no error was recorded.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

pub fn optional_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_flags_blank_values_once() {
        let mut errors = FieldErrors::new();
        errors.require("name", "   ", "Name is required");
        errors.require("name", "", "Second message");
        errors.require("code", "HR", "Code is required");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert!(!errors.has("code"));
    }

    #[test]
    fn into_result_only_builds_value_when_clean() {
        let clean = FieldErrors::new().into_result(|| 42);
        assert_eq!(clean, Ok(42));

        let mut dirty = FieldErrors::new();
        dirty.add("title", "Title is required");
        let result = dirty.into_result(|| 42);
        assert_eq!(result.unwrap_err().messages(), vec!["Title is required"]);
    }

    #[test]
    fn optional_string_trims_and_drops_blank() {
        assert_eq!(optional_string("  note "), Some("note".to_string()));
        assert_eq!(optional_string("   "), None);
    }
}

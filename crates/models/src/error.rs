//! Error types for the model marshaling layer.

use thiserror::Error;

/// Result type alias for marshaling operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while building or validating a model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Both the wire key and the local name were supplied for one field.
    #[error("Ambiguous input for {model}.{field}: cannot provide both '{wire_key}' and '{local_name}'")]
    AmbiguousInput {
        model: &'static str,
        field: &'static str,
        wire_key: &'static str,
        local_name: &'static str,
    },

    /// A strict enum field was given a value outside its allowed set.
    #[error("Invalid value for '{field}' on {model}: {value:?} must be one of {allowed:?}")]
    InvalidEnumValue {
        model: &'static str,
        field: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },

    /// A present value could not be coerced to the declared type.
    #[error("Type mismatch for {model}.{field}: expected {expected}, found {found}")]
    TypeMismatch {
        model: &'static str,
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    /// A model was given something other than a JSON object.
    #[error("Expected a JSON object for {model}, found {found}")]
    NotAnObject { model: &'static str, found: String },

    /// A model referenced a local name that its schema does not declare.
    #[error("{model} has no field named '{field}'")]
    UnknownField {
        model: &'static str,
        field: &'static str,
    },

    /// JSON text could not be parsed.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// Check if this error was caused by a field supplied under two spellings.
    pub fn is_ambiguous_input(&self) -> bool {
        matches!(self, Self::AmbiguousInput { .. })
    }

    /// Check if this error is a strict enum validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidEnumValue { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = ModelError::AmbiguousInput {
            model: "AccelerationTaskDetails",
            field: "saved_search_id",
            wire_key: "savedSearchId",
            local_name: "saved_search_id",
        };
        assert!(err.is_ambiguous_input());
        assert!(!err.is_validation());

        let err = ModelError::InvalidEnumValue {
            model: "OutOfBoxEntityTypeDetails",
            field: "cloud_type",
            value: "HYBRID".to_string(),
            allowed: vec!["CLOUD", "NON_CLOUD"],
        };
        assert!(err.is_validation());
        assert!(!err.is_ambiguous_input());
    }

    #[test]
    fn test_ambiguous_input_message_names_both_keys() {
        let err = ModelError::AmbiguousInput {
            model: "AccelerationTaskDetails",
            field: "saved_search_id",
            wire_key: "savedSearchId",
            local_name: "saved_search_id",
        };
        let message = err.to_string();
        assert!(message.contains("'savedSearchId'"));
        assert!(message.contains("'saved_search_id'"));
    }

    #[test]
    fn test_invalid_enum_message_lists_allowed_values() {
        let err = ModelError::InvalidEnumValue {
            model: "OutOfBoxEntityTypeDetails",
            field: "cloud_type",
            value: "HYBRID".to_string(),
            allowed: vec!["CLOUD", "NON_CLOUD"],
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'cloud_type' on OutOfBoxEntityTypeDetails: \"HYBRID\" must be one of [\"CLOUD\", \"NON_CLOUD\"]"
        );
    }
}

//! Error types for SHOP attribute conversion.
//!
//! Every conversion fails synchronously with one [`ShopError`] at the point of
//! detection. Nothing is retried and no partial value is returned.

use thiserror::Error;

/// Errors raised by the codec, the marshaller and the engine interface.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Malformed or too-short engine time string, or an unrepresentable timestamp.
    #[error("Format error: {0}")]
    Format(String),

    /// Attribute type tag name is not one of the known kinds.
    #[error("Unsupported attribute type: {0}")]
    UnsupportedType(String),

    /// Parallel sequences disagree in length.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A time offset is not a whole number of time units.
    #[error("Precision error: {0}")]
    Precision(String),

    /// Unknown IANA time zone name.
    #[error("Unknown time zone: {0}")]
    TimeZone(String),

    /// Unknown engine time unit name.
    #[error("Unknown time unit: {0}")]
    TimeUnit(String),

    /// Value handed to a setter does not fit the declared attribute type.
    #[error("Attribute of type {expected} cannot be set from a {found} value")]
    ValueMismatch {
        expected: crate::AttributeTypeTag,
        found: &'static str,
    },

    /// Failure reported by the engine interface.
    #[error("Engine error: {0}")]
    Engine(String),

    /// Facade id outside the engine-owned arrays.
    #[error("Index {index} out of range for {what} (len {len})")]
    Index {
        what: &'static str,
        index: i64,
        len: usize,
    },

    /// Snapshot (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for SHOP operations.
pub type ShopResult<T> = Result<T, ShopError>;

impl ShopError {
    /// Shorthand for a [`ShopError::ShapeMismatch`] between two named sequences.
    pub fn lengths(left: &str, left_len: usize, right: &str, right_len: usize) -> Self {
        ShopError::ShapeMismatch(format!(
            "{left} has {left_len} elements but {right} has {right_len}"
        ))
    }
}

// Engine bindings written with anyhow surface as engine failures.
impl From<anyhow::Error> for ShopError {
    fn from(err: anyhow::Error) -> Self {
        ShopError::Engine(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for ShopError {
    fn from(err: serde_json::Error) -> Self {
        ShopError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShopError::Precision("7.5 minutes".into());
        assert!(err.to_string().contains("Precision error"));
        assert!(err.to_string().contains("7.5 minutes"));
    }

    #[test]
    fn test_lengths_message() {
        let err = ShopError::lengths("x", 2, "y", 3);
        assert!(matches!(err, ShopError::ShapeMismatch(_)));
        assert_eq!(err.to_string(), "Shape mismatch: x has 2 elements but y has 3");
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: ShopError = anyhow::anyhow!("license expired").into();
        assert!(matches!(err, ShopError::Engine(ref m) if m == "license expired"));
    }

    #[test]
    fn test_value_mismatch_display() {
        let err = ShopError::ValueMismatch {
            expected: crate::AttributeTypeTag::Xy,
            found: "string",
        };
        assert_eq!(
            err.to_string(),
            "Attribute of type xy cannot be set from a string value"
        );
    }
}

//! Error types for the DATEX II model crates.
//!
//! All fallible parsing entry points in `datex2-common` and `datex2-energy`
//! return variants of [`DatexError`]. Parsing stops at the first failing
//! field; no partial entity is ever returned alongside an error.

/// Convenience alias used throughout the DATEX II crates.
pub type Result<T> = std::result::Result<T, DatexError>;

/// Errors produced when parsing token values or decoding XML entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatexError {
    /// A token parse was given empty or whitespace-only input.
    #[error("cannot parse empty text as {type_name}")]
    EmptyToken {
        /// Schema name of the enumeration type being parsed.
        type_name: &'static str,
    },

    /// A mandatory child element or attribute was absent.
    #[error("{class}: missing mandatory field {field}")]
    MissingField {
        /// Schema class whose decoder failed.
        class: &'static str,
        /// Schema name of the missing element or attribute.
        field: &'static str,
    },

    /// A present field could not be decoded into its target type.
    #[error("{class}: invalid field {field}: {reason}")]
    InvalidField {
        /// Schema class whose decoder failed.
        class: &'static str,
        /// Schema name of the offending element or attribute.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// A versioned reference carried an unexpected `targetClass` attribute.
    #[error("Invalid target class \"{found}\": expected \"{expected}\"")]
    InvalidTargetClass {
        /// The `targetClass` value required by the reference type.
        expected: &'static str,
        /// The value found in the document.
        found: String,
    },

    /// An `xsi:type` discriminator matched no known concrete subtype.
    #[error("{class}: unknown xsi:type \"{found}\"")]
    UnknownSubtype {
        /// Abstract schema class being dispatched.
        class: &'static str,
        /// The discriminator value found in the document.
        found: String,
    },

    /// The input was not a well-formed XML document.
    #[error("malformed XML document: {reason}")]
    Xml {
        /// Human-readable explanation from the underlying reader.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_empty_token() {
        let err = DatexError::EmptyToken { type_name: "DayEnum" };
        assert_eq!(err.to_string(), "cannot parse empty text as DayEnum");
    }

    #[test]
    fn error_display_missing_field() {
        let err = DatexError::MissingField {
            class: "EnergyRateUpdate",
            field: "lastUpdated",
        };
        assert_eq!(
            err.to_string(),
            "EnergyRateUpdate: missing mandatory field lastUpdated"
        );
    }

    #[test]
    fn error_display_invalid_field() {
        let err = DatexError::InvalidField {
            class: "EnergyPrice",
            field: "value",
            reason: "Invalid decimal: unknown character".into(),
        };
        assert_eq!(
            err.to_string(),
            "EnergyPrice: invalid field value: Invalid decimal: unknown character"
        );
    }

    #[test]
    fn error_display_invalid_target_class() {
        let err = DatexError::InvalidTargetClass {
            expected: "egi:EnergyRate",
            found: "wrong:Type".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid target class \"wrong:Type\": expected \"egi:EnergyRate\""
        );
        assert!(err.to_string().contains("Invalid target class"));
    }

    #[test]
    fn error_display_unknown_subtype() {
        let err = DatexError::UnknownSubtype {
            class: "RefillPointStatus",
            found: "egi:HydrogenRefillPointStatus".into(),
        };
        assert_eq!(
            err.to_string(),
            "RefillPointStatus: unknown xsi:type \"egi:HydrogenRefillPointStatus\""
        );
    }

    #[test]
    fn error_display_xml() {
        let err = DatexError::Xml {
            reason: "unexpected end of file".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed XML document: unexpected end of file"
        );
    }
}

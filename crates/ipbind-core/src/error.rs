//! Error types for IP value binding
//!
//! This module defines all error types used throughout the crate.
//!
//! Every decode failure is terminal for the enclosing call: the adapter
//! performs no retries and no recovery. When a codec is driven through
//! serde (see the `Deserialize` impls on the range types), these errors
//! are surfaced as the deserializer's standard error via
//! `serde::de::Error::custom`.

use crate::codec::{EntityKind, HandledKind, IpValue};
use thiserror::Error;

/// Result type alias for binding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for IP value binding
#[derive(Error, Debug)]
pub enum Error {
    /// Text does not parse as an address, subnet, or range of the
    /// required version. Carries the offending text and the parser's
    /// reason. A wrong-version value at a version-bound field surfaces
    /// here as well, with the version-specific parser's own message.
    #[error("invalid value {text:?}: {reason}")]
    InvalidFormat {
        /// Offending input text
        text: String,
        /// Why the text was rejected
        reason: String,
    },

    /// Object-shaped range input missing a required field
    #[error("missing field {field:?}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Object-shaped range input with a field outside the accepted set
    #[error("unrecognized field {field:?}, expected one of: \"from\", \"to\"")]
    UnrecognizedField {
        /// Name of the offending field
        field: String,
    },

    /// Object-shaped range input with a non-string field value
    #[error("invalid value {value} for field {field:?}, expected a string")]
    InvalidFieldValue {
        /// Name of the offending field
        field: &'static str,
        /// Textual JSON form of the unexpected value (e.g. `null`, `{}`)
        value: String,
    },

    /// Both range endpoints are individually valid addresses, but of
    /// different IP versions
    #[error("incompatible range endpoints {from} and {to}: IP versions differ")]
    IncompatibleEndpoints {
        /// The decoded `from` endpoint
        from: String,
        /// The decoded `to` endpoint
        to: String,
    },

    /// A dynamic codec was handed a value kind outside its handled kind.
    /// This is adapter misuse, not a wire error: typed callers cannot
    /// trigger it.
    #[error("{codec} codec cannot handle {value}")]
    UnsupportedValue {
        /// The codec's handled kind
        codec: HandledKind,
        /// Textual form of the rejected value
        value: String,
    },

    /// Registry lookup for an entity kind with no installed codec
    #[error("no codec registered for {entity} values")]
    Unregistered {
        /// The entity kind that was looked up
        entity: EntityKind,
    },
}

impl Error {
    /// Create an invalid-format error
    pub fn invalid_format(text: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidFormat {
            text: text.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a missing-field error
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create an unrecognized-field error
    pub fn unrecognized_field(field: impl Into<String>) -> Self {
        Self::UnrecognizedField {
            field: field.into(),
        }
    }

    /// Create an invalid-field-value error
    pub fn invalid_field_value(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidFieldValue {
            field,
            value: value.to_string(),
        }
    }

    /// Create an incompatible-endpoints error
    pub fn incompatible_endpoints(from: impl ToString, to: impl ToString) -> Self {
        Self::IncompatibleEndpoints {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Create an unsupported-value error
    pub fn unsupported_value(codec: HandledKind, value: &IpValue) -> Self {
        Self::UnsupportedValue {
            codec,
            value: value.to_string(),
        }
    }

    /// Create an unregistered-codec error
    pub fn unregistered(entity: EntityKind) -> Self {
        Self::Unregistered { entity }
    }
}

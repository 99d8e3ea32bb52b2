//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout the DSG routing stack. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Identifier errors name the offending component and the value or
//!   length that was rejected.
//! - Carton form errors are collected per field so a caller can render
//!   every problem at once.
//! - The conveyability classifier is total and has no error type.
//! - SSCC errors stay a separate type; the CLI reports them through
//!   `anyhow` and the identity constructors return them directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for the DSG routing stack.
#[derive(Error, Debug)]
pub enum DsgError {
    /// One or more carton form fields failed validation.
    #[error("carton validation failed: {}", join_field_errors(.0))]
    CartonValidation(Vec<FieldError>),

    /// Timestamp string is not valid RFC 3339.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The component of an SSCC that an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SsccComponent {
    /// The single extension digit.
    ExtensionDigit,
    /// The GS1 company prefix.
    CompanyPrefix,
    /// The serial reference.
    SerialReference,
    /// The 17-digit base the check digit is computed over.
    Base,
    /// The full 18-digit code.
    Code,
}

impl std::fmt::Display for SsccComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ExtensionDigit => "extension digit",
            Self::CompanyPrefix => "company prefix",
            Self::SerialReference => "serial reference",
            Self::Base => "SSCC base",
            Self::Code => "SSCC",
        };
        f.write_str(s)
    }
}

/// Errors building, parsing, or verifying an SSCC-18.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SsccError {
    /// A component contains characters other than ASCII digits.
    #[error("invalid {component}: \"{value}\" must contain only digits 0-9")]
    InvalidDigit {
        /// Which component was rejected.
        component: SsccComponent,
        /// The rejected input.
        value: String,
    },

    /// A component, or the assembled base, has the wrong number of digits.
    #[error("invalid {component} length: expected {expected} digits, got {actual}")]
    InvalidLength {
        /// Which component was rejected.
        component: SsccComponent,
        /// Required number of digits.
        expected: usize,
        /// Number of digits supplied.
        actual: usize,
    },

    /// The 18th digit does not match the Mod-10 check digit of the first 17.
    #[error("check digit mismatch for {code}: expected {expected}, got {actual}")]
    CheckDigitMismatch {
        /// The code as supplied.
        code: String,
        /// Check digit computed from the first 17 digits.
        expected: u8,
        /// Check digit present in the code.
        actual: u8,
    },
}

/// A form field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Form field name (e.g. `"carton_id"`, `"dimensions.length"`).
    pub field: String,
    /// Human-readable message suitable for display next to the field.
    pub message: String,
}

impl FieldError {
    /// Build a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

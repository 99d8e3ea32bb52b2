//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers in the DSG routing stack.
//!
//! ## Validation
//!
//! The SSCC components ([`ExtensionDigit`], [`CompanyPrefix`],
//! [`SerialReference`]) validate at construction time, so an assembled
//! SSCC base is always exactly 17 digits. UUID-based identifiers
//! ([`CartonRecordId`], [`PalletId`]) are always valid by construction.
//!
//! ## Layout
//!
//! ```text
//!  E  PPPPPPP  SSSSSSSSS  C
//!  1     7         9      1   = 18 digits
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{SsccComponent, SsccError};

/// Number of digits in the GS1 company prefix assigned to this shipper.
pub const COMPANY_PREFIX_LEN: usize = 7;

/// Number of digits in the serial reference, given a 7-digit company prefix.
pub const SERIAL_REFERENCE_LEN: usize = 9;

/// Company prefix used when the caller does not supply one.
pub const DEFAULT_COMPANY_PREFIX: &str = "1234567";

fn require_digits(component: SsccComponent, value: &str) -> Result<(), SsccError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(SsccError::InvalidDigit {
            component,
            value: value.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// SSCC components
// ---------------------------------------------------------------------------

/// The SSCC extension digit (0-9), assigned by the shipper to increase
/// serial capacity. Defaults to `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ExtensionDigit(u8);

impl ExtensionDigit {
    /// Create an extension digit from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`SsccError::InvalidDigit`] if `value` is greater than 9.
    pub fn new(value: u8) -> Result<Self, SsccError> {
        if value > 9 {
            return Err(SsccError::InvalidDigit {
                component: SsccComponent::ExtensionDigit,
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Parse a single-character extension digit.
    ///
    /// # Errors
    ///
    /// [`SsccError::InvalidDigit`] for non-digit input, then
    /// [`SsccError::InvalidLength`] if the input is not exactly one digit.
    pub fn parse(value: &str) -> Result<Self, SsccError> {
        require_digits(SsccComponent::ExtensionDigit, value)?;
        match value.as_bytes() {
            [d] => Ok(Self(d - b'0')),
            _ => Err(SsccError::InvalidLength {
                component: SsccComponent::ExtensionDigit,
                expected: 1,
                actual: value.len(),
            }),
        }
    }

    /// The digit value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ExtensionDigit {
    type Error = SsccError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExtensionDigit> for u8 {
    fn from(d: ExtensionDigit) -> Self {
        d.0
    }
}

impl std::fmt::Display for ExtensionDigit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// GS1 company prefix: the fixed identity of the shipping entity.
///
/// # Validation
///
/// - Must be exactly 7 digits (0-9)
/// - Leading zeros are significant (e.g., "0012345" is valid)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompanyPrefix(String);

impl CompanyPrefix {
    /// Create a company prefix, validating the 7-digit format.
    ///
    /// # Errors
    ///
    /// [`SsccError::InvalidDigit`] for non-digit input, then
    /// [`SsccError::InvalidLength`] if the string is not 7 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, SsccError> {
        let s = value.into();
        require_digits(SsccComponent::CompanyPrefix, &s)?;
        if s.len() != COMPANY_PREFIX_LEN {
            return Err(SsccError::InvalidLength {
                component: SsccComponent::CompanyPrefix,
                expected: COMPANY_PREFIX_LEN,
                actual: s.len(),
            });
        }
        Ok(Self(s))
    }

    /// Access the prefix string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CompanyPrefix {
    fn default() -> Self {
        Self(DEFAULT_COMPANY_PREFIX.to_string())
    }
}

impl TryFrom<String> for CompanyPrefix {
    type Error = SsccError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompanyPrefix> for String {
    fn from(p: CompanyPrefix) -> Self {
        p.0
    }
}

impl std::fmt::Display for CompanyPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The serial reference: 9 digits, unique per container for a given prefix.
///
/// Shorter numeric input is left-padded with zeros. Longer input is
/// rejected rather than truncated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerialReference(String);

impl SerialReference {
    /// Largest serial reference that fits in 9 digits.
    pub const MAX: u64 = 999_999_999;

    /// Create a serial reference from a digit string, zero-padding to 9.
    ///
    /// # Errors
    ///
    /// [`SsccError::InvalidDigit`] for non-digit input;
    /// [`SsccError::InvalidLength`] for empty input or more than 9 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, SsccError> {
        let s = value.into();
        require_digits(SsccComponent::SerialReference, &s)?;
        if s.is_empty() || s.len() > SERIAL_REFERENCE_LEN {
            return Err(SsccError::InvalidLength {
                component: SsccComponent::SerialReference,
                expected: SERIAL_REFERENCE_LEN,
                actual: s.len(),
            });
        }
        Ok(Self(format!("{s:0>width$}", width = SERIAL_REFERENCE_LEN)))
    }

    /// Create a serial reference from a number, zero-padding to 9 digits.
    ///
    /// # Errors
    ///
    /// [`SsccError::InvalidLength`] if the number exceeds [`Self::MAX`].
    pub fn from_number(n: u64) -> Result<Self, SsccError> {
        if n > Self::MAX {
            return Err(SsccError::InvalidLength {
                component: SsccComponent::SerialReference,
                expected: SERIAL_REFERENCE_LEN,
                actual: n.to_string().len(),
            });
        }
        Ok(Self(format!("{n:0>width$}", width = SERIAL_REFERENCE_LEN)))
    }

    /// Build from any number, reducing it modulo 10^9.
    pub(crate) fn wrapping(n: u64) -> Self {
        let n = n % (Self::MAX + 1);
        Self(format!("{n:0>width$}", width = SERIAL_REFERENCE_LEN))
    }

    /// Access the 9-digit serial string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SerialReference {
    type Error = SsccError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SerialReference> for String {
    fn from(s: SerialReference) -> Self {
        s.0
    }
}

impl std::fmt::Display for SerialReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// UUID-based record identifiers
// ---------------------------------------------------------------------------

/// Internal identifier of a registered carton record.
///
/// Distinct from the user-entered carton ID and from the SSCC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartonRecordId(Uuid);

impl CartonRecordId {
    /// Create a new random carton record identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CartonRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CartonRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "carton:{}", self.0)
    }
}

/// Identifier of an assembled pallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PalletId(Uuid);

impl PalletId {
    /// Create a new random pallet identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PalletId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PalletId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pallet:{}", self.0)
    }
}

//! # Label Configuration
//!
//! Shipper identity used when generating SSCCs. Loaded by the CLI from a
//! YAML file; every field is optional and falls back to the defaults.
//!
//! ```yaml
//! company_prefix: "0614141"
//! extension_digit: 1
//! ```
//!
//! Fields are validated on deserialization, so a loaded `LabelConfig`
//! always describes a well-formed SSCC prefix.

use serde::{Deserialize, Serialize};

use crate::error::SsccError;
use crate::identity::{CompanyPrefix, ExtensionDigit};

/// Shipper identity for SSCC generation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    /// GS1 company prefix (7 digits).
    pub company_prefix: CompanyPrefix,
    /// SSCC extension digit (0-9).
    pub extension_digit: ExtensionDigit,
}

impl LabelConfig {
    /// Apply command-line overrides on top of this configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error of the first malformed override.
    pub fn with_overrides(
        mut self,
        extension_digit: Option<&str>,
        company_prefix: Option<&str>,
    ) -> Result<Self, SsccError> {
        if let Some(ext) = extension_digit {
            self.extension_digit = ExtensionDigit::parse(ext)?;
        }
        if let Some(prefix) = company_prefix {
            self.company_prefix = CompanyPrefix::new(prefix)?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = LabelConfig::default();
        assert_eq!(cfg.company_prefix.as_str(), "1234567");
        assert_eq!(cfg.extension_digit.value(), 0);
    }

    #[test]
    fn partial_document_uses_defaults() {
        let cfg: LabelConfig = serde_json::from_str(r#"{"extension_digit": 4}"#).unwrap();
        assert_eq!(cfg.extension_digit.value(), 4);
        assert_eq!(cfg.company_prefix, CompanyPrefix::default());
    }

    #[test]
    fn invalid_fields_rejected() {
        assert!(serde_json::from_str::<LabelConfig>(r#"{"company_prefix": "12"}"#).is_err());
        assert!(serde_json::from_str::<LabelConfig>(r#"{"extension_digit": 11}"#).is_err());
        assert!(serde_json::from_str::<LabelConfig>(r#"{"prefix": "1234567"}"#).is_err());
    }

    #[test]
    fn overrides_replace_values() {
        let cfg = LabelConfig::default()
            .with_overrides(Some("9"), Some("0614141"))
            .unwrap();
        assert_eq!(cfg.extension_digit.value(), 9);
        assert_eq!(cfg.company_prefix.as_str(), "0614141");

        assert!(LabelConfig::default().with_overrides(Some("x"), None).is_err());
    }
}

//! # Configuration Loading
//!
//! Reads the optional `--config` YAML file into a [`LabelConfig`]. Without a
//! file the stack defaults apply.

use std::path::Path;

use anyhow::{Context, Result};

use dsg_core::LabelConfig;

/// Load the label configuration from `path`, or defaults when `None`.
pub fn load_label_config(path: Option<&Path>) -> Result<LabelConfig> {
    let Some(path) = path else {
        tracing::debug!("no config file given; using default label configuration");
        return Ok(LabelConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: LabelConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        company_prefix = %config.company_prefix,
        extension_digit = config.extension_digit.value(),
        "loaded label configuration"
    );
    Ok(config)
}

/// Load the configuration and apply command-line overrides.
pub fn resolve_label_config(
    path: Option<&Path>,
    extension_digit: Option<&str>,
    company_prefix: Option<&str>,
) -> Result<LabelConfig> {
    let config = load_label_config(path)?;
    config
        .with_overrides(extension_digit, company_prefix)
        .context("invalid label override")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsg_core::{CompanyPrefix, ExtensionDigit};

    #[test]
    fn missing_path_gives_defaults() {
        let config = load_label_config(None).unwrap();
        assert_eq!(config, LabelConfig::default());
    }

    #[test]
    fn loads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label.yaml");
        std::fs::write(&path, "company_prefix: \"0614141\"\nextension_digit: 1\n").unwrap();

        let config = load_label_config(Some(&path)).unwrap();
        assert_eq!(config.company_prefix, CompanyPrefix::new("0614141").unwrap());
        assert_eq!(config.extension_digit, ExtensionDigit::new(1).unwrap());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label.yaml");
        std::fs::write(&path, "extension_digit: 3\n").unwrap();

        let config = load_label_config(Some(&path)).unwrap();
        assert_eq!(config.company_prefix, CompanyPrefix::default());
        assert_eq!(config.extension_digit.value(), 3);
    }

    #[test]
    fn malformed_prefix_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label.yaml");
        std::fs::write(&path, "company_prefix: \"12AB567\"\n").unwrap();
        assert!(load_label_config(Some(&path)).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_label_config(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }

    #[test]
    fn overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label.yaml");
        std::fs::write(&path, "company_prefix: \"0614141\"\n").unwrap();

        let config = resolve_label_config(Some(&path), Some("9"), Some("7654321")).unwrap();
        assert_eq!(config.company_prefix.as_str(), "7654321");
        assert_eq!(config.extension_digit.value(), 9);
    }

    #[test]
    fn bad_override_is_an_error() {
        assert!(resolve_label_config(None, Some("12"), None).is_err());
    }
}

//! Runtime configuration for contract validation.
//!
//! Validation is a development aid: it runs in development and test builds
//! and is a passthrough in production. Two environment variables override the
//! compiled default:
//!
//! - `API_CONTRACTS_MODE`: `development`, `test` or `production`
//! - `API_CONTRACTS_DISABLE`: `1`, `true` or `yes` turns validation off in
//!   every mode

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable selecting the build mode.
pub const MODE_VAR: &str = "API_CONTRACTS_MODE";

/// Environment variable disabling validation.
pub const DISABLE_VAR: &str = "API_CONTRACTS_DISABLE";

/// Kind of build the validator runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Local development; violations are raised
    Development,
    /// Automated tests; violations are raised
    Test,
    /// Shipped build; validation is skipped
    Production,
}

impl BuildMode {
    /// Mode implied by the compilation profile.
    pub fn from_profile() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    /// Parses a mode name, case-insensitively. `dev` and `prod` are accepted.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(BuildMode::Development),
            "test" => Some(BuildMode::Test),
            "production" | "prod" => Some(BuildMode::Production),
            _ => None,
        }
    }

    /// Returns the lowercase mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Test => "test",
            BuildMode::Production => "production",
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether and how validation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Build mode
    pub mode: BuildMode,
    /// Explicit off switch, honored in every mode
    pub disabled: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            mode: BuildMode::from_profile(),
            disabled: false,
        }
    }
}

impl ValidatorConfig {
    /// Validation on, development mode.
    pub fn development() -> Self {
        Self {
            mode: BuildMode::Development,
            disabled: false,
        }
    }

    /// Validation on, test mode.
    pub fn test() -> Self {
        Self {
            mode: BuildMode::Test,
            disabled: false,
        }
    }

    /// Production mode; validation is skipped.
    pub fn production() -> Self {
        Self {
            mode: BuildMode::Production,
            disabled: false,
        }
    }

    /// Sets the off switch.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Resolves the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Resolves the configuration from an arbitrary variable lookup.
    ///
    /// An unrecognized mode value is logged and the compiled default is kept.
    ///
    /// # Example
    ///
    /// ```rust
    /// use api_contracts_validator::{BuildMode, ValidatorConfig};
    ///
    /// let config = ValidatorConfig::from_vars(|name| match name {
    ///     "API_CONTRACTS_MODE" => Some("production".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.mode, BuildMode::Production);
    /// assert!(!config.is_active());
    /// ```
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(MODE_VAR) {
            match BuildMode::parse(&value) {
                Some(mode) => config.mode = mode,
                None => warn!(
                    variable = MODE_VAR,
                    value = %value,
                    default = %config.mode,
                    "unrecognized build mode, keeping default"
                ),
            }
        }

        if let Some(value) = lookup(DISABLE_VAR) {
            config.disabled = matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }

        config
    }

    /// Returns true if payloads should be validated.
    pub fn is_active(&self) -> bool {
        !self.disabled && self.mode != BuildMode::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_follows_profile() {
        let config = ValidatorConfig::from_vars(lookup(&[]));
        assert_eq!(config.mode, BuildMode::from_profile());
        assert!(!config.disabled);
        assert_eq!(config.is_active(), cfg!(debug_assertions));
    }

    #[test]
    fn test_mode_override() {
        let config = ValidatorConfig::from_vars(lookup(&[(MODE_VAR, "TEST")]));
        assert_eq!(config.mode, BuildMode::Test);
        assert!(config.is_active());

        let config = ValidatorConfig::from_vars(lookup(&[(MODE_VAR, "prod")]));
        assert_eq!(config.mode, BuildMode::Production);
        assert!(!config.is_active());
    }

    #[test]
    fn test_unknown_mode_keeps_default() {
        let config = ValidatorConfig::from_vars(lookup(&[(MODE_VAR, "staging")]));
        assert_eq!(config.mode, BuildMode::from_profile());
    }

    #[test]
    fn test_disable_flag_wins_in_every_mode() {
        for mode in ["development", "test", "production"] {
            let config =
                ValidatorConfig::from_vars(lookup(&[(MODE_VAR, mode), (DISABLE_VAR, "Yes")]));
            assert!(config.disabled);
            assert!(!config.is_active(), "active in {mode}");
        }
    }

    #[test]
    fn test_disable_flag_values() {
        for (value, disabled) in [("1", true), ("true", true), ("0", false), ("no", false)] {
            let config = ValidatorConfig::from_vars(lookup(&[(DISABLE_VAR, value)]));
            assert_eq!(config.disabled, disabled, "{DISABLE_VAR}={value}");
        }
    }

    #[test]
    fn test_presets() {
        assert!(ValidatorConfig::development().is_active());
        assert!(ValidatorConfig::test().is_active());
        assert!(!ValidatorConfig::production().is_active());
        assert!(!ValidatorConfig::development().with_disabled(true).is_active());
    }
}

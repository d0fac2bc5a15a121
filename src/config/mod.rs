//! Build configuration files
//!
//! A build writes one YAML file per (API, build name) under the builds directory:
//! `<builds>/<api>/<build-name>.yaml`. The `configure` subcommand loads that file, asks for
//! provider settings, and writes it back.

pub mod configure;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::defaults::{BUILDS_DIR_ENV, BUILDS_DIR_RELATIVE};
use crate::error::{Error, ErrorContext};
use crate::Result;

pub use configure::{configure_stack_provider, PromptConfigurator, ProviderConfigurator};

/// Stack APIs that can be built and configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackApi {
    Inference,
    Safety,
    AgenticSystem,
    Memory,
}

impl StackApi {
    pub const ALL: [StackApi; 4] = [
        StackApi::Inference,
        StackApi::Safety,
        StackApi::AgenticSystem,
        StackApi::Memory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StackApi::Inference => "inference",
            StackApi::Safety => "safety",
            StackApi::AgenticSystem => "agentic_system",
            StackApi::Memory => "memory",
        }
    }

    /// Comma-separated list of accepted names, for usage messages.
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for StackApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StackApi {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                Error::validation_with_context(
                    format!("unknown stack API '{}'", s),
                    ErrorContext::new()
                        .with_field_path("api")
                        .with_details(format!("one of: {}", Self::allowed())),
                )
            })
    }
}

/// Provider selected for one API, with its provider-specific settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider_id: String,
    #[serde(default)]
    pub config: serde_yaml::Value,
}

/// Contents of a build configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageConfig {
    pub built_at: String,
    pub package_name: String,
    #[serde(default)]
    pub docker_image: Option<String>,
    #[serde(default)]
    pub conda_env: Option<String>,
    /// API name -> provider
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
    /// Keys this version does not know about, kept so that a rewrite does not drop them.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl PackageConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            Error::configuration_with_context(
                format!("failed to parse build config: {}", e),
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("package_config"),
            )
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

/// Root directory holding build configurations.
///
/// `LLAMA_STACK_BUILDS_DIR` wins when set; otherwise `$HOME/.llama/builds`.
pub fn builds_base_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(BUILDS_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var_os("HOME").filter(|h| !h.is_empty()).ok_or_else(|| {
        Error::configuration_with_context(
            "cannot resolve the builds directory",
            ErrorContext::new().with_details(format!("set HOME or {}", BUILDS_DIR_ENV)),
        )
    })?;
    Ok(PathBuf::from(home).join(BUILDS_DIR_RELATIVE))
}

/// Path of the config file for `build_name`; `.yaml` is appended when missing.
pub fn build_config_path(base: &Path, api: StackApi, build_name: &str) -> PathBuf {
    let file_name = if build_name.ends_with(".yaml") {
        build_name.to_string()
    } else {
        format!("{}.yaml", build_name)
    };
    base.join(api.as_str()).join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
built_at: '2024-08-01T12:00:00'
package_name: local-nim
docker_image: null
conda_env: local-nim
providers:
  inference:
    provider_id: remote::nvidia
    config:
      url: https://integrate.api.nvidia.com
      timeout: 60
distribution_spec: custom
"#;

    #[test]
    fn test_stack_api_parse() {
        assert_eq!("agentic_system".parse::<StackApi>().unwrap(), StackApi::AgenticSystem);
        let err = "telemetry".parse::<StackApi>().unwrap_err();
        assert!(err.to_string().contains("inference, safety, agentic_system, memory"));
    }

    #[test]
    fn test_build_config_path_appends_extension() {
        let base = Path::new("/builds");
        assert_eq!(
            build_config_path(base, StackApi::Inference, "local"),
            PathBuf::from("/builds/inference/local.yaml")
        );
        assert_eq!(
            build_config_path(base, StackApi::Memory, "local.yaml"),
            PathBuf::from("/builds/memory/local.yaml")
        );
    }

    #[test]
    fn test_package_config_keeps_unknown_keys() {
        let cfg: PackageConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(cfg.package_name, "local-nim");
        assert_eq!(cfg.providers["inference"].provider_id, "remote::nvidia");
        assert_eq!(
            cfg.extra.get("distribution_spec"),
            Some(&serde_yaml::Value::String("custom".into()))
        );

        let round: PackageConfig =
            serde_yaml::from_str(&serde_yaml::to_string(&cfg).unwrap()).unwrap();
        assert_eq!(round, cfg);
    }
}

//! Interactive provider configuration for build config files

use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{debug, info};

use super::{PackageConfig, ProviderConfig};
use crate::Result;

/// Fills in provider-specific settings for every API of a build.
pub trait ProviderConfigurator {
    fn configure_providers(
        &mut self,
        providers: BTreeMap<String, ProviderConfig>,
    ) -> Result<BTreeMap<String, ProviderConfig>>;
}

/// Prompts for each provider setting on `output` and reads answers from `input`.
///
/// An empty answer (or end of input) keeps the current value. Answers are parsed as YAML
/// scalars, so `60` stays a number and `true` a boolean.
pub struct PromptConfigurator<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfigurator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn prompt(&mut self, label: &str, current: &serde_yaml::Value) -> Result<Option<serde_yaml::Value>> {
        write!(self.output, "{} (default: {}): ", label, display_value(current))?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            serde_yaml::from_str(answer)
                .unwrap_or_else(|_| serde_yaml::Value::String(answer.to_string())),
        ))
    }
}

impl<R: BufRead, W: Write> ProviderConfigurator for PromptConfigurator<R, W> {
    fn configure_providers(
        &mut self,
        mut providers: BTreeMap<String, ProviderConfig>,
    ) -> Result<BTreeMap<String, ProviderConfig>> {
        for (api, provider) in providers.iter_mut() {
            writeln!(
                self.output,
                "Configuring API `{}` (provider: {})",
                api, provider.provider_id
            )?;

            let serde_yaml::Value::Mapping(settings) = &mut provider.config else {
                debug!(api = %api, "provider has no settings to configure");
                continue;
            };

            for (key, value) in settings.iter_mut() {
                let label = format!("{}.{}", api, display_value(key));
                if let Some(answer) = self.prompt(&label, value)? {
                    *value = answer;
                }
            }
        }
        Ok(providers)
    }
}

fn display_value(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Load `config_file`, run `configurator` over its providers and write the result back.
pub fn configure_stack_provider(
    config_file: &Path,
    configurator: &mut dyn ProviderConfigurator,
) -> Result<PackageConfig> {
    let mut config = PackageConfig::load(config_file)?;

    let providers = std::mem::take(&mut config.providers);
    config.providers = configurator.configure_providers(providers)?;

    config.save(config_file)?;
    info!(path = %config_file.display(), "build configuration written");
    Ok(config)
}

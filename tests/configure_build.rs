use std::collections::BTreeMap;
use std::io::Cursor;

use stack_nvidia_adapter::config::{
    build_config_path, configure_stack_provider, PackageConfig, PromptConfigurator,
    ProviderConfig, ProviderConfigurator, StackApi,
};

const BUILD_YAML: &str = r#"built_at: '2024-08-01T12:00:00.000000'
package_name: local-nim
docker_image: null
conda_env: local-nim
providers:
  inference:
    provider_id: remote::nvidia
    config:
      url: http://localhost:8000
      timeout: 60
"#;

fn write_build(dir: &std::path::Path) -> std::path::PathBuf {
    let path = build_config_path(dir, StackApi::Inference, "local-nim");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, BUILD_YAML).unwrap();
    path
}

#[test]
fn test_configure_rewrites_file_with_answers() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_build(dir.path());

    let mut configurator =
        PromptConfigurator::new(Cursor::new("https://integrate.api.nvidia.com\n\n"), Vec::new());
    let written = configure_stack_provider(&path, &mut configurator).unwrap();

    let reloaded = PackageConfig::load(&path).unwrap();
    assert_eq!(reloaded, written);
    assert_eq!(reloaded.package_name, "local-nim");
    assert_eq!(reloaded.conda_env.as_deref(), Some("local-nim"));

    let cfg = &reloaded.providers["inference"].config;
    assert_eq!(cfg["url"].as_str(), Some("https://integrate.api.nvidia.com"));
    assert_eq!(cfg["timeout"].as_u64(), Some(60));

    // struct field order is kept on rewrite
    let text = std::fs::read_to_string(&path).unwrap();
    let built_at = text.find("built_at").unwrap();
    let providers = text.find("providers").unwrap();
    assert!(built_at < providers);
}

struct SwapProvider;

impl ProviderConfigurator for SwapProvider {
    fn configure_providers(
        &mut self,
        mut providers: BTreeMap<String, ProviderConfig>,
    ) -> stack_nvidia_adapter::Result<BTreeMap<String, ProviderConfig>> {
        providers.insert(
            "safety".to_string(),
            ProviderConfig {
                provider_id: "meta-reference".into(),
                config: serde_yaml::Value::Null,
            },
        );
        Ok(providers)
    }
}

#[test]
fn test_configure_accepts_custom_configurator() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_build(dir.path());

    configure_stack_provider(&path, &mut SwapProvider).unwrap();

    let reloaded = PackageConfig::load(&path).unwrap();
    assert_eq!(reloaded.providers.len(), 2);
    assert_eq!(reloaded.providers["safety"].provider_id, "meta-reference");
}

#[test]
fn test_configure_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = build_config_path(dir.path(), StackApi::Memory, "absent");
    let err = configure_stack_provider(&path, &mut SwapProvider).unwrap_err();
    assert!(matches!(err, stack_nvidia_adapter::Error::Io(_)));
}

#[test]
fn test_invalid_yaml_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "package_name: [unterminated").unwrap();
    let err = PackageConfig::load(&path).unwrap_err();
    assert!(matches!(err, stack_nvidia_adapter::Error::Configuration { .. }));
}

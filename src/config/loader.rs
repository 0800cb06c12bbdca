use super::types::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use secrecy::SecretString;
use std::path::{Path, PathBuf};

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    load_env: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            config_file: None,
            load_env: false,
        }
    }

    /// Load configuration from file
    pub fn load_from_file(mut self, path: Option<&Path>) -> Self {
        self.config_file = path.map(Path::to_path_buf);
        self
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<AppConfig> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        if let Some(config_path) = &self.config_file {
            builder = builder.add_source(File::from(config_path.as_path()).required(true));
        } else {
            builder = builder
                .add_source(File::with_name("seo-content").required(false))
                .add_source(File::with_name("config/seo-content").required(false));
        }

        // SEO_LLM__API_KEY, SEO_SERVER__BIND_ADDR, ...
        if self.load_env {
            builder = builder.add_source(
                Environment::with_prefix("SEO")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        let mut config: AppConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        if self.load_env {
            apply_env_overrides(&mut config, |name| std::env::var(name).ok());
        }

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the plain deployment variables on top of layered configuration.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup("OPENAI_API_KEY") {
        config.llm.api_key = Some(SecretString::new(key.into_boxed_str()));
    }
    if let Some(id) = lookup("GOOGLE_SHEET_ID") {
        config.audit.spreadsheet_id = Some(id);
    }
    if let Some(path) = lookup("GOOGLE_SERVICE_ACCOUNT_PATH") {
        config.audit.service_account_path = Some(PathBuf::from(path));
    }
    if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
        config.server.bind_addr = format!("0.0.0.0:{}", port);
    }
}

/// Renders a commented sample configuration file.
pub fn sample_config() -> Result<String> {
    let toml_content =
        toml::to_string_pretty(&AppConfig::default()).context("Failed to render sample config")?;

    Ok(format!(
        r#"# seo-content configuration
#
# Save as seo-content.toml. Every value can be overridden with SEO_ prefixed
# environment variables, e.g. SEO_SERVER__BIND_ADDR=0.0.0.0:4000.
# OPENAI_API_KEY, GOOGLE_SHEET_ID, GOOGLE_SERVICE_ACCOUNT_PATH and PORT are
# also honoured.

{}
# [llm]
# api_key = unset or "mock" runs the completion client in mock mode
#
# [audit]
# spreadsheet_id = unset disables the audit spreadsheet
# service_account_path = path to the service-account JSON key
"#,
        toml_content
    ))
}

/// Writes [`sample_config`] to `path`.
pub fn write_sample_config(path: &Path) -> Result<()> {
    std::fs::write(path, sample_config()?)
        .with_context(|| format!("Failed to write {}", path.display()))
}

//! 格式化配置加载

use config::{Config, Environment, File};
use format_common::{ConfigError, FormattingSettings};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// 默认环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "ADSP";

/// 配置加载器
///
/// 依次合并配置文件（按扩展名识别 TOML/JSON/YAML）与环境变量，
/// 环境变量形如 `ADSP_FORMATTING__DEFAULT_LOCALE=de_DE`。
/// 缺少 `formatting` 节时使用默认配置。
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
    env_prefix: Option<String>,
    env_source: Option<config::Map<String, String>>,
}

impl SettingsLoader {
    /// 只读取 `ADSP_` 前缀的环境变量
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: Some(DEFAULT_ENV_PREFIX.to_string()),
            env_source: None,
        }
    }

    /// 指定配置文件，文件必须存在
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// 更换环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// 不读取环境变量
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// 用给定的变量表代替进程环境
    pub fn with_env_source(mut self, variables: config::Map<String, String>) -> Self {
        self.env_source = Some(variables);
        self
    }

    /// 加载并验证配置
    pub fn load(&self) -> Result<FormattingSettings, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载配置文件: {}", path.display());
            builder = builder.add_source(File::from(path.as_path()));
        }

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(self.env_source.clone()),
            );
        }

        let config = builder.build().map_err(|e| {
            error!("配置构建失败: {}", e);
            ConfigError::ParseError { source: Box::new(e) }
        })?;

        let settings = match config.get::<FormattingSettings>(FormattingSettings::SECTION) {
            Ok(settings) => settings,
            Err(config::ConfigError::NotFound(_)) => {
                debug!("未找到配置节 {}，使用默认配置", FormattingSettings::SECTION);
                FormattingSettings::default()
            }
            Err(e) => {
                error!("配置绑定失败: path={}, error={}", FormattingSettings::SECTION, e);
                return Err(ConfigError::ParseError { source: Box::new(e) });
            }
        };

        settings.validate()?;
        info!("格式化配置已加载: 默认区域 {}", settings.default_locale);
        Ok(settings)
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use format_common::Locale;
    use std::fs;

    fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = SettingsLoader::new().without_env().load().unwrap();
        assert_eq!(settings, FormattingSettings::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formatting.toml");
        fs::write(
            &path,
            "[formatting]\ndefault_locale = \"de_DE\"\nallow_overrides = false\n",
        )
        .unwrap();

        let settings = SettingsLoader::new().without_env().with_file(&path).load().unwrap();
        assert_eq!(settings.default_locale, Locale::GERMANY);
        assert!(!settings.allow_overrides);
        assert!(settings.use_global_defaults);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formatting.json");
        fs::write(&path, r#"{"formatting": {"default_locale": "en_GB"}}"#).unwrap();

        let settings = SettingsLoader::new()
            .with_file(&path)
            .with_env_source(env(&[
                ("ADSP_FORMATTING__DEFAULT_LOCALE", "fr_FR"),
                ("ADSP_FORMATTING__LENIENT_PARSING", "true"),
            ]))
            .load()
            .unwrap();
        assert_eq!(settings.default_locale, Locale::FRANCE);
        assert!(settings.lenient_parsing);
    }

    #[test]
    fn test_missing_file() {
        let error = SettingsLoader::new()
            .without_env()
            .with_file("/nonexistent/formatting.toml")
            .load()
            .unwrap_err();
        assert!(matches!(error, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formatting.toml");

        fs::write(&path, "[formatting]\ndefault_locale = \"\"\n").unwrap();
        let error = SettingsLoader::new().without_env().with_file(&path).load().unwrap_err();
        assert!(matches!(error, ConfigError::ValidationError { .. }));

        fs::write(&path, "[formatting]\ndefault_locale = \"not a locale\"\n").unwrap();
        let error = SettingsLoader::new().without_env().with_file(&path).load().unwrap_err();
        assert!(matches!(error, ConfigError::ParseError { .. }));
    }
}

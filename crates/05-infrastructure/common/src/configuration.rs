//! 配置相关的基础接口定义

use crate::errors::ConfigError;
use crate::locale::Locale;
use serde::{Deserialize, Serialize};

/// 可配置组件 trait
///
/// 需要配置的组件必须实现此 trait
pub trait Configurable: Send + Sync {
    /// 配置类型
    type Config: for<'de> Deserialize<'de> + Serialize + Clone + Send + Sync + 'static;

    /// 应用配置
    fn configure(&mut self, config: Self::Config) -> Result<(), ConfigError>;

    /// 获取配置路径
    fn get_config_path() -> &'static str;
}

/// 格式化注册表配置
///
/// 对应配置节 `formatting`，例如：
///
/// ```toml
/// [formatting]
/// default_locale = "en_US"
/// allow_overrides = true
/// use_global_defaults = true
/// lenient_parsing = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingSettings {
    /// 未显式指定区域时使用的区域设置
    pub default_locale: Locale,
    /// 同一类型/注解重复注册时是否允许覆盖
    pub allow_overrides: bool,
    /// 是否查询全局默认格式化器目录
    pub use_global_defaults: bool,
    /// 内置格式化器是否宽松解析
    pub lenient_parsing: bool,
}

impl FormattingSettings {
    /// 配置节路径
    pub const SECTION: &'static str = "formatting";

    /// 验证配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_locale.language().is_empty() {
            return Err(ConfigError::validation("default_locale 不能为根区域"));
        }
        Ok(())
    }
}

impl Default for FormattingSettings {
    fn default() -> Self {
        Self {
            default_locale: Locale::US,
            allow_overrides: true,
            use_global_defaults: true,
            lenient_parsing: false,
        }
    }
}

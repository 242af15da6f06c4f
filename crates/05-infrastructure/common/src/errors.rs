//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// 文本解析错误
///
/// 格式化器在无法把本地化文本还原为目标类型时返回此错误，
/// `offset` 指向首个无法识别的字符位置（按字符计）。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("无法解析 \"{input}\": {message} (位置 {offset})")]
pub struct ParseError {
    /// 原始输入
    pub input: String,
    /// 错误描述
    pub message: String,
    /// 出错位置
    pub offset: usize,
}

impl ParseError {
    /// 创建新的解析错误
    pub fn new(input: impl Into<String>, message: impl Into<String>, offset: usize) -> Self {
        Self {
            input: input.into(),
            message: message.into(),
            offset,
        }
    }

    /// 输入为空
    pub fn empty(input: impl Into<String>) -> Self {
        Self::new(input, "输入为空", 0)
    }

    /// 数值超出目标类型范围
    pub fn out_of_range(input: impl Into<String>, target: &str) -> Self {
        Self::new(input, format!("数值超出 {} 的取值范围", target), 0)
    }
}

/// 格式化错误
///
/// 用于类型擦除后的格式化调用：值的实际类型与格式化器目标类型不一致、
/// 找不到格式化器，或者底层解析失败。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("类型不匹配: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("没有可用的格式化器: {type_name}")]
    NoFormatter { type_name: String },

    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// 注册错误
///
/// 注册阶段立即报告，避免带着错误的注册表进入查询阶段。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("注解 {annotation} 不能用于类型 {target}, 允许的类型: {allowed:?}")]
    AnnotationTargetMismatch {
        annotation: String,
        target: String,
        allowed: Vec<String>,
    },

    #[error("类型 {type_name} 已注册格式化器")]
    DuplicateFormatter { type_name: String },

    #[error("注解 {annotation} 已注册格式化器工厂")]
    DuplicateAnnotationFactory { annotation: String },

    #[error("注册表配置无效: {message}")]
    InvalidSettings { message: String },
}

impl From<ConfigError> for RegistrationError {
    fn from(error: ConfigError) -> Self {
        Self::InvalidSettings {
            message: error.to_string(),
        }
    }
}

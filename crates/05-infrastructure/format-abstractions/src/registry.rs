//! 格式化器注册表抽象接口

use crate::annotation::{Annotation, AnnotationFormatterFactory};
use crate::defaults::Formatted;
use crate::descriptor::TypeDescriptor;
use crate::formatter::{DynFormatter, Formatter, TypedFormatter};
use format_common::{FormatError, Locale, RegistrationError, TypeInfo};
use std::any::{Any, TypeId};
use std::sync::Arc;

/// 格式化器注册表 trait
///
/// 启动阶段通过 `add*` 一次性填充，之后只读，可在多线程间共享。
pub trait FormatterRegistry: Send + Sync {
    /// 注册格式化器，目标类型由 `F: Formatter<T>` 推断
    fn add<T, F>(&mut self, formatter: F) -> Result<(), RegistrationError>
    where
        T: Send + 'static,
        F: Formatter<T> + 'static;

    /// 以显式类型 `K` 为键注册 `Formatter<T>`，通过 `K <-> T` 转换适配
    fn add_for<K, T, F>(&mut self, formatter: F) -> Result<(), RegistrationError>
    where
        K: Clone + Into<T> + TryFrom<T> + Send + 'static,
        T: 'static,
        F: Formatter<T> + 'static;

    /// 注册注解格式化器工厂，以注解类型为键
    fn add_annotation_factory<A, T, F>(&mut self, factory: F) -> Result<(), RegistrationError>
    where
        A: Annotation,
        T: Send + 'static,
        F: AnnotationFormatterFactory<A, T> + 'static;

    /// 在本注册表登记类型 `T` 声明的默认格式化器
    fn add_default<T: Formatted>(&mut self) -> Result<(), RegistrationError>;

    /// 查找格式化器，找不到时返回 `None`
    fn get_formatter(&self, descriptor: &TypeDescriptor) -> Option<ResolvedFormatter>;

    /// 查找并还原为强类型格式化器
    fn get_typed_formatter<T: 'static>(
        &self,
        descriptor: &TypeDescriptor,
    ) -> Option<Arc<dyn Formatter<T>>> {
        self.get_formatter(descriptor)?.typed::<T>()
    }

    /// 检查类型是否已注册格式化器
    fn is_registered<T: 'static>(&self) -> bool {
        self.is_registered_by_type_id(TypeId::of::<T>())
    }

    /// 检查类型是否已注册格式化器（通过 TypeId）
    fn is_registered_by_type_id(&self, type_id: TypeId) -> bool;

    /// 已注册格式化器的类型
    fn registered_types(&self) -> Vec<TypeInfo>;

    /// 已注册工厂的注解类型
    fn registered_annotations(&self) -> Vec<TypeInfo>;
}

/// 格式化器来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatterSource {
    /// 由注解工厂生成
    Annotation { name: &'static str },
    /// 按类型注册
    Type,
    /// 类型声明的默认格式化器
    Default,
}

/// 查找结果
#[derive(Clone)]
pub struct ResolvedFormatter {
    formatter: Arc<dyn DynFormatter>,
    source: FormatterSource,
}

impl ResolvedFormatter {
    /// 创建查找结果
    pub fn new(formatter: Arc<dyn DynFormatter>, source: FormatterSource) -> Self {
        Self { formatter, source }
    }

    /// 来源
    pub fn source(&self) -> &FormatterSource {
        &self.source
    }

    /// 目标类型
    pub fn target_type(&self) -> &TypeInfo {
        self.formatter.target_type()
    }

    /// 擦除后的格式化器
    pub fn as_dyn(&self) -> &Arc<dyn DynFormatter> {
        &self.formatter
    }

    /// 格式化值
    pub fn format<V: Any>(&self, value: &V, locale: &Locale) -> Result<String, FormatError> {
        self.check_type::<V>()?;
        self.formatter.format_any(value, locale)
    }

    /// 格式化类型擦除的值
    pub fn format_any(&self, value: &dyn Any, locale: &Locale) -> Result<String, FormatError> {
        self.formatter.format_any(value, locale)
    }

    /// 解析文本
    pub fn parse<V: Any>(&self, formatted: &str, locale: &Locale) -> Result<V, FormatError> {
        self.check_type::<V>()?;
        let value = self.formatter.parse_any(formatted, locale)?;
        value
            .downcast::<V>()
            .map(|boxed| *boxed)
            .map_err(|_| self.mismatch::<V>())
    }

    /// 还原为强类型格式化器
    pub fn typed<T: 'static>(&self) -> Option<Arc<dyn Formatter<T>>> {
        self.formatter
            .as_any()
            .downcast_ref::<TypedFormatter<T>>()
            .map(TypedFormatter::inner)
    }

    fn check_type<V: Any>(&self) -> Result<(), FormatError> {
        if self.formatter.target_type().id == TypeId::of::<V>() {
            Ok(())
        } else {
            Err(self.mismatch::<V>())
        }
    }

    fn mismatch<V: Any>(&self) -> FormatError {
        FormatError::TypeMismatch {
            expected: self.formatter.target_type().name.clone(),
            actual: TypeInfo::of::<V>().name,
        }
    }
}

impl std::fmt::Debug for ResolvedFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFormatter")
            .field("target", &self.formatter.target_type().name)
            .field("source", &self.source)
            .finish()
    }
}

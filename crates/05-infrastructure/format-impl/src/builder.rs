//! 注册表构建器

use crate::formatters::register_builtin_formatters;
use crate::registry::GenericFormatterRegistry;
use format_abstractions::{Annotation, AnnotationFormatterFactory, Formatted, Formatter, FormatterRegistry};
use format_common::{FormattingSettings, RegistrationError};
use tracing::info;

type Registration = Box<dyn FnOnce(&mut GenericFormatterRegistry) -> Result<(), RegistrationError>>;

/// 注册表构建器
///
/// 注册动作按添加顺序延迟到 [`build`](Self::build) 时执行，
/// 因此覆盖规则取决于最终的配置。
pub struct FormatterRegistryBuilder {
    settings: FormattingSettings,
    builtins: bool,
    registrations: Vec<Registration>,
}

impl FormatterRegistryBuilder {
    /// 创建使用默认配置的构建器
    pub fn new() -> Self {
        Self {
            settings: FormattingSettings::default(),
            builtins: false,
            registrations: Vec::new(),
        }
    }

    /// 使用指定配置
    pub fn with_settings(mut self, settings: FormattingSettings) -> Self {
        self.settings = settings;
        self
    }

    /// 先注册内置格式化器与注解工厂
    pub fn with_builtin_formatters(mut self) -> Self {
        self.builtins = true;
        self
    }

    /// 按值类型注册格式化器
    pub fn add<T, F>(mut self, formatter: F) -> Self
    where
        T: Send + 'static,
        F: Formatter<T> + 'static,
    {
        self.registrations.push(Box::new(
            move |registry: &mut GenericFormatterRegistry| registry.add::<T, F>(formatter),
        ));
        self
    }

    /// 为类型 `K` 注册以 `T` 为目标的格式化器
    pub fn add_for<K, T, F>(mut self, formatter: F) -> Self
    where
        K: Clone + Into<T> + TryFrom<T> + Send + 'static,
        T: 'static,
        F: Formatter<T> + 'static,
    {
        self.registrations.push(Box::new(
            move |registry: &mut GenericFormatterRegistry| registry.add_for::<K, T, F>(formatter),
        ));
        self
    }

    /// 注册注解格式化器工厂
    pub fn add_annotation_factory<A, T, F>(mut self, factory: F) -> Self
    where
        A: Annotation,
        T: Send + 'static,
        F: AnnotationFormatterFactory<A, T> + 'static,
    {
        self.registrations.push(Box::new(
            move |registry: &mut GenericFormatterRegistry| registry.add_annotation_factory::<A, T, F>(factory),
        ));
        self
    }

    /// 在注册表自己的目录中登记 `T` 的默认格式化器
    pub fn add_default<T: Formatted>(mut self) -> Self {
        self.registrations.push(Box::new(
            |registry: &mut GenericFormatterRegistry| registry.add_default::<T>(),
        ));
        self
    }

    /// 构建注册表，配置无效或遇到第一个注册错误时返回
    pub fn build(self) -> Result<GenericFormatterRegistry, RegistrationError> {
        self.settings.validate()?;
        let mut registry = GenericFormatterRegistry::with_settings(self.settings);

        if self.builtins {
            let lenient = registry.settings().lenient_parsing;
            register_builtin_formatters(&mut registry, lenient)?;
        }

        let registration_count = self.registrations.len();
        for registration in self.registrations {
            registration(&mut registry)?;
        }

        info!(
            "构建格式化注册表完成，自定义注册 {} 项，共 {} 个类型格式化器",
            registration_count,
            registry.registered_types().len()
        );
        Ok(registry)
    }
}

impl Default for FormatterRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::IntegerFormatter;
    use format_abstractions::{FormatterSource, TypeDescriptor};
    use format_common::Locale;

    #[test]
    fn test_builtin_formatters() {
        let registry = FormatterRegistryBuilder::new()
            .with_builtin_formatters()
            .build()
            .unwrap();

        assert!(registry.is_registered::<i64>());
        assert!(registry.is_registered::<u8>());
        assert_eq!(registry.registered_annotations().len(), 3);

        let resolved = registry.get_formatter(&TypeDescriptor::of::<i32>()).unwrap();
        assert_eq!(resolved.format(&-1234_i32, &Locale::US).unwrap(), "-1,234");
        assert_eq!(resolved.parse::<i32>("42", &Locale::US).unwrap(), 42);
    }

    #[test]
    fn test_custom_registration_overrides_builtin() {
        let registry = FormatterRegistryBuilder::new()
            .with_builtin_formatters()
            .add::<i64, _>(IntegerFormatter::new().with_grouping(false))
            .build()
            .unwrap();

        let resolved = registry.get_formatter(&TypeDescriptor::of::<i64>()).unwrap();
        assert_eq!(resolved.source(), &FormatterSource::Type);
        assert_eq!(resolved.format(&12345_i64, &Locale::US).unwrap(), "12345");
    }

    #[test]
    fn test_strict_settings_reject_duplicates() {
        let settings = FormattingSettings {
            allow_overrides: false,
            ..FormattingSettings::default()
        };
        let result = FormatterRegistryBuilder::new()
            .with_settings(settings)
            .with_builtin_formatters()
            .add::<i64, _>(IntegerFormatter::new())
            .build();
        assert!(matches!(result, Err(RegistrationError::DuplicateFormatter { .. })));
    }

    #[test]
    fn test_invalid_settings_rejected_at_build() {
        let settings = FormattingSettings {
            default_locale: Locale::ROOT,
            ..FormattingSettings::default()
        };
        let result = FormatterRegistryBuilder::new()
            .with_settings(settings)
            .with_builtin_formatters()
            .build();
        assert!(matches!(result, Err(RegistrationError::InvalidSettings { .. })));
    }
}

//! 通用格式化器注册表

use dashmap::DashMap;
use format_abstractions::{
    Annotation, AnnotationFormatterFactory, ConvertingFormatter, DefaultFormatterCatalog,
    DefaultFormatterEntry, DynAnnotationFactory, DynFormatter, Formatted, Formatter, FormatterRegistry, FormatterSource,
    ResolvedFormatter, TypeDescriptor, TypedAnnotationFactory, TypedFormatter,
};
use format_common::{
    ConfigError, Configurable, FormatError, FormattingSettings, Locale, RegistrationError, TypeInfo,
};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 通用格式化器注册表
///
/// 查找顺序：字段注解对应的工厂、按类型注册的格式化器、类型声明的默认格式化器。
/// 默认格式化器首次命中时实例化，之后按类型缓存。
pub struct GenericFormatterRegistry {
    formatters: HashMap<TypeId, Arc<dyn DynFormatter>>,
    annotation_factories: HashMap<TypeId, Arc<dyn DynAnnotationFactory>>,
    defaults: DefaultFormatterCatalog,
    default_cache: DashMap<TypeId, Arc<dyn DynFormatter>>,
    settings: FormattingSettings,
}

impl GenericFormatterRegistry {
    /// 使用默认配置创建空注册表
    pub fn new() -> Self {
        Self::with_settings(FormattingSettings::default())
    }

    /// 使用指定配置创建空注册表
    pub fn with_settings(settings: FormattingSettings) -> Self {
        Self {
            formatters: HashMap::new(),
            annotation_factories: HashMap::new(),
            defaults: DefaultFormatterCatalog::new(),
            default_cache: DashMap::new(),
            settings,
        }
    }

    /// 当前配置
    pub fn settings(&self) -> &FormattingSettings {
        &self.settings
    }

    /// 默认区域
    pub fn default_locale(&self) -> &Locale {
        &self.settings.default_locale
    }

    /// 用默认区域格式化值，找不到格式化器时返回 [`FormatError::NoFormatter`]
    pub fn format_value<V: Any>(&self, descriptor: &TypeDescriptor, value: &V) -> Result<String, FormatError> {
        self.require(descriptor)?
            .format(value, &self.settings.default_locale)
    }

    /// 用默认区域解析文本
    pub fn parse_value<V: Any>(&self, descriptor: &TypeDescriptor, text: &str) -> Result<V, FormatError> {
        self.require(descriptor)?
            .parse(text, &self.settings.default_locale)
    }

    fn require(&self, descriptor: &TypeDescriptor) -> Result<ResolvedFormatter, FormatError> {
        self.get_formatter(descriptor)
            .ok_or_else(|| FormatError::NoFormatter {
                type_name: descriptor.to_string(),
            })
    }

    fn insert_formatter(&mut self, key: TypeInfo, formatter: Arc<dyn DynFormatter>) -> Result<(), RegistrationError> {
        if self.formatters.contains_key(&key.id) {
            if !self.settings.allow_overrides {
                return Err(RegistrationError::DuplicateFormatter { type_name: key.name });
            }
            warn!("覆盖已注册的格式化器: {}", key.name);
        }

        info!("注册格式化器: {}", key.name);
        self.formatters.insert(key.id, formatter);
        Ok(())
    }

    fn resolve_annotated(&self, descriptor: &TypeDescriptor) -> Option<ResolvedFormatter> {
        for annotation in descriptor.annotations() {
            let Some(factory) = self.annotation_factories.get(&annotation.type_id()) else {
                continue;
            };
            if factory.target_type().id != descriptor.type_id() {
                debug!(
                    "注解 {} 的工厂目标 {} 与 {} 不符，跳过",
                    annotation.name(),
                    factory.target_type(),
                    descriptor.type_info()
                );
                continue;
            }
            if let Some(formatter) = factory.create(annotation) {
                debug!("按注解 {} 解析格式化器: {}", annotation.name(), descriptor);
                return Some(ResolvedFormatter::new(
                    formatter,
                    FormatterSource::Annotation {
                        name: annotation.name(),
                    },
                ));
            }
        }
        None
    }

    /// 先查本地目录，启用时再查全局目录
    fn lookup_default(&self, type_id: TypeId) -> Option<DefaultFormatterEntry> {
        self.defaults.lookup(type_id).or_else(|| {
            self.settings
                .use_global_defaults
                .then(|| DefaultFormatterCatalog::global().lookup(type_id))
                .flatten()
        })
    }

    fn resolve_default(&self, descriptor: &TypeDescriptor) -> Option<ResolvedFormatter> {
        let type_id = descriptor.type_id();
        if let Some(cached) = self.default_cache.get(&type_id) {
            return Some(ResolvedFormatter::new(Arc::clone(cached.value()), FormatterSource::Default));
        }

        let entry = self.lookup_default(type_id)?;

        // 并发首次命中时只保留先写入的实例
        let formatter = self
            .default_cache
            .entry(type_id)
            .or_insert_with(|| {
                debug!("实例化默认格式化器: {}", entry.type_info);
                entry.instantiate()
            })
            .value()
            .clone();
        Some(ResolvedFormatter::new(formatter, FormatterSource::Default))
    }
}

impl Default for GenericFormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatterRegistry for GenericFormatterRegistry {
    fn add<T, F>(&mut self, formatter: F) -> Result<(), RegistrationError>
    where
        T: Send + 'static,
        F: Formatter<T> + 'static,
    {
        let typed = TypedFormatter::<T>::from_formatter(formatter);
        self.insert_formatter(TypeInfo::of::<T>(), Arc::new(typed))
    }

    fn add_for<K, T, F>(&mut self, formatter: F) -> Result<(), RegistrationError>
    where
        K: Clone + Into<T> + TryFrom<T> + Send + 'static,
        T: 'static,
        F: Formatter<T> + 'static,
    {
        let converting = ConvertingFormatter::<K, T>::new(Arc::new(formatter));
        let typed = TypedFormatter::<K>::from_formatter(converting);
        self.insert_formatter(TypeInfo::of::<K>(), Arc::new(typed))
    }

    fn add_annotation_factory<A, T, F>(&mut self, factory: F) -> Result<(), RegistrationError>
    where
        A: Annotation,
        T: Send + 'static,
        F: AnnotationFormatterFactory<A, T> + 'static,
    {
        let typed = TypedAnnotationFactory::<A, T>::new(factory)?;
        let key = TypeId::of::<A>();

        if self.annotation_factories.contains_key(&key) {
            if !self.settings.allow_overrides {
                return Err(RegistrationError::DuplicateAnnotationFactory {
                    annotation: A::NAME.to_string(),
                });
            }
            warn!("覆盖已注册的注解工厂: {}", A::NAME);
        }

        info!("注册注解工厂: {} -> {}", A::NAME, TypeInfo::of::<T>());
        self.annotation_factories.insert(key, Arc::new(typed));
        Ok(())
    }

    fn add_default<T: Formatted>(&mut self) -> Result<(), RegistrationError> {
        info!("注册默认格式化器: {}", TypeInfo::of::<T>());
        self.defaults.register::<T>();
        self.default_cache.remove(&TypeId::of::<T>());
        Ok(())
    }

    fn get_formatter(&self, descriptor: &TypeDescriptor) -> Option<ResolvedFormatter> {
        if let Some(resolved) = self.resolve_annotated(descriptor) {
            return Some(resolved);
        }

        if let Some(formatter) = self.formatters.get(&descriptor.type_id()) {
            debug!("按类型解析格式化器: {}", descriptor);
            return Some(ResolvedFormatter::new(Arc::clone(formatter), FormatterSource::Type));
        }

        let resolved = self.resolve_default(descriptor);
        if resolved.is_none() {
            debug!("没有可用的格式化器: {}", descriptor);
        }
        resolved
    }

    fn is_registered_by_type_id(&self, type_id: TypeId) -> bool {
        self.formatters.contains_key(&type_id) || self.lookup_default(type_id).is_some()
    }

    fn registered_types(&self) -> Vec<TypeInfo> {
        self.formatters
            .values()
            .map(|formatter| formatter.target_type().clone())
            .collect()
    }

    fn registered_annotations(&self) -> Vec<TypeInfo> {
        self.annotation_factories
            .values()
            .map(|factory| factory.annotation_type().clone())
            .collect()
    }
}

impl Configurable for GenericFormatterRegistry {
    type Config = FormattingSettings;

    fn configure(&mut self, config: Self::Config) -> Result<(), ConfigError> {
        config.validate()?;
        if config.use_global_defaults != self.settings.use_global_defaults {
            self.default_cache.clear();
        }
        info!("应用格式化配置: 默认区域 {}", config.default_locale);
        self.settings = config;
        Ok(())
    }

    fn get_config_path() -> &'static str {
        FormattingSettings::SECTION
    }
}

impl std::fmt::Debug for GenericFormatterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericFormatterRegistry")
            .field("formatters", &self.formatters.len())
            .field("annotation_factories", &self.annotation_factories.len())
            .field("defaults", &self.defaults.len())
            .field("settings", &self.settings)
            .finish()
    }
}

//! 默认格式化器
//!
//! 类型可以通过 [`Formatted`] 声明自己的默认格式化器。声明在启动时登记到
//! [`DefaultFormatterCatalog`]（通常由 `#[derive(Formatted)]` 借助 `ctor`
//! 自动完成），注册表在没有其它匹配时按类型ID查目录并实例化。

use crate::formatter::{DynFormatter, Formatter, TypedFormatter};
use format_common::TypeInfo;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 默认格式化器标记 trait
pub trait Formatted: Sized + Send + Sync + 'static {
    /// 默认格式化器类型
    type Formatter: Formatter<Self> + Default + 'static;
}

/// 默认格式化器工厂函数类型
pub type DefaultFormatterFactoryFn = Arc<dyn Fn() -> Arc<dyn DynFormatter> + Send + Sync>;

/// 目录条目
#[derive(Clone)]
pub struct DefaultFormatterEntry {
    /// 目标类型
    pub type_info: TypeInfo,
    factory: DefaultFormatterFactoryFn,
}

impl DefaultFormatterEntry {
    /// 创建格式化器实例
    pub fn instantiate(&self) -> Arc<dyn DynFormatter> {
        (self.factory)()
    }
}

impl std::fmt::Debug for DefaultFormatterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultFormatterEntry")
            .field("type_info", &self.type_info)
            .field("factory", &"<function>")
            .finish()
    }
}

/// 全局默认格式化器目录
static GLOBAL_DEFAULT_FORMATTERS: Lazy<DefaultFormatterCatalog> =
    Lazy::new(DefaultFormatterCatalog::new);

/// 默认格式化器目录
#[derive(Debug, Default)]
pub struct DefaultFormatterCatalog {
    entries: RwLock<HashMap<TypeId, DefaultFormatterEntry>>,
}

impl DefaultFormatterCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// 进程级全局目录
    pub fn global() -> &'static DefaultFormatterCatalog {
        &GLOBAL_DEFAULT_FORMATTERS
    }

    /// 登记类型 `T` 声明的默认格式化器
    pub fn register<T: Formatted>(&self) {
        self.register_with::<T, T::Formatter, _>(<T::Formatter as Default>::default);
    }

    /// 用自定义工厂函数登记
    pub fn register_with<T, F, C>(&self, factory: C)
    where
        T: Send + 'static,
        F: Formatter<T> + 'static,
        C: Fn() -> F + Send + Sync + 'static,
    {
        let type_info = TypeInfo::of::<T>();
        debug!("登记默认格式化器: {}", type_info.module_path);

        let entry = DefaultFormatterEntry {
            type_info,
            factory: Arc::new(move || {
                Arc::new(TypedFormatter::<T>::from_formatter(factory())) as Arc<dyn DynFormatter>
            }),
        };
        self.entries.write().insert(TypeId::of::<T>(), entry);
    }

    /// 按类型ID查找
    pub fn lookup(&self, type_id: TypeId) -> Option<DefaultFormatterEntry> {
        self.entries.read().get(&type_id).cloned()
    }

    /// 是否已登记类型 `T`
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.read().contains_key(&TypeId::of::<T>())
    }

    /// 已登记的类型
    pub fn registered_types(&self) -> Vec<TypeInfo> {
        self.entries
            .read()
            .values()
            .map(|entry| entry.type_info.clone())
            .collect()
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

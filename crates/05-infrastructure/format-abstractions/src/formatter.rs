//! 格式化器抽象接口
//!
//! [`Formatter`] 是强类型接口；注册表内部以类型擦除的 [`DynFormatter`]
//! 保存，查询方可以再通过 [`TypedFormatter`] 还原强类型句柄。

use format_common::{FormatError, Locale, ParseError, TypeInfo};
use std::any::{Any, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;

/// 格式化器 trait
///
/// 在类型 `T` 的值与本地化文本之间双向转换
pub trait Formatter<T>: Send + Sync {
    /// 把值渲染为本地化文本
    fn format(&self, value: &T, locale: &Locale) -> String;

    /// 把本地化文本解析回值
    fn parse(&self, formatted: &str, locale: &Locale) -> Result<T, ParseError>;
}

impl<T, F> Formatter<T> for Arc<F>
where
    F: Formatter<T> + ?Sized,
{
    fn format(&self, value: &T, locale: &Locale) -> String {
        (**self).format(value, locale)
    }

    fn parse(&self, formatted: &str, locale: &Locale) -> Result<T, ParseError> {
        (**self).parse(formatted, locale)
    }
}

/// 类型擦除的格式化器
pub trait DynFormatter: Send + Sync {
    /// 目标类型
    fn target_type(&self) -> &TypeInfo;

    /// 格式化任意值，值类型必须与目标类型一致
    fn format_any(&self, value: &dyn Any, locale: &Locale) -> Result<String, FormatError>;

    /// 解析为装箱的目标类型值
    fn parse_any(&self, formatted: &str, locale: &Locale) -> Result<Box<dyn Any + Send>, FormatError>;

    /// 用于向下转型回 [`TypedFormatter`]
    fn as_any(&self) -> &dyn Any;
}

/// 强类型格式化器的擦除包装
pub struct TypedFormatter<T: 'static> {
    inner: Arc<dyn Formatter<T>>,
    target: TypeInfo,
}

impl<T: Send + 'static> TypedFormatter<T> {
    /// 包装强类型格式化器
    pub fn new(inner: Arc<dyn Formatter<T>>) -> Self {
        Self {
            inner,
            target: TypeInfo::of::<T>(),
        }
    }

    /// 直接从格式化器实例创建
    pub fn from_formatter<F>(formatter: F) -> Self
    where
        F: Formatter<T> + 'static,
    {
        Self::new(Arc::new(formatter))
    }
}

impl<T: 'static> TypedFormatter<T> {
    /// 取回强类型句柄
    pub fn inner(&self) -> Arc<dyn Formatter<T>> {
        Arc::clone(&self.inner)
    }
}

impl<T: Send + 'static> DynFormatter for TypedFormatter<T> {
    fn target_type(&self) -> &TypeInfo {
        &self.target
    }

    fn format_any(&self, value: &dyn Any, locale: &Locale) -> Result<String, FormatError> {
        let typed = value
            .downcast_ref::<T>()
            .ok_or_else(|| FormatError::TypeMismatch {
                expected: self.target.name.clone(),
                actual: format!("{:?}", value.type_id()),
            })?;
        Ok(self.inner.format(typed, locale))
    }

    fn parse_any(&self, formatted: &str, locale: &Locale) -> Result<Box<dyn Any + Send>, FormatError> {
        let value = self.inner.parse(formatted, locale)?;
        Ok(Box::new(value))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: 'static> std::fmt::Debug for TypedFormatter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedFormatter")
            .field("target", &self.target.name)
            .field("formatter", &"<formatter>")
            .finish()
    }
}

/// 键类型转换格式化器
///
/// 把 `Formatter<T>` 适配为 `Formatter<K>`：格式化时 `K -> T`，
/// 解析时 `T -> K`，转换失败视为解析错误。
pub struct ConvertingFormatter<K, T: 'static> {
    inner: Arc<dyn Formatter<T>>,
    key_type: PhantomData<fn() -> K>,
}

impl<K, T: 'static> ConvertingFormatter<K, T> {
    /// 创建转换格式化器
    pub fn new(inner: Arc<dyn Formatter<T>>) -> Self {
        Self {
            inner,
            key_type: PhantomData,
        }
    }
}

impl<K, T> Formatter<K> for ConvertingFormatter<K, T>
where
    K: Clone + Into<T> + TryFrom<T> + 'static,
    T: 'static,
{
    fn format(&self, value: &K, locale: &Locale) -> String {
        self.inner.format(&value.clone().into(), locale)
    }

    fn parse(&self, formatted: &str, locale: &Locale) -> Result<K, ParseError> {
        let value = self.inner.parse(formatted, locale)?;
        K::try_from(value)
            .map_err(|_| ParseError::out_of_range(formatted, std::any::type_name::<K>()))
    }
}

/// 判断擦除后的格式化器是否服务于类型 `T`
pub fn serves<T: 'static>(formatter: &dyn DynFormatter) -> bool {
    formatter.target_type().id == TypeId::of::<T>()
}

//! 注解与注解格式化器工厂
//!
//! 字段上的标记注解（例如货币标记）携带参数，注册表按注解类型找到工厂，
//! 由工厂根据注解参数生成专用的格式化器。

use crate::formatter::{DynFormatter, Formatter, TypedFormatter};
use format_common::{RegistrationError, TypeInfo};
use std::any::{Any, TypeId};
use std::fmt::Debug;
use std::sync::Arc;

/// 标记注解 trait
pub trait Annotation: Any + Clone + Debug + Send + Sync {
    /// 注解名称
    const NAME: &'static str;

    /// 允许标注的值类型，空表示不限
    fn target_types() -> Vec<TypeInfo> {
        Vec::new()
    }
}

/// 注解实例（注解类型 + 参数）
#[derive(Clone)]
pub struct AnnotationInstance {
    kind: TypeInfo,
    name: &'static str,
    payload: Arc<dyn Any + Send + Sync>,
    rendered: String,
}

impl AnnotationInstance {
    /// 包装注解实例
    pub fn new<A: Annotation>(annotation: A) -> Self {
        Self {
            kind: TypeInfo::of::<A>(),
            name: A::NAME,
            rendered: format!("{:?}", annotation),
            payload: Arc::new(annotation),
        }
    }

    /// 注解类型
    pub fn kind(&self) -> &TypeInfo {
        &self.kind
    }

    /// 注解类型ID
    pub fn type_id(&self) -> TypeId {
        self.kind.id
    }

    /// 注解名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 是否为注解 `A`
    pub fn is<A: Annotation>(&self) -> bool {
        self.kind.id == TypeId::of::<A>()
    }

    /// 取出注解参数
    pub fn downcast_ref<A: Annotation>(&self) -> Option<&A> {
        self.payload.downcast_ref::<A>()
    }
}

impl Debug for AnnotationInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.rendered)
    }
}

/// 注解格式化器工厂 trait
///
/// 根据注解 `A` 的参数生成 `T` 的格式化器
pub trait AnnotationFormatterFactory<A, T>: Send + Sync
where
    A: Annotation,
    T: 'static,
{
    /// 生成格式化器
    fn get_formatter(&self, annotation: &A) -> Arc<dyn Formatter<T>>;
}

/// 类型擦除的注解格式化器工厂
pub trait DynAnnotationFactory: Send + Sync {
    /// 注解类型
    fn annotation_type(&self) -> &TypeInfo;

    /// 生成的格式化器的目标类型
    fn target_type(&self) -> &TypeInfo;

    /// 注解类型不匹配时返回 `None`
    fn create(&self, annotation: &AnnotationInstance) -> Option<Arc<dyn DynFormatter>>;
}

/// 强类型注解工厂的擦除包装
pub struct TypedAnnotationFactory<A, T>
where
    A: Annotation,
    T: 'static,
{
    factory: Arc<dyn AnnotationFormatterFactory<A, T>>,
    annotation: TypeInfo,
    target: TypeInfo,
}

impl<A, T> TypedAnnotationFactory<A, T>
where
    A: Annotation,
    T: Send + 'static,
{
    /// 包装工厂，同时检查注解允许的目标类型
    pub fn new<F>(factory: F) -> Result<Self, RegistrationError>
    where
        F: AnnotationFormatterFactory<A, T> + 'static,
    {
        validate_target::<A, T>()?;
        Ok(Self {
            factory: Arc::new(factory),
            annotation: TypeInfo::of::<A>(),
            target: TypeInfo::of::<T>(),
        })
    }
}

impl<A, T> DynAnnotationFactory for TypedAnnotationFactory<A, T>
where
    A: Annotation,
    T: Send + 'static,
{
    fn annotation_type(&self) -> &TypeInfo {
        &self.annotation
    }

    fn target_type(&self) -> &TypeInfo {
        &self.target
    }

    fn create(&self, annotation: &AnnotationInstance) -> Option<Arc<dyn DynFormatter>> {
        let typed = annotation.downcast_ref::<A>()?;
        let formatter = self.factory.get_formatter(typed);
        Some(Arc::new(TypedFormatter::new(formatter)))
    }
}

/// 检查注解 `A` 是否允许标注类型 `T`
pub fn validate_target<A, T>() -> Result<(), RegistrationError>
where
    A: Annotation,
    T: 'static,
{
    let allowed = A::target_types();
    if allowed.is_empty() || allowed.iter().any(|info| info.is::<T>()) {
        return Ok(());
    }

    Err(RegistrationError::AnnotationTargetMismatch {
        annotation: A::NAME.to_string(),
        target: TypeInfo::of::<T>().name,
        allowed: allowed.into_iter().map(|info| info.name).collect(),
    })
}

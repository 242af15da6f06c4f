//! 类型描述符
//!
//! 描述值的声明类型，以及（可选的）值所在字段和字段上的注解。

use crate::annotation::{Annotation, AnnotationInstance};
use format_common::TypeInfo;
use std::any::TypeId;
use std::fmt;

/// 值的来源
#[derive(Debug, Clone)]
pub enum Origin {
    /// 仅有类型，没有字段上下文
    Type,
    /// 来自某个字段
    Field(FieldContext),
}

/// 字段上下文
#[derive(Debug, Clone, Default)]
pub struct FieldContext {
    /// 字段所属类型名称
    pub owner: String,
    /// 字段名称
    pub name: String,
    /// 字段上的注解，按声明顺序
    pub annotations: Vec<AnnotationInstance>,
}

/// 类型描述符
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    type_info: TypeInfo,
    origin: Origin,
}

impl TypeDescriptor {
    /// 只描述类型
    pub fn of<T: 'static>() -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            origin: Origin::Type,
        }
    }

    /// 描述某个字段
    pub fn for_field<T: 'static>(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            origin: Origin::Field(FieldContext {
                owner: owner.into(),
                name: name.into(),
                annotations: Vec::new(),
            }),
        }
    }

    /// 追加注解；类型级描述符会转为匿名字段上下文
    pub fn with_annotation<A: Annotation>(mut self, annotation: A) -> Self {
        let instance = AnnotationInstance::new(annotation);
        match self.origin {
            Origin::Field(ref mut field) => field.annotations.push(instance),
            Origin::Type => {
                self.origin = Origin::Field(FieldContext {
                    annotations: vec![instance],
                    ..FieldContext::default()
                });
            }
        }
        self
    }

    /// 类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 类型ID
    pub fn type_id(&self) -> TypeId {
        self.type_info.id
    }

    /// 值的来源
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// 字段上下文
    pub fn field(&self) -> Option<&FieldContext> {
        match &self.origin {
            Origin::Field(field) => Some(field),
            Origin::Type => None,
        }
    }

    /// 字段上的全部注解
    pub fn annotations(&self) -> &[AnnotationInstance] {
        match &self.origin {
            Origin::Field(field) => &field.annotations,
            Origin::Type => &[],
        }
    }

    /// 查找注解 `A`
    pub fn annotation<A: Annotation>(&self) -> Option<&A> {
        self.annotations()
            .iter()
            .find_map(|instance| instance.downcast_ref::<A>())
    }

    /// 是否带有注解 `A`
    pub fn has_annotation<A: Annotation>(&self) -> bool {
        self.annotation::<A>().is_some()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Origin::Field(field) if !field.name.is_empty() => {
                write!(f, "{}.{}: {}", field.owner, field.name, self.type_info)
            }
            _ => write!(f, "{}", self.type_info),
        }
    }
}

/// 可提供字段描述符的类型
///
/// 通常由 `#[derive(Annotated)]` 生成
pub trait Annotated: 'static {
    /// 全部字段名称
    fn field_names() -> &'static [&'static str];

    /// 某个字段的描述符，字段不存在时返回 `None`
    fn field_descriptor(field: &str) -> Option<TypeDescriptor>;
}

//! # Rust Value Types
//!
//! The converter itself works on [`DataObject`]s. This module connects it to plain Rust
//! structs: [`ValueType`] exposes a struct's schema and rebuilds the struct from a
//! converted object, and [`FieldType`] maps each field's Rust type to a [`TypeExpr`].
//!
//! Both are normally generated by [`value_type!`](crate::value_type):
//!
//! ```rust
//! use dto_framework::value_type;
//!
//! value_type! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub struct Comment {
//!         pub id: i64,
//!         pub body: String,
//!         pub replies: Vec<Comment>,
//!         pub score: i64 = 0,
//!     }
//! }
//!
//! assert_eq!(Comment::FIELD_REPLIES, "replies");
//! ```
//!
//! A value type used as a field type is always a forward reference by its name. The
//! conversion target is registered automatically, so `Comment` above converts without
//! extra arguments; any *other* value type reachable from the target must be passed to
//! the call as a related type.

use crate::error::ConversionError;
use crate::schema::{TypeDescriptor, TypeExpr};
use crate::value::{DataObject, Value};

/// A Rust struct the converter can produce.
pub trait ValueType: Sized {
    /// Name used for forward references to this type.
    const NAME: &'static str;

    /// The struct's field schema.
    fn descriptor() -> TypeDescriptor;

    /// Rebuilds the struct from a converted object.
    fn from_object(object: &DataObject) -> Result<Self, ConversionError>;

    /// This type as a conversion target or related type.
    fn target() -> TypeExpr {
        TypeExpr::value(Self::descriptor())
    }
}

/// Maps a Rust field type to its declared [`TypeExpr`].
pub trait FieldType {
    fn field_type() -> TypeExpr;
}

macro_rules! scalar_field_type {
    ($($ty:ty => $ctor:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn field_type() -> TypeExpr {
                    TypeExpr::$ctor()
                }
            }
        )*
    };
}

scalar_field_type! {
    bool => bool,
    i8 => int,
    i16 => int,
    i32 => int,
    i64 => int,
    u8 => int,
    u16 => int,
    u32 => int,
    u64 => int,
    usize => int,
    f64 => float,
    String => str,
    Value => any,
    DataObject => any,
}

impl<T: FieldType> FieldType for Option<T> {
    fn field_type() -> TypeExpr {
        TypeExpr::optional(T::field_type())
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn field_type() -> TypeExpr {
        TypeExpr::list(T::field_type())
    }
}

impl<T: FieldType> FieldType for Box<T> {
    fn field_type() -> TypeExpr {
        T::field_type()
    }
}

/// Declares a struct as a value type.
///
/// Generates the struct itself plus [`ValueType`], [`FieldType`] and
/// [`FromValue`](crate::FromValue) impls, and a `FIELD_<NAME>` constant per field.
/// `field: Ty = expr` gives the field a default; `expr` is evaluated anew each time a
/// conversion needs it and must convert into [`Value`].
#[macro_export]
macro_rules! value_type {
    (@field $field:ident, $ty:ty) => {
        $crate::FieldDescriptor::new(
            stringify!($field),
            <$ty as $crate::FieldType>::field_type(),
        )
    };
    (@field $field:ident, $ty:ty, $default:expr) => {
        $crate::FieldDescriptor::new(
            stringify!($field),
            <$ty as $crate::FieldType>::field_type(),
        )
        .with_default_factory(|| $crate::Value::from($default))
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        $crate::paste::paste! {
            impl $name {
                $(
                    pub const [<FIELD_ $field:upper>]: &'static str = stringify!($field);
                )*
            }
        }

        impl $crate::ValueType for $name {
            const NAME: &'static str = stringify!($name);

            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::new(stringify!($name))
                $(
                    .field($crate::value_type!(@field $field, $ty $(, $default)?))
                )*
            }

            fn from_object(
                object: &$crate::DataObject,
            ) -> ::std::result::Result<Self, $crate::ConversionError> {
                ::std::result::Result::Ok(Self {
                    $( $field: object.extract(stringify!($field))?, )*
                })
            }
        }

        impl $crate::FieldType for $name {
            fn field_type() -> $crate::TypeExpr {
                $crate::TypeExpr::forward(stringify!($name))
            }
        }

        impl $crate::FromValue for $name {
            fn from_value(
                value: &$crate::Value,
            ) -> ::std::result::Result<Self, $crate::ConversionError> {
                match value {
                    $crate::Value::Object(object) if object.type_name() == stringify!($name) => {
                        <Self as $crate::ValueType>::from_object(object)
                    }
                    other => ::std::result::Result::Err(
                        $crate::ConversionError::mismatch(concat!("object `", stringify!($name), "`"), other),
                    ),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ScalarType;

    crate::value_type! {
        #[derive(Debug, Clone, PartialEq)]
        struct Node {
            id: i64,
            label: Option<String> = None::<String>,
            children: Vec<Node>,
            parent: Option<Box<Node>>,
        }
    }

    #[test]
    fn test_descriptor_follows_declaration() {
        let descriptor = Node::descriptor();
        assert_eq!(descriptor.name(), "Node");
        let rendered: Vec<String> = descriptor
            .fields()
            .iter()
            .map(|f| format!("{}: {}", f.name, f.ty))
            .collect();
        assert_eq!(
            rendered,
            [
                "id: int",
                "label: Optional[str]",
                "children: List['Node']",
                "parent: Optional['Node']",
            ]
        );
    }

    #[test]
    fn test_defaults_only_where_declared() {
        let descriptor = Node::descriptor();
        let defaults: Vec<Option<Value>> = descriptor
            .fields()
            .iter()
            .map(|f| f.default.produce())
            .collect();
        assert_eq!(defaults, [None, Some(Value::Null), None, None]);
    }

    #[test]
    fn test_field_name_constants() {
        assert_eq!(Node::FIELD_ID, "id");
        assert_eq!(Node::FIELD_CHILDREN, "children");
    }

    #[test]
    fn test_from_object_rejects_other_types() {
        let other = Value::Object(DataObject::new("Leaf", vec![]));
        let err = <Node as crate::FromValue>::from_value(&other).unwrap_err();
        assert_eq!(err.to_string(), "expected object `Node`, found object `Leaf`");
    }

    #[test]
    fn test_scalars_map_to_scalar_types() {
        assert!(matches!(
            <u32 as FieldType>::field_type(),
            TypeExpr::Scalar(ScalarType::Int)
        ));
        assert!(matches!(
            <Value as FieldType>::field_type(),
            TypeExpr::Scalar(ScalarType::Any)
        ));
    }
}

//! # Values and Result Objects
//!
//! [`Value`] is the dynamic universe the converter moves around: attribute values read
//! from records going in, field values of [`DataObject`]s coming out.

use crate::error::ConversionError;
use crate::record::{RecordRef, RelatedRef};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A dynamically typed attribute or field value.
#[derive(Clone)]
pub enum Value {
    /// The empty marker (a nullable column holding nothing, a missing relation).
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    /// A converted value object.
    Object(DataObject),
    /// A single related record, not yet converted.
    Record(RecordRef),
    /// A to-many relation, not yet fetched.
    Related(RelatedRef),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Object(object) => format!("object `{}`", object.type_name()),
            Value::Record(record) => format!("record `{}`", record.model_name()),
            Value::Related(_) => "related collection".to_string(),
        }
    }

    /// Longer description of the value itself, used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Record(record) => record.describe(),
            Value::Related(related) => related.describe(),
            Value::Str(s) => format!("{s:?}"),
            other => format!("{other:?}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Object(object) => fmt::Debug::fmt(object, f),
            Value::Record(record) => write!(f, "Record({})", record.describe()),
            Value::Related(related) => write!(f, "Related({})", related.describe()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            // Unconverted records and relations compare by identity.
            (Value::Record(a), Value::Record(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            (Value::Related(a), Value::Related(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
    String => Str,
    &str => Str,
    DataObject => Object,
    RecordRef => Record,
    RelatedRef => Related,
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(object) => object.serialize(serializer),
            Value::Record(_) | Value::Related(_) => Err(S::Error::custom(format!(
                "cannot serialize unconverted {}",
                self.kind()
            ))),
        }
    }
}

// =============================================================================
// RESULT OBJECTS
// =============================================================================

/// An immutable value object produced by the converter.
///
/// Fields keep the declaration order of the target type. There are no setters; a
/// `DataObject` is built once from its field mapping and only read afterwards.
#[derive(Clone, PartialEq)]
pub struct DataObject {
    type_name: Arc<str>,
    fields: Vec<(String, Value)>,
}

impl DataObject {
    /// Builds an object of type `type_name` from an ordered field mapping.
    pub fn new(type_name: impl Into<Arc<str>>, fields: Vec<(String, Value)>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Iterates `(name, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Extracts one field as a Rust type. A field the object does not carry reads as `Null`.
    pub fn extract<T: FromValue>(&self, field: &str) -> Result<T, ConversionError> {
        let value = self.get(field).unwrap_or(&Value::Null);
        T::from_value(value).map_err(|source| ConversionError::InvalidField {
            type_name: self.type_name.to_string(),
            field: field.to_string(),
            source: Box::new(source),
        })
    }
}

impl fmt::Debug for DataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(&self.type_name);
        for (name, value) in &self.fields {
            s.field(name, value);
        }
        s.finish()
    }
}

impl Serialize for DataObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// =============================================================================
// TYPED EXTRACTION
// =============================================================================

/// Reads a Rust value back out of a [`Value`]. No coercion is attempted.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, ConversionError>;
}

macro_rules! int_from_value {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, ConversionError> {
                    match value {
                        Value::Int(i) => <$ty>::try_from(*i)
                            .map_err(|_| ConversionError::Mismatch {
                                expected: stringify!($ty).to_string(),
                                found: format!("int {i}"),
                            }),
                        other => Err(ConversionError::mismatch(stringify!($ty), other)),
                    }
                }
            }
        )*
    };
}

int_from_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Float(x) => Ok(*x),
            other => Err(ConversionError::mismatch("f64", other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(ConversionError::mismatch("bool", other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            other => Err(ConversionError::mismatch("String", other)),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl FromValue for DataObject {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Object(object) => Ok(object.clone()),
            other => Err(ConversionError::mismatch("object", other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            other => Err(ConversionError::mismatch("list", other)),
        }
    }
}

impl<T: FromValue> FromValue for Box<T> {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        T::from_value(value).map(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataObject {
        DataObject::new(
            "User",
            vec![
                ("id".to_string(), Value::Int(1)),
                ("name".to_string(), Value::from("first")),
                ("tags".to_string(), Value::from(vec!["a", "b"])),
            ],
        )
    }

    #[test]
    fn test_extract_reads_fields_in_their_rust_types() {
        let object = sample();
        assert_eq!(object.extract::<i64>("id").unwrap(), 1);
        assert_eq!(object.extract::<String>("name").unwrap(), "first");
        assert_eq!(
            object.extract::<Vec<String>>("tags").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_absent_field_reads_as_null() {
        let object = sample();
        assert_eq!(object.extract::<Option<i64>>("missing").unwrap(), None);
        assert!(object.extract::<i64>("missing").is_err());
    }

    #[test]
    fn test_extract_does_not_coerce() {
        let object = sample();
        let err = object.extract::<f64>("id").unwrap_err();
        assert_eq!(
            err.to_string(),
            "field 'id' of `User`: expected f64, found int"
        );
    }

    #[test]
    fn test_narrowing_out_of_range_is_a_mismatch() {
        let err = u8::from_value(&Value::Int(300)).unwrap_err();
        assert!(matches!(err, ConversionError::Mismatch { .. }));
    }

    #[test]
    fn test_object_debug_lists_fields_in_order() {
        assert_eq!(
            format!("{:?}", sample()),
            r#"User { id: 1, name: "first", tags: ["a", "b"] }"#
        );
    }

    #[test]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Str("x".into()));
    }
}

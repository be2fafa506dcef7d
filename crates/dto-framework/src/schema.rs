//! # Target-Type Schema
//!
//! A value type is described by a [`TypeDescriptor`]: a name and an ordered list of
//! [`FieldDescriptor`]s. Each field carries a structured [`TypeExpr`] so the converter
//! can tell scalars, nested value types, optionals, lists and forward references apart
//! without parsing anything at conversion time.
//!
//! Self-referential and mutually referential types cannot hold each other's descriptor
//! directly (the descriptor would have to exist before itself), so they point at each
//! other by name with [`TypeExpr::Forward`]. Names are resolved per conversion call.

use crate::value::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Opaque scalar types. The converter passes values of these through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Bool,
    Int,
    Float,
    Str,
    /// Any value at all, including unconverted records.
    Any,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::Bool => "bool",
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Str => "str",
            ScalarType::Any => "any",
        };
        f.write_str(name)
    }
}

/// The declared type of a field.
#[derive(Debug, Clone)]
pub enum TypeExpr {
    Scalar(ScalarType),
    /// A nested value type, already bound.
    Value(Arc<TypeDescriptor>),
    Optional(Box<TypeExpr>),
    List(Box<TypeExpr>),
    /// A value type referred to by name, bound through the call's registry.
    Forward(String),
}

impl TypeExpr {
    pub fn bool() -> Self {
        TypeExpr::Scalar(ScalarType::Bool)
    }

    pub fn int() -> Self {
        TypeExpr::Scalar(ScalarType::Int)
    }

    pub fn float() -> Self {
        TypeExpr::Scalar(ScalarType::Float)
    }

    pub fn str() -> Self {
        TypeExpr::Scalar(ScalarType::Str)
    }

    pub fn any() -> Self {
        TypeExpr::Scalar(ScalarType::Any)
    }

    pub fn value(descriptor: TypeDescriptor) -> Self {
        TypeExpr::Value(Arc::new(descriptor))
    }

    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Optional(Box::new(inner))
    }

    pub fn list(element: TypeExpr) -> Self {
        TypeExpr::List(Box::new(element))
    }

    pub fn forward(name: impl Into<String>) -> Self {
        TypeExpr::Forward(name.into())
    }

    /// What kind of type expression this is, for error messages.
    pub fn describe(&self) -> String {
        match self {
            TypeExpr::Scalar(scalar) => format!("scalar type `{scalar}`"),
            TypeExpr::Value(descriptor) => format!("value type `{}`", descriptor.name()),
            TypeExpr::Optional(_) => format!("optional wrapper `{self}`"),
            TypeExpr::List(_) => format!("list wrapper `{self}`"),
            TypeExpr::Forward(name) => format!("forward reference '{name}'"),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Scalar(scalar) => write!(f, "{scalar}"),
            TypeExpr::Value(descriptor) => f.write_str(descriptor.name()),
            TypeExpr::Optional(inner) => write!(f, "Optional[{inner}]"),
            TypeExpr::List(element) => write!(f, "List[{element}]"),
            TypeExpr::Forward(name) => write!(f, "'{name}'"),
        }
    }
}

impl From<TypeDescriptor> for TypeExpr {
    fn from(descriptor: TypeDescriptor) -> Self {
        TypeExpr::value(descriptor)
    }
}

/// Produces the value of a field the source record does not carry.
pub type DefaultFactory = Arc<dyn Fn() -> Value + Send + Sync>;

/// What a field falls back to when the record has no attribute of the same name.
#[derive(Clone, Default)]
pub enum FieldDefault {
    #[default]
    None,
    Value(Value),
    /// Called once per conversion that needs it.
    Factory(DefaultFactory),
}

impl FieldDefault {
    /// The fallback value, or `None` if the field has no default.
    pub fn produce(&self) -> Option<Value> {
        match self {
            FieldDefault::None => None,
            FieldDefault::Value(value) => Some(value.clone()),
            FieldDefault::Factory(factory) => Some(factory()),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::None => write!(f, "None"),
            FieldDefault::Value(value) => write!(f, "Value({value:?})"),
            FieldDefault::Factory(_) => write!(f, "Factory(..)"),
        }
    }
}

/// One declared field of a value type.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeExpr,
    pub default: FieldDefault,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            default: FieldDefault::None,
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = FieldDefault::Value(value.into());
        self
    }

    pub fn with_default_factory(mut self, factory: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = FieldDefault::Factory(Arc::new(factory));
        self
    }
}

/// A named, ordered collection of fields. Immutable once built and shared behind `Arc`.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field (builder style).
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Checks the descriptor is well formed.
    ///
    /// The name must be an identifier, and field names must be non-empty and unique.
    pub fn validate(&self) -> Result<(), String> {
        if !is_identifier(&self.name) {
            return Err(format!("type name {:?} is not an identifier", self.name));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err("empty field name".to_string());
            }
            if !seen.insert(field.name.as_str()) {
                return Err(format!("duplicate field '{}'", field.name));
            }
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_annotation_style() {
        let ty = TypeExpr::optional(TypeExpr::list(TypeExpr::forward("Node")));
        assert_eq!(ty.to_string(), "Optional[List['Node']]");
        assert_eq!(TypeExpr::list(TypeExpr::int()).to_string(), "List[int]");
    }

    #[test]
    fn test_validate_rejects_duplicate_fields() {
        let descriptor = TypeDescriptor::new("User")
            .field(FieldDescriptor::new("id", TypeExpr::int()))
            .field(FieldDescriptor::new("id", TypeExpr::str()));
        assert_eq!(descriptor.validate(), Err("duplicate field 'id'".to_string()));
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        assert!(TypeDescriptor::new("").validate().is_err());
        assert!(TypeDescriptor::new("1User").validate().is_err());
        assert!(TypeDescriptor::new("User Profile").validate().is_err());
        assert!(TypeDescriptor::new("_User2").validate().is_ok());
    }

    #[test]
    fn test_factory_runs_on_every_produce() {
        use std::sync::atomic::{AtomicI64, Ordering};
        let counter = Arc::new(AtomicI64::new(0));
        let seen = counter.clone();
        let field = FieldDescriptor::new("n", TypeExpr::int())
            .with_default_factory(move || Value::Int(seen.fetch_add(1, Ordering::SeqCst)));

        assert_eq!(field.default.produce(), Some(Value::Int(0)));
        assert_eq!(field.default.produce(), Some(Value::Int(1)));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}

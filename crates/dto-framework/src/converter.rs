//! # Record → Value-Object Converter
//!
//! This module holds the recursive conversion routine. Given a source record, a target
//! value type and the related types of the call, it walks the target's fields in
//! declaration order and fills each one from the same-named record attribute:
//!
//! * **Scalar** fields take the attribute value unchanged.
//! * **Nested** value-type fields convert the related record recursively.
//! * **List** fields of a value type call `fetch_all` on the relation and convert every
//!   member, keeping source order.
//! * Fields the record does not carry use their default, or fail the call.
//!
//! # Forward References
//! Field types that name a value type (self-reference, or a type declared later) are
//! resolved against a [`TypeRegistry`] seeded at call entry with the target and the
//! caller's related types. The registry lives on the stack of one call, so the
//! [`Converter`] itself is stateless and can be shared freely between threads.

use crate::error::ConversionError;
use crate::record::{RecordRef, SourceRecord};
use crate::registry::TypeRegistry;
use crate::schema::{FieldDescriptor, TypeDescriptor, TypeExpr};
use crate::value::{DataObject, Value};
use crate::value_type::ValueType;
use std::sync::Arc;
use tracing::{debug, debug_span, trace, warn};

/// Converts source records into value objects.
///
/// # Example
///
/// ```rust
/// use dto_framework::mock::MockRecord;
/// use dto_framework::{Converter, FieldDescriptor, ToDto, TypeDescriptor, TypeExpr, Value};
///
/// let user = TypeExpr::value(
///     TypeDescriptor::new("User")
///         .field(FieldDescriptor::new("id", TypeExpr::int()))
///         .field(FieldDescriptor::new("name", TypeExpr::str())),
/// );
/// let record = MockRecord::new("User").with("id", 1).with("name", "first");
///
/// let object = Converter::new().to_dto(&record.into(), &user, &[]).unwrap();
/// assert_eq!(object.get("name"), Some(&Value::from("first")));
/// ```
pub trait ToDto {
    /// Converts `source` into an object of type `target`.
    ///
    /// `related` lists the value types that forward references in the target graph may
    /// name. The target itself is always available to its own forward references.
    fn to_dto(
        &self,
        source: &Value,
        target: &TypeExpr,
        related: &[TypeExpr],
    ) -> Result<DataObject, ConversionError>;

    /// Converts a record straight into a Rust value type.
    fn convert_to<T: ValueType>(
        &self,
        source: &RecordRef,
        related: &[TypeExpr],
    ) -> Result<T, ConversionError>
    where
        Self: Sized,
    {
        let object = self.to_dto(&Value::Record(Arc::clone(source)), &T::target(), related)?;
        T::from_object(&object)
    }
}

/// The default, stateless [`ToDto`] implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Converter;

impl Converter {
    pub fn new() -> Self {
        Self
    }
}

impl ToDto for Converter {
    fn to_dto(
        &self,
        source: &Value,
        target: &TypeExpr,
        related: &[TypeExpr],
    ) -> Result<DataObject, ConversionError> {
        let target = as_descriptor(target)
            .map_err(|found| ConversionError::InvalidTarget { found })?;
        let related = related
            .iter()
            .enumerate()
            .map(|(index, ty)| {
                as_descriptor(ty).map_err(|found| ConversionError::InvalidRelated { index, found })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let record = match source {
            Value::Record(record) => record.as_ref(),
            other => {
                return Err(ConversionError::NotARecord {
                    found: other.kind(),
                })
            }
        };

        let span = debug_span!("convert", target = target.name());
        let _enter = span.enter();
        debug!(related = related.len(), model = record.model_name(), "Converting");

        let registry = TypeRegistry::seeded(&target, &related);
        let result = Conversion {
            registry: &registry,
        }
        .build_object(record, &target);

        if let Err(e) = &result {
            warn!(error = %e, "Conversion failed");
        }
        result
    }
}

/// Converts `source` with a default [`Converter`].
pub fn convert(
    source: &Value,
    target: &TypeExpr,
    related: &[TypeExpr],
) -> Result<DataObject, ConversionError> {
    Converter.to_dto(source, target, related)
}

/// Accepts only well-formed value types; otherwise describes what was passed instead.
fn as_descriptor(ty: &TypeExpr) -> Result<Arc<TypeDescriptor>, String> {
    match ty {
        TypeExpr::Value(descriptor) => {
            descriptor.validate().map_err(|reason| {
                format!("malformed value type `{}` ({reason})", descriptor.name())
            })?;
            Ok(Arc::clone(descriptor))
        }
        other => Err(other.describe()),
    }
}

// =============================================================================
// FIELD-TYPE RESOLUTION
// =============================================================================

/// What the converter needs to know about a declared field type.
#[derive(Debug, Clone)]
pub struct FieldShape {
    /// The value type to convert into, or `None` for scalar pass-through.
    pub element: Option<Arc<TypeDescriptor>>,
    pub is_collection: bool,
}

/// Unwraps an optional, then a list, then binds a forward name.
///
/// Only one level of each wrapper is looked through. Anything that is not a value type
/// after unwrapping (a scalar, a nested list, an optional inside a list) is opaque.
pub fn resolve_field_type(
    declared: &TypeExpr,
    registry: &TypeRegistry,
) -> Result<FieldShape, ConversionError> {
    let mut ty = declared;
    if let TypeExpr::Optional(inner) = ty {
        ty = inner.as_ref();
    }
    let mut is_collection = false;
    if let TypeExpr::List(element) = ty {
        ty = element.as_ref();
        is_collection = true;
    }
    let element = match ty {
        TypeExpr::Value(descriptor) => Some(Arc::clone(descriptor)),
        TypeExpr::Forward(name) => Some(Arc::clone(registry.resolve(name)?)),
        TypeExpr::Scalar(_) | TypeExpr::Optional(_) | TypeExpr::List(_) => None,
    };
    Ok(FieldShape {
        element,
        is_collection,
    })
}

// =============================================================================
// THE RECURSIVE WALK
// =============================================================================

/// State of one top-level call.
struct Conversion<'r> {
    registry: &'r TypeRegistry,
}

impl Conversion<'_> {
    fn build_object(
        &self,
        record: &dyn SourceRecord,
        target: &TypeDescriptor,
    ) -> Result<DataObject, ConversionError> {
        trace!(type_name = target.name(), model = record.model_name(), "Building object");
        let mut fields = Vec::with_capacity(target.fields().len());
        for field in target.fields() {
            let value = match record.attribute(&field.name) {
                Some(value) => self.field_value(target, field, value)?,
                None => field
                    .default
                    .produce()
                    .ok_or_else(|| ConversionError::MissingField {
                        field: field.name.clone(),
                        record: record.describe(),
                    })?,
            };
            fields.push((field.name.clone(), value));
        }
        Ok(DataObject::new(target.name(), fields))
    }

    fn field_value(
        &self,
        owner: &TypeDescriptor,
        field: &FieldDescriptor,
        value: Value,
    ) -> Result<Value, ConversionError> {
        let shape = resolve_field_type(&field.ty, self.registry)?;
        match shape.element {
            Some(element) if shape.is_collection && !value.is_null() => {
                self.build_list(value, &element)
            }
            Some(element) if !value.is_null() => self.build_nested(owner, field, value, &element),
            _ => Ok(value),
        }
    }

    fn build_list(&self, value: Value, element: &TypeDescriptor) -> Result<Value, ConversionError> {
        let Value::Related(related) = value else {
            return Err(ConversionError::NotACollection {
                value: value.describe(),
                element: element.name().to_string(),
            });
        };
        let records = related.fetch_all();
        trace!(element = element.name(), count = records.len(), "Fetched related records");
        records
            .iter()
            .map(|record| self.build_object(record.as_ref(), element).map(Value::Object))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }

    fn build_nested(
        &self,
        owner: &TypeDescriptor,
        field: &FieldDescriptor,
        value: Value,
        element: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        match value {
            Value::Record(record) => self.build_object(record.as_ref(), element).map(Value::Object),
            other => Err(ConversionError::InvalidField {
                type_name: owner.name().to_string(),
                field: field.name.clone(),
                source: Box::new(ConversionError::NotARecord {
                    found: other.kind(),
                }),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> Arc<TypeDescriptor> {
        Arc::new(
            TypeDescriptor::new("Node")
                .field(FieldDescriptor::new("id", TypeExpr::int()))
                .field(FieldDescriptor::new(
                    "children",
                    TypeExpr::list(TypeExpr::forward("Node")),
                )),
        )
    }

    #[test]
    fn test_optional_list_of_forward_name_resolves_to_collection() {
        let node = node();
        let registry = TypeRegistry::seeded(&node, None);
        let declared = TypeExpr::optional(TypeExpr::list(TypeExpr::forward("Node")));

        let shape = resolve_field_type(&declared, &registry).unwrap();
        assert!(shape.is_collection);
        assert!(Arc::ptr_eq(&shape.element.unwrap(), &node));
    }

    #[test]
    fn test_list_of_scalars_is_opaque() {
        let registry = TypeRegistry::seeded(&node(), None);
        let shape = resolve_field_type(&TypeExpr::list(TypeExpr::str()), &registry).unwrap();
        assert!(shape.is_collection);
        assert!(shape.element.is_none());
    }

    #[test]
    fn test_only_one_wrapper_level_is_unwrapped() {
        let registry = TypeRegistry::seeded(&node(), None);
        let declared = TypeExpr::list(TypeExpr::optional(TypeExpr::forward("Node")));
        let shape = resolve_field_type(&declared, &registry).unwrap();
        assert!(shape.element.is_none());
    }

    #[test]
    fn test_unknown_forward_name_fails() {
        let registry = TypeRegistry::seeded(&node(), None);
        let err = resolve_field_type(&TypeExpr::forward("Leaf"), &registry).unwrap_err();
        assert!(matches!(err, ConversionError::UnresolvedReference { name } if name == "Leaf"));
    }

    #[test]
    fn test_malformed_target_is_rejected_before_the_walk() {
        let target = TypeExpr::value(
            TypeDescriptor::new("Twice")
                .field(FieldDescriptor::new("a", TypeExpr::int()))
                .field(FieldDescriptor::new("a", TypeExpr::int())),
        );
        let err = convert(&Value::Null, &target, &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The target should be a value type, not malformed value type `Twice` (duplicate field 'a')"
        );
    }
}

//! # Forward-Reference Registry
//!
//! Symbol table for one top-level conversion. Built at call entry from the target type
//! and the caller's related types, dropped when the call returns. Nothing here is global,
//! so concurrent conversions with different related types never see each other's names.

use crate::error::ConversionError;
use crate::schema::TypeDescriptor;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Name → descriptor mapping scoped to a single conversion call.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the target first, then each related type in order.
    pub fn seeded<'a>(
        target: &Arc<TypeDescriptor>,
        related: impl IntoIterator<Item = &'a Arc<TypeDescriptor>>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(target);
        for descriptor in related {
            registry.register(descriptor);
        }
        registry
    }

    /// Adds a descriptor under its name. The first registration of a name wins.
    pub fn register(&mut self, descriptor: &Arc<TypeDescriptor>) {
        let name = descriptor.name();
        if self.types.contains_key(name) {
            debug!(type_name = name, "Already registered, keeping first");
            return;
        }
        self.types.insert(name.to_string(), Arc::clone(descriptor));
    }

    /// Looks up a forward name.
    pub fn resolve(&self, name: &str) -> Result<&Arc<TypeDescriptor>, ConversionError> {
        self.types
            .get(name)
            .ok_or_else(|| ConversionError::UnresolvedReference {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDescriptor, TypeExpr};

    fn named(name: &str, first_field: &str) -> Arc<TypeDescriptor> {
        Arc::new(TypeDescriptor::new(name).field(FieldDescriptor::new(first_field, TypeExpr::int())))
    }

    #[test]
    fn test_target_wins_over_related_type_with_same_name() {
        let target = named("Node", "id");
        let shadow = named("Node", "other");
        let registry = TypeRegistry::seeded(&target, [&shadow]);

        assert_eq!(registry.len(), 1);
        let resolved = registry.resolve("Node").unwrap();
        assert!(Arc::ptr_eq(resolved, &target));
    }

    #[test]
    fn test_unknown_name_is_an_unresolved_reference() {
        let registry = TypeRegistry::seeded(&named("A", "id"), None);
        let err = registry.resolve("B").unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnresolvedReference {
                name: "B".to_string()
            }
        );
    }
}

//! The field-level view of a tracked model.
//!
//! History is recorded per field, so every model type declares its fields as
//! a closed enumeration together with a value type that can carry any one of
//! them. Implementations are written by hand next to the model; there is no
//! runtime introspection.

use std::fmt;
use std::hash::Hash;

/// An immutable value describing one entity's complete state at an instant.
///
/// Models are never edited in place. [`TrackedModel::with_value`] returns a
/// new model, which keeps every recorded checkpoint and delta unchanged after
/// the fact.
///
/// `Default` describes the "nothing known yet" state; fields whose value
/// equals the default's are left out of a model's initial delta.
pub trait TrackedModel: Clone + PartialEq + Default + fmt::Debug {
    /// Names of the model's fields.
    type Field: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + 'static;

    /// A value for any one field. Each value knows which field it belongs to.
    type Value: Clone + PartialEq + fmt::Debug;

    /// Every field, in declaration order.
    const FIELDS: &'static [Self::Field];

    /// Reads one field.
    fn get(&self, field: Self::Field) -> Self::Value;

    /// Returns a copy of this model with one field replaced.
    #[must_use]
    fn with_value(self, value: Self::Value) -> Self;

    /// Returns the field a value belongs to.
    fn field_of(value: &Self::Value) -> Self::Field;
}

//! Field-by-field model comparison.

use crate::model::TrackedModel;

/// A change to a single field between two models.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldChange<M: TrackedModel> {
    /// The field that changed.
    pub field: M::Field,
    /// The value before the change.
    pub old: M::Value,
    /// The value after the change.
    pub new: M::Value,
}

impl<M: TrackedModel> FieldChange<M> {
    /// Creates a new field change.
    #[must_use]
    pub fn new(field: M::Field, old: M::Value, new: M::Value) -> Self {
        Self { field, old, new }
    }
}

/// Compares two models field by field.
///
/// Returns one entry per field whose value differs, in field declaration
/// order. Equal models produce an empty list.
#[must_use]
pub fn diff_models<M: TrackedModel>(old: &M, new: &M) -> Vec<FieldChange<M>> {
    M::FIELDS
        .iter()
        .filter_map(|&field| {
            let before = old.get(field);
            let after = new.get(field);
            (before != after).then(|| FieldChange::new(field, before, after))
        })
        .collect()
}

/// Returns every field of `model` whose value differs from the default model's.
///
/// This is the changed-field set of a model's very first delta.
#[must_use]
pub fn populated_fields<M: TrackedModel>(model: &M) -> Vec<(M::Field, M::Value)> {
    let blank = M::default();
    M::FIELDS
        .iter()
        .filter_map(|&field| {
            let value = model.get(field);
            (value != blank.get(field)).then_some((field, value))
        })
        .collect()
}

// Form submission builders for create and update mutations
// Author: Gabriel Demetrios Lafis

use std::collections::BTreeMap;

use serde_json::{Map as JsonMap, Value as JsonValue};
use thiserror::Error;

use crate::schema::{coerce, Model, Value};

/// Represents an error in the forms module
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// An update submission whose diff is empty. A validation message for
    /// the user, never a network call.
    #[error("no changes to save")]
    NoChanges,
}

/// Check whether a field is auto-generated and therefore excluded from
/// form submissions: the primary key, any field named `id`, and the
/// `*_at` / `*_id` naming conventions.
pub fn is_generated(model: &Model, name: &str) -> bool {
    name == model.primary_key || name == "id" || name.contains("_at") || name.contains("_id")
}

/// Build the record for a create mutation.
///
/// Auto-generated fields and empty inputs are dropped; the rest are
/// coerced by their declared category. Fields the model does not declare
/// pass through as text.
pub fn build_create(model: &Model, form: &BTreeMap<String, String>) -> JsonMap<String, JsonValue> {
    let mut record = JsonMap::new();

    for (name, raw) in form {
        if is_generated(model, name) || raw.is_empty() {
            continue;
        }
        let value = coerce(raw, model.category_of(name));
        record.insert(name.clone(), value.to_json());
    }

    record
}

/// Build the diff for an update mutation.
///
/// On top of the create-side drops, any field whose coerced value matches
/// the stored record is omitted so only actual changes travel. An empty
/// diff is the `NoChanges` condition.
pub fn build_update(
    model: &Model,
    initial: &JsonMap<String, JsonValue>,
    form: &BTreeMap<String, String>,
) -> Result<JsonMap<String, JsonValue>, FormError> {
    let mut diff = JsonMap::new();

    for (name, raw) in form {
        if is_generated(model, name) {
            continue;
        }

        let value = coerce(raw, model.category_of(name));
        let unchanged = initial
            .get(name)
            .map(|stored| value.eq_loose(&Value::from_json(stored)))
            .unwrap_or(false);

        if !unchanged {
            diff.insert(name.clone(), value.to_json());
        }
    }

    if diff.is_empty() {
        return Err(FormError::NoChanges);
    }

    Ok(diff)
}

//! Recursive string transform over JSON values

use serde_json::Value;

/// Apply `f` to every string leaf of `value`, preserving structure.
///
/// Arrays keep their order, objects keep their key set and insertion order,
/// and keys themselves are never transformed. Numbers, booleans, and null
/// pass through untouched. Total for any well-formed value; recursion depth
/// is bounded by the input's nesting depth.
pub fn transform_value<F>(value: Value, f: &F) -> Value
where
    F: Fn(&str) -> String,
{
    match value {
        Value::String(s) => Value::String(f(&s)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| transform_value(item, f))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, transform_value(item, f)))
                .collect(),
        ),
        other => other,
    }
}

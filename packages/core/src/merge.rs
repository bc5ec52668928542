//! Recursive map merging: objects merge, everything else replaces.

use crate::{Map, Value};

/// Deep-merge `source` into `target`.
///
/// For each key in `source`: object values are merged recursively into the
/// corresponding target entry (an absent or non-object target entry is
/// replaced by an empty object first); arrays and scalars overwrite the
/// target entry wholesale, never element-by-element. Untouched branches of
/// `target` are preserved.
pub fn deep_merge(target: &mut Map, source: Map) {
    for (key, value) in source {
        match value {
            Value::Object(source_map) => {
                let slot = target
                    .entry(key)
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                match slot {
                    Value::Object(target_map) => deep_merge(target_map, source_map),
                    _ => unreachable!("slot was just made an object"),
                }
            }
            other => {
                target.insert(key, other);
            }
        }
    }
}

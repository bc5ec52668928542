//! Expansion of dotted flat keys into nested maps (the inverse of
//! flattening).

use crate::{Map, Value};

/// Expand a flat map whose keys may contain `.`-separated segments into the
/// equivalent nested map.
///
/// `{"a.b.c": 1}` becomes `{"a": {"b": {"c": 1}}}`. Keys without `.` pass
/// through at the top level. Dotted keys sharing a prefix land in the same
/// branch; a non-object value occupying an intermediate slot is replaced by
/// an object. Keys are assumed to have no empty segments (callers normalize
/// through [`crate::Path`] first).
pub fn expand(flat: Map) -> Map {
    let mut nested = Map::new();

    for (key, value) in flat {
        if !key.contains('.') {
            nested.insert(key, value);
            continue;
        }

        let segments: Vec<&str> = key.split('.').collect();
        let (last, parents) = segments
            .split_last()
            .expect("split always yields at least one segment");

        let mut cursor = &mut nested;
        for segment in parents {
            let slot = cursor
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            cursor = match slot {
                Value::Object(map) => map,
                _ => unreachable!("slot was just made an object"),
            };
        }
        cursor.insert(last.to_string(), value);
    }

    nested
}

//! Safe navigation and mutation of nested JSON maps.
//!
//! Missing or non-object intermediate segments never fail: reads
//! short-circuit to `None` and removals are idempotent no-ops. The root path
//! has no single value inside the map, so [`get_path`] and [`remove_path`]
//! treat it as absent; whole-document reads and replacement belong to the
//! store layer.

use crate::{Map, Path, Value};

/// Get a reference to the value at `path`, or `None` if any segment along the
/// way is missing or not an object.
pub fn get_path<'a>(data: &'a Map, path: &Path) -> Option<&'a Value> {
    let mut segments = path.iter();
    let mut cursor = data.get(segments.next()?)?;
    for segment in segments {
        cursor = cursor.as_object()?.get(segment)?;
    }
    Some(cursor)
}

/// Mutable variant of [`get_path`].
pub fn get_path_mut<'a>(data: &'a mut Map, path: &Path) -> Option<&'a mut Value> {
    let mut segments = path.iter();
    let mut cursor = data.get_mut(segments.next()?)?;
    for segment in segments {
        cursor = cursor.as_object_mut()?.get_mut(segment)?;
    }
    Some(cursor)
}

/// Whether the key addressed by `path` is present.
///
/// Membership of the final segment is checked on the parent object; absent or
/// non-object parents count as "absent". The root path is always present.
pub fn has_path(data: &Map, path: &Path) -> bool {
    match path.split_last() {
        None => true,
        Some((parent, last)) => {
            if parent.is_root() {
                data.contains_key(last)
            } else {
                matches!(get_path(data, &parent), Some(Value::Object(map)) if map.contains_key(last))
            }
        }
    }
}

/// Remove the key addressed by `path` from its parent object.
///
/// Returns `true` if a value was removed. Missing intermediates and the root
/// path are no-ops returning `false`.
pub fn remove_path(data: &mut Map, path: &Path) -> bool {
    match path.split_last() {
        None => false,
        Some((parent, last)) => {
            if parent.is_root() {
                data.remove(last).is_some()
            } else {
                match get_path_mut(data, &parent) {
                    Some(Value::Object(map)) => map.remove(last).is_some(),
                    _ => false,
                }
            }
        }
    }
}

//! nestdb core: path normalization and the nested-map engine.
//!
//! This layer knows nothing about persistence. It provides the structural
//! pieces the document store is built from:
//! - [`Path`]: a raw key canonicalized into ordered, non-empty segments
//! - [`nested`]: safe navigation and mutation of nested JSON maps
//! - [`merge`]: recursive map merging (objects merge, everything else replaces)
//! - [`expand`]: dotted flat keys expanded back into nested maps
//!
//! # Example
//!
//! ```rust
//! use nestdb_core::{expand, nested, Map, Path};
//! use serde_json::json;
//!
//! let path = Path::normalize("users/alice:age").unwrap();
//! assert_eq!(path.dotted(), "users.alice.age");
//!
//! let mut flat = Map::new();
//! flat.insert(path.dotted(), json!(30));
//! let data = expand::expand(flat);
//! assert_eq!(nested::get_path(&data, &path), Some(&json!(30)));
//! ```

pub mod expand;
pub mod merge;
pub mod nested;
mod path;

pub use path::{Path, PathError};

/// The value type stored in documents.
pub use serde_json::Value;

/// The nested mapping type documents are made of.
pub type Map = serde_json::Map<String, Value>;

//! Path normalization: raw keys canonicalized into segment lists.

use std::fmt;

/// Errors from path normalization.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The raw key was empty.
    #[error("the \"key\" parameter was not provided")]
    EmptyKey,

    /// A separator produced an empty segment (e.g. `"a..b"` or `"a/"`).
    #[error("key '{raw}' has an empty segment at position {position}")]
    EmptySegment { raw: String, position: usize },
}

/// A normalized path: ordered, non-empty string segments.
///
/// Raw keys may use `/`, `:`, or `.` as separators interchangeably; all are
/// canonicalized to `.` before splitting. The literal raw key `"."` names the
/// document root and normalizes to the empty path.
///
/// # Examples
///
/// ```rust
/// use nestdb_core::Path;
///
/// let path = Path::normalize("a/b:c").unwrap();
/// assert_eq!(path.dotted(), "a.b.c");
/// assert_eq!(path.len(), 3);
///
/// assert!(Path::normalize(".").unwrap().is_root());
/// assert!(Path::normalize("a..b").is_err());
/// ```
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The root path: addresses the whole document data map.
    pub fn root() -> Self {
        Path {
            segments: Vec::new(),
        }
    }

    /// Normalize a raw key into a path.
    ///
    /// Empty keys and keys with empty segments are rejected rather than
    /// silently ignored.
    pub fn normalize(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::EmptyKey);
        }
        if raw == "." {
            return Ok(Path::root());
        }

        let canonical = raw.replace(['/', ':'], ".");
        let mut segments = Vec::new();
        for (position, segment) in canonical.split('.').enumerate() {
            if segment.is_empty() {
                return Err(PathError::EmptySegment {
                    raw: raw.to_string(),
                    position,
                });
            }
            segments.push(segment.to_string());
        }

        Ok(Path { segments })
    }

    /// Whether this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Alias for [`Path::is_root`], for iterator-style call sites.
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Iterate over segments.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// The canonical dotted form of this path.
    ///
    /// The root path renders as `"."`.
    pub fn dotted(&self) -> String {
        if self.is_root() {
            ".".to_string()
        } else {
            self.segments.join(".")
        }
    }

    /// Split into the parent path and the final segment.
    ///
    /// Returns `None` for the root path.
    pub fn split_last(&self) -> Option<(Path, &str)> {
        let (last, parents) = self.segments.split_last()?;
        Some((
            Path {
                segments: parents.to_vec(),
            },
            last.as_str(),
        ))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dotted())
    }
}

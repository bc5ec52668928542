//! Persistence backends for nestdb documents.
//!
//! A [`Backend`] stores named [`Document`]s: fetch by id, find-or-create,
//! replace the data map, and measure a round-trip. Two implementations ship
//! here:
//! - [`MemoryBackend`]: process-local, for tests and ephemeral databases
//! - [`JsonFileBackend`]: one JSON file per document under a root directory
//!
//! Backends are transport-level only. Path resolution, merging, and the
//! operation surface live in the store layer.

mod document;
mod error;
mod in_memory;
mod local_disk;
mod traits;

pub use document::Document;
pub use error::BackendError;
pub use in_memory::MemoryBackend;
pub use local_disk::JsonFileBackend;
pub use traits::Backend;

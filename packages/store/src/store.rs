//! The document store façade.

use std::time::Duration;

use nestdb_backend::{Backend, Document};
use nestdb_core::{expand::expand, merge::deep_merge, nested, Map, Path, Value};
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::connect::open_backend;
use crate::{Config, Error};

/// Name of the document addressed when no explicit document is named.
pub const DEFAULT_DOCUMENT: &str = "DEFAULT";

/// A path-addressable key-value store over a document backend.
///
/// Each logical database is one persisted [`Document`] holding a nested map;
/// keys address values inside it using `/`, `:`, or `.` separated paths. The
/// methods on `DocumentStore` operate on the default document; use
/// [`DocumentStore::doc`] for a handle on any other document.
///
/// # Connection lifecycle
///
/// A store is constructed disconnected and connects on the first
/// [`DocumentStore::connect`] call, which is idempotent and memoized.
/// [`DocumentStore::open`] bundles construction and connection. The first
/// connect ensures the default document exists before returning.
///
/// # Concurrency
///
/// Every mutating operation is an independent load-then-save round trip.
/// There is no locking or optimistic concurrency check: two concurrent
/// mutations of the same document race, and the later write wins in full.
///
/// # Example
///
/// ```rust,ignore
/// use nestdb_store::{Config, DocumentStore};
/// use serde_json::json;
///
/// let store = DocumentStore::open(Config::new("mem://")).await?;
/// store.set("users/alice:age", json!(30)).await?;
/// assert_eq!(store.get("users.alice.age").await?, Some(json!(30)));
/// ```
pub struct DocumentStore {
    config: Config,
    backend: OnceCell<Box<dyn Backend>>,
}

impl DocumentStore {
    /// Create a disconnected store, validating the configuration.
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(DocumentStore {
            config,
            backend: OnceCell::new(),
        })
    }

    /// Create a store and connect immediately.
    pub async fn open(config: Config) -> Result<Self, Error> {
        let store = Self::new(config)?;
        store.connect().await?;
        Ok(store)
    }

    /// Establish the backend connection.
    ///
    /// Idempotent: once a connection exists, further calls return without
    /// reinitializing. The first successful connect ensures the default
    /// document exists, then emits a one-time readiness record with the
    /// measured round-trip latency (unless `warn_ready` is disabled).
    pub async fn connect(&self) -> Result<(), Error> {
        self.backend
            .get_or_try_init(|| async {
                let backend = open_backend(&self.config)?;
                backend
                    .create(DEFAULT_DOCUMENT)
                    .await
                    .map_err(|source| Error::Connection { source })?;

                if self.config.warn_ready_enabled() {
                    let latency = backend
                        .ping()
                        .await
                        .map_err(|source| Error::Connection { source })?;
                    info!(ping_ms = latency.as_millis() as u64, "database connected");
                }

                Ok::<_, Error>(backend)
            })
            .await?;
        Ok(())
    }

    /// Whether a backend connection has been established.
    pub fn is_connected(&self) -> bool {
        self.backend.initialized()
    }

    /// The configuration this store was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Measure a backend round trip.
    pub async fn ping(&self) -> Result<Duration, Error> {
        Ok(self.backend()?.ping().await?)
    }

    /// A handle for operating on the named document.
    ///
    /// Documents other than the default are not created automatically; call
    /// [`Doc::ensure`] before the first operation on a new name.
    pub fn doc(&self, name: impl Into<String>) -> Doc<'_> {
        Doc {
            store: self,
            name: name.into(),
        }
    }

    pub(crate) fn backend(&self) -> Result<&dyn Backend, Error> {
        self.backend
            .get()
            .map(|backend| backend.as_ref())
            .ok_or(Error::NotConnected)
    }

    // Convenience delegates against the default document.

    /// Get the value at `key` in the default document. See [`Doc::get`].
    pub async fn get(&self, key: &str) -> Result<Option<Value>, Error> {
        self.doc(DEFAULT_DOCUMENT).get(key).await
    }

    /// Alias for [`DocumentStore::get`].
    pub async fn fetch(&self, key: &str) -> Result<Option<Value>, Error> {
        self.doc(DEFAULT_DOCUMENT).fetch(key).await
    }

    /// Overwrite the value at `key` in the default document. See [`Doc::set`].
    pub async fn set(&self, key: &str, value: Value) -> Result<(), Error> {
        self.doc(DEFAULT_DOCUMENT).set(key, value).await
    }

    /// Merge `value` into `key` in the default document. See [`Doc::update`].
    pub async fn update(&self, key: &str, value: Value) -> Result<(), Error> {
        self.doc(DEFAULT_DOCUMENT).update(key, value).await
    }

    /// Whether `key` is present in the default document. See [`Doc::has`].
    pub async fn has(&self, key: &str) -> Result<bool, Error> {
        self.doc(DEFAULT_DOCUMENT).has(key).await
    }

    /// Delete `key` from the default document. See [`Doc::delete`].
    pub async fn delete(&self, key: &str) -> Result<bool, Error> {
        self.doc(DEFAULT_DOCUMENT).delete(key).await
    }

    /// Append to the array at `key` in the default document. See [`Doc::push`].
    pub async fn push(&self, key: &str, value: Value) -> Result<(), Error> {
        self.doc(DEFAULT_DOCUMENT).push(key, value).await
    }

    /// Remove one element from the array at `key`. See [`Doc::pull`].
    pub async fn pull(&self, key: &str, value: &Value) -> Result<bool, Error> {
        self.doc(DEFAULT_DOCUMENT).pull(key, value).await
    }

    /// Add to the number at `key` in the default document. See [`Doc::add`].
    pub async fn add(&self, key: &str, amount: f64) -> Result<f64, Error> {
        self.doc(DEFAULT_DOCUMENT).add(key, amount).await
    }

    /// Subtract from the number at `key`. See [`Doc::sub`].
    pub async fn sub(&self, key: &str, amount: f64) -> Result<f64, Error> {
        self.doc(DEFAULT_DOCUMENT).sub(key, amount).await
    }
}

/// Operations against one named document of a [`DocumentStore`].
pub struct Doc<'a> {
    store: &'a DocumentStore,
    name: String,
}

impl Doc<'_> {
    /// The document name this handle addresses.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create this document if it does not exist yet.
    pub async fn ensure(&self) -> Result<(), Error> {
        self.store.backend()?.create(&self.name).await?;
        Ok(())
    }

    /// Get the value at `key`.
    ///
    /// The root key `"."` returns the whole data map. Missing intermediate
    /// segments resolve to `Ok(None)` (safe navigation), never an error.
    pub async fn get(&self, key: &str) -> Result<Option<Value>, Error> {
        let result = self.get_impl(key).await;
        self.finish(result)
    }

    /// Alias for [`Doc::get`].
    pub async fn fetch(&self, key: &str) -> Result<Option<Value>, Error> {
        self.get(key).await
    }

    /// Overwrite the value at `key`.
    ///
    /// The dotted key is expanded into a single-path branch and deep-merged
    /// into the document at the root, so sibling branches are preserved; the
    /// leaf itself is replaced wholesale. The root key `"."` replaces the
    /// whole data map and requires an object value.
    pub async fn set(&self, key: &str, value: Value) -> Result<(), Error> {
        let result = self.set_impl(key, value).await;
        self.finish(result)
    }

    /// Merge `value` into the value at `key`.
    ///
    /// Same write path as [`Doc::set`], except an object leaf merges with the
    /// existing object instead of replacing it. This is the safe counterpart
    /// for partial updates.
    pub async fn update(&self, key: &str, value: Value) -> Result<(), Error> {
        let result = self.update_impl(key, value).await;
        self.finish(result)
    }

    /// Whether `key` is present. The root key is always present.
    pub async fn has(&self, key: &str) -> Result<bool, Error> {
        let result = self.has_impl(key).await;
        self.finish(result)
    }

    /// Delete `key`, reporting whether a value was confirmed removed.
    ///
    /// Deleting an absent key returns `Ok(false)`. The root key clears the
    /// whole data map.
    pub async fn delete(&self, key: &str) -> Result<bool, Error> {
        let result = self.delete_impl(key).await;
        self.finish(result)
    }

    /// Append `value` to the array at `key`, creating it if absent.
    pub async fn push(&self, key: &str, value: Value) -> Result<(), Error> {
        let result = self.push_impl(key, value).await;
        self.finish(result)
    }

    /// Remove the first element equal to `value` from the array at `key`.
    ///
    /// Returns `Ok(false)` if no element matched.
    pub async fn pull(&self, key: &str, value: &Value) -> Result<bool, Error> {
        let result = self.pull_impl(key, value).await;
        self.finish(result)
    }

    /// Add `amount` to the number at `key` (default 0), returning the new
    /// value. `amount` must be a non-zero finite number.
    pub async fn add(&self, key: &str, amount: f64) -> Result<f64, Error> {
        let result = self.apply_numeric(key, amount).await;
        self.finish(result)
    }

    /// Subtract `amount` from the number at `key`, returning the new value.
    pub async fn sub(&self, key: &str, amount: f64) -> Result<f64, Error> {
        let result = self.apply_numeric(key, -amount).await;
        self.finish(result)
    }

    // ==================== internals ====================

    /// Attach the configured side-channel log to recoverable failures.
    fn finish<T>(&self, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(err) = &result {
            if err.is_recoverable() && self.store.config.log_errors_enabled() {
                warn!(document = %self.name, error = %err, "operation rejected");
            }
        }
        result
    }

    fn parse_key(&self, key: &str) -> Result<Path, Error> {
        Ok(Path::normalize(key)?)
    }

    async fn load(&self) -> Result<Document, Error> {
        self.store
            .backend()?
            .fetch(&self.name)
            .await?
            .ok_or_else(|| Error::NotFound {
                name: self.name.clone(),
            })
    }

    async fn save(&self, data: Map) -> Result<(), Error> {
        self.store.backend()?.put(&self.name, data).await?;
        Ok(())
    }

    async fn get_impl(&self, key: &str) -> Result<Option<Value>, Error> {
        let path = self.parse_key(key)?;
        let doc = self.load().await?;
        if path.is_root() {
            return Ok(Some(Value::Object(doc.data)));
        }
        Ok(nested::get_path(&doc.data, &path).cloned())
    }

    async fn set_impl(&self, key: &str, value: Value) -> Result<(), Error> {
        let path = self.parse_key(key)?;
        let mut doc = self.load().await?;

        if path.is_root() {
            match value {
                Value::Object(map) => doc.data = map,
                _ => {
                    return Err(Error::TypeMismatch {
                        path: path.dotted(),
                        expected: "an object",
                    })
                }
            }
        } else {
            // Replace the leaf wholesale, keep sibling branches.
            nested::remove_path(&mut doc.data, &path);
            deep_merge(&mut doc.data, single_branch(&path, value));
        }

        self.save(doc.data).await
    }

    async fn update_impl(&self, key: &str, value: Value) -> Result<(), Error> {
        let path = self.parse_key(key)?;
        let mut doc = self.load().await?;

        if path.is_root() {
            match value {
                Value::Object(map) => deep_merge(&mut doc.data, map),
                _ => {
                    return Err(Error::TypeMismatch {
                        path: path.dotted(),
                        expected: "an object",
                    })
                }
            }
        } else {
            deep_merge(&mut doc.data, single_branch(&path, value));
        }

        self.save(doc.data).await
    }

    async fn has_impl(&self, key: &str) -> Result<bool, Error> {
        let path = self.parse_key(key)?;
        let doc = self.load().await?;
        Ok(nested::has_path(&doc.data, &path))
    }

    async fn delete_impl(&self, key: &str) -> Result<bool, Error> {
        let path = self.parse_key(key)?;
        let mut doc = self.load().await?;

        if !nested::has_path(&doc.data, &path) {
            return Ok(false);
        }

        if path.is_root() {
            self.save(Map::new()).await?;
            return Ok(true);
        }

        nested::remove_path(&mut doc.data, &path);
        self.save(doc.data).await?;

        // Confirm removal against a fresh snapshot.
        let doc = self.load().await?;
        Ok(!nested::has_path(&doc.data, &path))
    }

    async fn push_impl(&self, key: &str, value: Value) -> Result<(), Error> {
        let path = self.parse_key(key)?;
        let mut items = match self.get_impl(key).await? {
            None => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(Error::TypeMismatch {
                    path: path.dotted(),
                    expected: "an array",
                })
            }
        };

        items.push(value);
        self.set_impl(key, Value::Array(items)).await
    }

    async fn pull_impl(&self, key: &str, value: &Value) -> Result<bool, Error> {
        let path = self.parse_key(key)?;
        let mut items = match self.get_impl(key).await? {
            None => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(Error::TypeMismatch {
                    path: path.dotted(),
                    expected: "an array",
                })
            }
        };

        let Some(index) = items.iter().position(|item| item == value) else {
            return Ok(false);
        };

        items.remove(index);
        self.set_impl(key, Value::Array(items)).await?;
        Ok(true)
    }

    async fn apply_numeric(&self, key: &str, delta: f64) -> Result<f64, Error> {
        let path = self.parse_key(key)?;

        if delta == 0.0 || !delta.is_finite() {
            return Err(Error::TypeMismatch {
                path: path.dotted(),
                expected: "a non-zero finite number",
            });
        }

        let current = match self.get_impl(key).await? {
            None => 0.0,
            Some(Value::Number(n)) => n.as_f64().ok_or(Error::TypeMismatch {
                path: path.dotted(),
                expected: "a number",
            })?,
            Some(_) => {
                return Err(Error::TypeMismatch {
                    path: path.dotted(),
                    expected: "a number",
                })
            }
        };

        let next = current + delta;
        let value = if next.fract() == 0.0 && next.abs() <= i64::MAX as f64 {
            Value::from(next as i64)
        } else {
            serde_json::Number::from_f64(next)
                .map(Value::Number)
                .ok_or(Error::TypeMismatch {
                    path: path.dotted(),
                    expected: "a finite number",
                })?
        };

        self.set_impl(key, value).await?;
        Ok(next)
    }
}

/// Build the nested single-path branch `{a: {b: {c: value}}}` for a path.
fn single_branch(path: &Path, value: Value) -> Map {
    let mut flat = Map::new();
    flat.insert(path.dotted(), value);
    expand(flat)
}

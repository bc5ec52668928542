//! Backend selection by connection URL.

use nestdb_backend::{Backend, JsonFileBackend, MemoryBackend};
use url::Url;

use crate::{Config, Error};

/// Open the backend named by the configuration URL.
///
/// * `mem://` (or `memory://`) - a fresh [`MemoryBackend`]
/// * `file://<absolute dir>` - a [`JsonFileBackend`]; the `create_missing`
///   passthrough option (`"true"`) creates the directory if absent
pub(crate) fn open_backend(config: &Config) -> Result<Box<dyn Backend>, Error> {
    let url = Url::parse(config.url()).map_err(|err| Error::Configuration {
        message: format!("invalid connection url '{}': {}", config.url(), err),
    })?;

    match url.scheme() {
        "mem" | "memory" => Ok(Box::new(MemoryBackend::new())),
        "file" => {
            let root = url.to_file_path().map_err(|_| Error::Configuration {
                message: format!(
                    "file url '{}' does not name an absolute directory",
                    config.url()
                ),
            })?;

            let create_missing = config
                .backend_options()
                .get("create_missing")
                .is_some_and(|v| v == "true");

            let backend = if create_missing {
                JsonFileBackend::create(root)
            } else {
                JsonFileBackend::open(root)
            }
            .map_err(|source| Error::Connection { source })?;

            Ok(Box::new(backend))
        }
        other => Err(Error::Configuration {
            message: format!("unsupported backend scheme '{}'", other),
        }),
    }
}

use std::path::Path;
use std::sync::Arc;

use nf_core::{ArticleStore, Error, Result};

pub mod backends;

pub use backends::*;

/// Build a storage backend by name, as selected on the command line.
pub async fn create_storage(
    kind: &str,
    db_path: Option<&Path>,
) -> Result<Arc<dyn ArticleStore>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStorage::new().await?)),
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let path = db_path
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| std::path::PathBuf::from("newsflow.db"));
            Ok(Arc::new(SqliteStorage::new_with_path(&path).await?))
        }
        other => Err(Error::Storage(format!(
            "unknown storage backend: {}",
            other
        ))),
    }
}

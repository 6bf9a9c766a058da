use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use superlists::config::StorageConfig;
use superlists::lists::{LocalListRepository, RepositoryError};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Open the list store described by `storage`: snapshot-backed when a path is
/// configured, purely in memory otherwise.
pub(crate) fn open_repository(
    storage: &StorageConfig,
) -> Result<LocalListRepository, RepositoryError> {
    match &storage.snapshot_path {
        Some(path) => {
            let repository = LocalListRepository::open(path)?;
            info!(path = %path.display(), "list store backed by snapshot file");
            Ok(repository)
        }
        None => {
            info!("list store kept in memory only");
            Ok(LocalListRepository::in_memory())
        }
    }
}

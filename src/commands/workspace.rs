use crate::commands::settings::{data_dir, load_settings, Settings, StorageBackend};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, SqliteStore};
use crate::store::DebtStore;
use std::sync::{Arc, Mutex};

/// Everything the UI needs after picking a workspace.
pub struct WorkspaceHandle {
    pub path: String,
    pub settings: Settings,
    pub store: Arc<Mutex<DebtStore>>,
}

pub fn open_workspace(workspace_path: &str) -> Result<WorkspaceHandle, String> {
    let settings = load_settings(workspace_path)?;
    crate::init_logging(settings.log_level.as_str());

    let backend = open_backend(workspace_path, settings.storage_backend)?;
    let store = DebtStore::load(backend, settings.storage_key.clone());
    log::info!(
        "Opened workspace {workspace_path} ({:?} backend, {} debt(s))",
        settings.storage_backend,
        store.len()
    );

    Ok(WorkspaceHandle {
        path: workspace_path.to_string(),
        settings,
        store: Arc::new(Mutex::new(store)),
    })
}

fn open_backend(workspace_path: &str, backend: StorageBackend) -> Result<Box<dyn KeyValueStore>, String> {
    let dir = data_dir(workspace_path);
    let opened: Box<dyn KeyValueStore> = match backend {
        StorageBackend::Sqlite => {
            Box::new(SqliteStore::open(&dir).map_err(|e| format!("DB error: {e}"))?)
        }
        StorageBackend::File => {
            Box::new(FileStore::open(&dir).map_err(|e| format!("Storage error: {e}"))?)
        }
        StorageBackend::Memory => Box::new(MemoryStore::new()),
    };
    Ok(opened)
}

pub mod analysis;
pub mod commands;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use commands::debts::{debt_crud, get_debt_summary, preview_recommendation};
pub use commands::settings::{get_settings, save_settings};
pub use commands::workspace::{open_workspace, WorkspaceHandle};
pub use error::StoreError;
pub use store::DebtStore;

/// Install the env_logger backend. `RUST_LOG` wins over `level`; calling
/// this more than once is harmless.
pub fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env).try_init();
}

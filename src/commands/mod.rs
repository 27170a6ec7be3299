//! Shell-agnostic entry points for a front end.
//!
//! Each function takes plain owned arguments and returns `Result<_, String>`
//! so a desktop shell can expose it as-is (for example behind
//! `#[tauri::command]`) and hand the error text straight to the UI. No shell
//! crate is linked here.

pub mod debts;
pub mod settings;
pub mod workspace;

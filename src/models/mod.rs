pub mod debt;
pub mod snapshot;

pub mod recommendation;
pub mod summary;

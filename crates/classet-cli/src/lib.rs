//! CLI library components for classet.

pub mod apply;
pub mod logging;
pub mod summary;

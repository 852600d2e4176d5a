//! Database repositories for the workflow collections
//!
//! Organized into asset/ (purchase, updates, returns, staging, stock),
//! building, and faculty repositories. Each repository owns one collection
//! family and exposes `*_tx` variants for the multi-statement moves that the
//! services layer wraps in a single transaction.

pub mod asset;
pub mod building;
pub mod faculty;
pub mod transaction;

//! CASFOS Database Library
//!
//! Repositories for every workflow collection plus transaction utilities.
//! Repositories perform no business validation; all workflow invariants are
//! enforced by the services layer before a write.

pub mod db;

pub use db::asset::{
    AssetRepository, ReturnRepository, StagingRepository, StockRepository, UpdateRepository,
};
pub use db::building::BuildingRepository;
pub use db::faculty::FacultyRepository;
pub use db::transaction::TransactionGuard;

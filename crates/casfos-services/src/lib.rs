//! CASFOS Workflow Engine
//!
//! One service per lifecycle: purchase approval, update-after-edit,
//! return/condition-change, terminal staging actions, building pipelines,
//! and the faculty mirror. Services enforce every workflow invariant and
//! wrap each move-between-collections in a single database transaction.

pub mod building;
pub mod faculty;
pub mod purchase;
pub mod returns;
pub mod staging;
pub mod update;

pub use building::BuildingService;
pub use faculty::{FacultyService, FacultyUpdateApproval};
pub use purchase::PurchaseService;
pub use returns::{ReturnOutcome, ReturnService, SubmitReturn};
pub use staging::StagingService;
pub use update::{RejectedUpdateLookup, UpdateApproval, UpdateService};

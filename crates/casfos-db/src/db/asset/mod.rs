//! Asset workflow repositories

pub mod purchase;
pub mod returned;
pub mod staging;
pub mod stock;
pub mod update;

pub use purchase::AssetRepository;
pub use returned::ReturnRepository;
pub use staging::StagingRepository;
pub use stock::StockRepository;
pub use update::UpdateRepository;

//! HTTP handlers, one module per workflow area

pub mod assets;
pub mod buildings;
pub mod faculty;
pub mod files;
pub mod health;
pub mod returns;
pub mod staging;
pub mod updates;
pub mod upload;

//! CASFOS Storage Library
//!
//! Upload adapter abstraction: accepts a file, returns a stable
//! server-relative URL that is stored verbatim on the owning entity.
//!
//! Keys are flat: `uploads/{uuid}-{sanitized-filename}`. Keys must not
//! contain `..` or a leading `/`.

pub mod local;
pub mod traits;

pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};

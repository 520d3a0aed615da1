#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::JsonArchive;
pub use repository::{ArchiveRepository, InMemoryArchive, StorageError};

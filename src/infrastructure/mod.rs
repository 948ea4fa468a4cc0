//! 基础设施层

pub mod json_file;
pub mod logger;
pub mod memory;
pub mod store;

pub use json_file::JsonFileStore;
pub use logger::Logger;
pub use memory::MemoryStore;
pub use store::{Collections, Document, DocumentStore, StoreError, StoreResult};

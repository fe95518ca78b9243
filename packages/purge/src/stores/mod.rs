//! Artifact store implementations.
//!
//! Available backends:
//! - `FileStore` - files under a public root directory
//! - `MemoryStore` - in-memory map, for tests

pub mod filesystem;
pub mod memory;

pub use filesystem::FileStore;
pub use memory::MemoryStore;

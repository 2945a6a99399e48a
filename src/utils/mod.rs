//! Storage utilities.

pub mod persistence;

pub use persistence::{data_dir, load_json, save_json, FileStore, KeyValueStore, MemoryStore};

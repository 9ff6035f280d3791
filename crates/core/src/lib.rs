// crates/core/src/lib.rs
//! Blob storage for the mediadrop server.
//!
//! Uploaded files are held as named byte blobs, one file per blob, under a
//! single root directory. The store knows nothing about jobs or HTTP; it is
//! the leaf the server builds on.

pub mod error;
pub mod store;

pub use error::StorageError;
pub use store::BlobStore;

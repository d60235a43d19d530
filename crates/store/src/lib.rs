//! Durable state for the media map: the JSON data file and the uploads
//! directory.
//!
//! Both live on local disk and are rewritten wholesale; there is no
//! locking between processes.

pub mod error;
pub mod ingest;
pub mod store;

pub use error::StoreError;
pub use ingest::FileIngestor;
pub use store::MediaStore;

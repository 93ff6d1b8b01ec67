//! Hosted image storage for product media.
//!
//! MinIO/S3-compatible client that uploads variant images under a publicly
//! readable prefix and hands back direct URLs.

mod media_storage;

pub use media_storage::MediaStorage;

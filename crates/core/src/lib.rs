//! Domain types and pure logic for the drone media map.
//!
//! Nothing in here touches the data file or the uploads directory; the
//! only filesystem access is image decoding in [`thumbnail`].

pub mod error;
pub mod geo;
pub mod map;
pub mod media;
pub mod navigator;
pub mod thumbnail;
pub mod types;
pub mod upload;

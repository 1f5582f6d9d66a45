//! File persistence for warpkit transforms and settings.

pub mod error;
pub mod transform_io;

pub use error::{IoError, Result};
pub use transform_io::{
    read_descriptor, read_settings, read_transform, write_descriptor, write_transform,
    FORMAT_VERSION,
};

//! JSON persistence of transforms and resampling settings.
//!
//! A transform file wraps a [`TransformDescriptor`] with a format version:
//!
//! ```json
//! {
//!   "version": 1,
//!   "transform": { "kind": "Translation", "dimension": 2, "parameters": [3.0, 4.0], "fixed_parameters": [] }
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use serde::{Deserialize, Serialize};
use warpkit_core::filter::ResampleSettings;
use warpkit_core::transform::{from_descriptor, Transform, TransformDescriptor};
use crate::error::{IoError, Result};

/// Current transform file version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct TransformFile {
    version: u32,
    transform: TransformDescriptor,
}

/// Write a descriptor as pretty-printed JSON.
pub fn write_descriptor<P: AsRef<Path>>(path: P, descriptor: &TransformDescriptor) -> Result<()> {
    let file = TransformFile {
        version: FORMAT_VERSION,
        transform: descriptor.clone(),
    };
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, &file)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::debug!("Wrote {} transform ({}D)", descriptor.kind, descriptor.dimension);
    Ok(())
}

/// Read a descriptor without building the transform.
///
/// Useful when the dimension is only known from the file.
pub fn read_descriptor<P: AsRef<Path>>(path: P) -> Result<TransformDescriptor> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let file: TransformFile = serde_json::from_reader(reader)?;
    if file.version != FORMAT_VERSION {
        return Err(IoError::UnsupportedVersion {
            found: file.version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(file.transform)
}

/// Write a transform (including composite children) to a JSON file.
pub fn write_transform<const D: usize, P: AsRef<Path>>(path: P, transform: &dyn Transform<D>) -> Result<()> {
    write_descriptor(path, &transform.to_descriptor())
}

/// Read a transform of dimension `D` from a JSON file.
pub fn read_transform<const D: usize, P: AsRef<Path>>(path: P) -> Result<Box<dyn Transform<D>>> {
    let descriptor = read_descriptor(path)?;
    Ok(from_descriptor::<D>(&descriptor)?)
}

/// Read resampling settings; absent fields keep their defaults.
pub fn read_settings<P: AsRef<Path>>(path: P) -> Result<ResampleSettings> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    Ok(serde_json::from_reader(reader)?)
}

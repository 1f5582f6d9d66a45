//! Subcommand implementations. Each returns what `main` prints.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use warpkit_core::filter::{derive_output_grid, GridDerivationOptions};
use warpkit_core::image::ImageGrid;
use warpkit_core::spatial::{Point, Spacing};
use warpkit_core::transform::{from_descriptor, Transform, TransformDescriptor};
use warpkit_io::{read_descriptor, read_transform, write_descriptor, write_transform};

/// Run `$body` with `D` bound to the dimension of `$descriptor`.
macro_rules! with_dimension {
    ($descriptor:expr, $d:ident => $body:expr) => {
        match $descriptor.dimension {
            2 => {
                const $d: usize = 2;
                $body
            }
            3 => {
                const $d: usize = 3;
                $body
            }
            other => bail!("unsupported dimension {}; only 2D and 3D transforms are handled", other),
        }
    };
}

fn load_descriptor(path: &Path) -> Result<TransformDescriptor> {
    read_descriptor(path).with_context(|| format!("Failed to read transform {}", path.display()))
}

fn load<const D: usize>(path: &Path) -> Result<Box<dyn Transform<D>>> {
    read_transform::<D, _>(path).with_context(|| format!("Failed to read transform {}", path.display()))
}

fn format_values(values: &[f64]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

fn describe(descriptor: &TransformDescriptor, depth: usize, out: &mut String) -> std::fmt::Result {
    let indent = "  ".repeat(depth);
    writeln!(out, "{}{} ({}D)", indent, descriptor.kind, descriptor.dimension)?;
    if !descriptor.parameters.is_empty() {
        writeln!(
            out,
            "{}  parameters [{}]: {}",
            indent,
            descriptor.parameters.len(),
            format_values(&descriptor.parameters)
        )?;
    }
    if !descriptor.fixed_parameters.is_empty() {
        writeln!(
            out,
            "{}  fixed parameters [{}]: {}",
            indent,
            descriptor.fixed_parameters.len(),
            format_values(&descriptor.fixed_parameters)
        )?;
    }
    for child in &descriptor.children {
        describe(child, depth + 1, out)?;
    }
    Ok(())
}

/// Human-readable summary of a transform file.
pub fn inspect(file: &Path) -> Result<String> {
    let descriptor = load_descriptor(file)?;
    let linear = with_dimension!(descriptor, D => from_descriptor::<D>(&descriptor).map(|t| t.is_linear()))
        .context("Transform file is inconsistent")?;

    let mut out = String::new();
    describe(&descriptor, 0, &mut out)?;
    writeln!(out, "linear: {}", linear)?;
    Ok(out)
}

/// Map `point` through the transform (or its inverse).
pub fn map_point(file: &Path, point: &[f64], inverse: bool) -> Result<String> {
    let descriptor = load_descriptor(file)?;
    with_dimension!(descriptor, D => {
        let mut transform = load::<D>(file)?;
        if inverse {
            transform = transform.inverse().context("Cannot invert transform")?;
        }
        let p = Point::<D>::from_slice(point).context("Point does not match the transform dimension")?;
        Ok(format_values(&transform.transform_point(&p).to_vec()))
    })
}

/// Write the inverse of `file` to `output`.
pub fn invert(file: &Path, output: &Path) -> Result<()> {
    let descriptor = load_descriptor(file)?;
    with_dimension!(descriptor, D => {
        let transform = load::<D>(file)?;
        let inverse = transform.inverse().context("Cannot invert transform")?;
        write_transform::<D, _>(output, inverse.as_ref())
            .with_context(|| format!("Failed to write {}", output.display()))?;
    });
    info!("Wrote inverse of {} to {}", descriptor.kind, output.display());
    Ok(())
}

/// Source grid description for `derive-grid`.
#[derive(Debug, Clone, Default)]
pub struct GridRequest {
    pub size: Vec<usize>,
    pub spacing: Option<Vec<f64>>,
    pub origin: Option<Vec<f64>>,
    pub output_spacing: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
struct GridSummary {
    size: Vec<usize>,
    origin: Vec<f64>,
    spacing: Vec<f64>,
    direction: Vec<f64>,
}

impl<const D: usize> From<&ImageGrid<D>> for GridSummary {
    fn from(grid: &ImageGrid<D>) -> Self {
        Self {
            size: grid.size().to_vec(),
            origin: grid.origin().to_vec(),
            spacing: grid.spacing().to_vec(),
            direction: grid.direction().to_row_vec(),
        }
    }
}

/// Derive the output grid for a source grid and print it as JSON.
pub fn derive_grid(file: &Path, request: &GridRequest) -> Result<String> {
    let descriptor = load_descriptor(file)?;
    with_dimension!(descriptor, D => {
        let transform = load::<D>(file)?;
        let n = request.size.len();
        let spacing = request.spacing.clone().unwrap_or_else(|| vec![1.0; n]);
        let origin = request.origin.clone().unwrap_or_else(|| vec![0.0; n]);
        let mut direction = vec![0.0; n * n];
        (0..n).for_each(|i| direction[i * n + i] = 1.0);

        let source = ImageGrid::<D>::from_slices(&request.size, &origin, &spacing, &direction)
            .context("Invalid source grid")?;
        let mut options = GridDerivationOptions::new();
        if let Some(output_spacing) = &request.output_spacing {
            options = options.with_spacing(Spacing::from_slice(output_spacing).context("Invalid output spacing")?);
        }
        let grid = derive_output_grid(&source, transform.as_ref(), &options)
            .context("Failed to derive output grid")?;
        Ok(serde_json::to_string_pretty(&GridSummary::from(&grid))?)
    })
}

/// Stack `files` (in add order) into one composite written to `output`.
pub fn compose(files: &[PathBuf], output: &Path) -> Result<()> {
    let children = files
        .iter()
        .map(|file| load_descriptor(file))
        .collect::<Result<Vec<_>>>()?;
    let dimension = children.first().map(|c| c.dimension).unwrap_or(0);
    if let Some(bad) = children.iter().position(|c| c.dimension != dimension) {
        bail!(
            "{} is {}D but {} is {}D",
            files[bad].display(),
            children[bad].dimension,
            files[0].display(),
            dimension
        );
    }

    let descriptor = TransformDescriptor::composite(dimension, children);
    with_dimension!(descriptor, D => {
        from_descriptor::<D>(&descriptor).context("Transforms do not form a valid composite")?;
    });
    write_descriptor(output, &descriptor).with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Composed {} transforms into {}", files.len(), output.display());
    Ok(())
}

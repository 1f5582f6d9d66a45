//! Serializable transform descriptions.
//!
//! A [`TransformDescriptor`] carries the kind tag, dimension, parameters and
//! fixed parameters of a transform (and, for composites, its children) so it
//! can be written to disk and rebuilt with [`from_descriptor`].

use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::spatial::{Point, Vector};
use super::trait_::{Transform, TransformKind};
use super::{
    AffineTransform, CompositeTransform, DisplacementFieldTransform, IdentityTransform,
    RigidTransform, ScaleTransform, TranslationTransform,
};

/// Plain-data description of a transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformDescriptor {
    pub kind: TransformKind,
    pub dimension: usize,
    #[serde(default)]
    pub parameters: Vec<f64>,
    #[serde(default)]
    pub fixed_parameters: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TransformDescriptor>,
}

impl TransformDescriptor {
    pub fn new(
        kind: TransformKind,
        dimension: usize,
        parameters: Vec<f64>,
        fixed_parameters: Vec<f64>,
    ) -> Self {
        Self {
            kind,
            dimension,
            parameters,
            fixed_parameters,
            children: Vec::new(),
        }
    }

    /// Descriptor of a composite made of `children`, in add order.
    pub fn composite(dimension: usize, children: Vec<TransformDescriptor>) -> Self {
        Self {
            kind: TransformKind::Composite,
            dimension,
            parameters: Vec::new(),
            fixed_parameters: Vec::new(),
            children,
        }
    }
}

/// Rebuild a transform of dimension `D` from its descriptor.
pub fn from_descriptor<const D: usize>(descriptor: &TransformDescriptor) -> Result<Box<dyn Transform<D>>> {
    if descriptor.dimension != D {
        return Err(Error::dimension_mismatch(format!(
            "{} transform has dimension {}, expected {}",
            descriptor.kind, descriptor.dimension, D
        )));
    }

    let fixed = &descriptor.fixed_parameters;
    let mut transform: Box<dyn Transform<D>> = match descriptor.kind {
        TransformKind::Identity => Box::new(IdentityTransform::<D>::new()),
        TransformKind::Translation => Box::new(TranslationTransform::<D>::new(Vector::zeros())),
        TransformKind::Scale => Box::new(ScaleTransform::<D>::identity(Some(Point::from_slice(fixed)?))),
        TransformKind::Affine => Box::new(AffineTransform::<D>::identity(Some(Point::from_slice(fixed)?))),
        TransformKind::Rigid => Box::new(RigidTransform::<D>::identity(Some(Point::from_slice(fixed)?))?),
        TransformKind::DisplacementField => {
            Box::new(DisplacementFieldTransform::<D>::from_fixed_parameters(fixed)?)
        }
        TransformKind::Composite => {
            let mut composite = CompositeTransform::<D>::new();
            for child in &descriptor.children {
                composite.add(from_descriptor::<D>(child)?);
            }
            return Ok(Box::new(composite));
        }
    };

    if !matches!(descriptor.kind, TransformKind::Identity | TransformKind::Translation) {
        Error::check_len(
            &format!("{} fixed parameters", descriptor.kind),
            transform.fixed_parameters().len(),
            fixed.len(),
        )?;
    }
    transform.set_parameters(&descriptor.parameters)?;
    Ok(transform)
}

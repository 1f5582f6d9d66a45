//! Transform types and operations.
//!
//! This module provides transform traits and implementations
//! for spatial coordinate transformations.

pub mod trait_;
pub mod descriptor;
pub mod identity;
pub mod translation;
pub mod scale;
pub mod rigid;
pub mod affine;
pub mod composite;
pub mod displacement_field;

pub use trait_::{Transform, TransformKind};
pub use descriptor::{from_descriptor, TransformDescriptor};
pub use identity::IdentityTransform;
pub use translation::TranslationTransform;
pub use scale::ScaleTransform;
pub use rigid::RigidTransform;
pub use affine::AffineTransform;
pub use composite::CompositeTransform;
pub use displacement_field::DisplacementFieldTransform;

//! Pure math/data for drawing & units in Cardtable
//!
//! This crate contains the geometry primitives, color definitions, and the
//! elevation/shadow parameter table used throughout the Cardtable control.
//! It deliberately knows nothing about lists, cells, or rendering backends:
//! rasterizing a shadow or a rounded corner is the host drawing layer's job,
//! this crate only computes the parameters it needs.

mod color;
mod geometry;
mod shadow;

pub use color::*;
pub use geometry::*;
pub use shadow::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{CornerRadii, EdgeInsets, Point, Rect, RoundedCornerShape, Size};
    pub use crate::shadow::{Elevation, ShadowParams};
}

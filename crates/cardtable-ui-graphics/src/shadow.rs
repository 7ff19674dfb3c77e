//! Elevation levels and their shadow parameters.
//!
//! Cards express depth through a small fixed set of elevation levels, each
//! mapping to a static tuple of shadow color, opacity, blur, and offset.
//! Hosts rasterize these however their drawing layer likes; the values here
//! are the single source of truth.

use crate::color::Color;
use crate::geometry::Point;

/// Shadow parameters for one elevation level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowParams {
    pub color: Color,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Gaussian blur extent in logical pixels, `>= 0`.
    pub blur: f32,
    /// Offset of the shadow from the casting rect.
    pub offset: Point,
}

impl ShadowParams {
    pub const fn new(color: Color, opacity: f32, blur: f32, offset: Point) -> Self {
        Self {
            color,
            opacity,
            blur,
            offset,
        }
    }

    /// Blur radius as consumed by radius-based shadow APIs, which take half
    /// the blur extent.
    pub fn blur_radius(&self) -> f32 {
        self.blur / 2.0
    }
}

/// Fixed elevation severity levels.
///
/// `Level1` is what card containers use; the rest exist so hosts share one
/// table rather than inventing per-call-site constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Elevation {
    #[default]
    None,
    Level0,
    Level1,
    Level2,
    Level3,
    Level4,
}

/// Corner radius used when an elevation level has no blur to derive it from.
const DEFAULT_CORNER_RADIUS: f32 = 16.0;

impl Elevation {
    /// Shadow parameters for this level, or `None` for the unshadowed level.
    pub fn params(&self) -> Option<ShadowParams> {
        match self {
            Self::None => None,
            Self::Level0 => Some(ShadowParams::new(Color::WHITE, 1.0, 0.0, Point::ZERO)),
            Self::Level1 => Some(ShadowParams::new(
                Color::BLACK,
                0.12,
                9.0,
                Point::new(0.0, 4.0),
            )),
            Self::Level2 => Some(ShadowParams::new(
                Color::BLACK,
                0.10,
                16.0,
                Point::new(0.0, 8.0),
            )),
            Self::Level3 => Some(ShadowParams::new(
                Color::BLACK,
                0.10,
                20.0,
                Point::new(0.0, 15.0),
            )),
            Self::Level4 => Some(ShadowParams::new(
                Color::BLACK,
                0.24,
                56.0,
                Point::new(0.0, 48.0),
            )),
        }
    }

    /// Corner rounding radius paired with this level.
    ///
    /// Derived from the level's blur so deeper cards round more; levels
    /// without parameters fall back to the default radius.
    pub fn corner_radius(&self) -> f32 {
        self.params()
            .map(|p| p.blur)
            .unwrap_or(DEFAULT_CORNER_RADIUS)
    }
}

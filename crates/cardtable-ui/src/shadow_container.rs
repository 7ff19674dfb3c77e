//! Card container tracking bounds and decoration.
//!
//! The container re-derives its shadow and corner parameters only when its
//! bounds actually change; a layout pass that leaves the bounds alone is a
//! no-op. Rasterizing the decoration is the host's job.

use cardtable_ui_graphics::{CornerRadii, EdgeInsets, Elevation, Rect, RoundedCornerShape, ShadowParams};

/// Resolved visual decoration for one card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardDecoration {
    pub shadow: ShadowParams,
    pub corner_radii: CornerRadii,
}

/// A view wrapper that applies card decoration and hosts one child view
/// inset by a fixed margin.
#[derive(Debug)]
pub struct ShadowContainer {
    bounds: Rect,
    previous_bounds: Rect,
    elevation: Elevation,
    has_rounded_edges: bool,
    child_margin: Option<EdgeInsets>,
    decoration: Option<CardDecoration>,
    recompute_count: u32,
}

impl Default for ShadowContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadowContainer {
    pub fn new() -> Self {
        Self {
            bounds: Rect::ZERO,
            previous_bounds: Rect::ZERO,
            elevation: Elevation::Level1,
            has_rounded_edges: true,
            child_margin: None,
            decoration: None,
            recompute_count: 0,
        }
    }

    /// Binds the child view to fill this container inset by `margin`.
    ///
    /// The binding is established exactly once per child relationship;
    /// further calls are ignored.
    pub fn bind_child_margin(&mut self, margin: EdgeInsets) {
        if self.child_margin.is_some() {
            log::debug!("child margin already bound; ignoring rebind");
            return;
        }
        self.child_margin = Some(margin);
    }

    /// Updates the container bounds, re-deriving decoration only when the
    /// bounds actually changed.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        if bounds == self.previous_bounds && self.decoration.is_some() {
            return;
        }
        self.previous_bounds = bounds;
        self.decoration = self.elevation.params().map(|shadow| {
            let corner_radii = if self.has_rounded_edges {
                RoundedCornerShape::uniform(self.elevation.corner_radius())
                    .resolve(bounds.width, bounds.height)
            } else {
                CornerRadii::default()
            };
            CardDecoration {
                shadow,
                corner_radii,
            }
        });
        self.recompute_count += 1;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Frame of the bound child in container-local coordinates.
    pub fn child_frame(&self) -> Rect {
        let local = Rect::from_size(self.bounds.size());
        match self.child_margin {
            Some(margin) => local.inset_by(margin),
            None => local,
        }
    }

    pub fn decoration(&self) -> Option<&CardDecoration> {
        self.decoration.as_ref()
    }

    pub fn set_rounded_edges(&mut self, rounded: bool) {
        self.has_rounded_edges = rounded;
        // Force a re-derive on the next bounds change.
        self.previous_bounds = Rect::ZERO;
        self.decoration = None;
    }
}

//! Row height: either a fixed value or automatic self-sizing.

/// Height request for a row, header, or footer.
///
/// `Automatic` defers to whatever the measuring side can determine (the
/// cell's own content height, or a host fallback); `Points` is exact.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum RowHeight {
    #[default]
    Automatic,
    Points(f32),
}

impl RowHeight {
    /// The fixed value, if any.
    pub fn points(self) -> Option<f32> {
        match self {
            Self::Points(value) => Some(value),
            Self::Automatic => None,
        }
    }

    /// Resolves to a concrete value, substituting `fallback` for automatic.
    pub fn resolve(self, fallback: f32) -> f32 {
        match self {
            Self::Points(value) => value,
            Self::Automatic => fallback,
        }
    }

    pub fn is_automatic(self) -> bool {
        matches!(self, Self::Automatic)
    }
}

//! Separator styling shared between the outer control and nested lists.

/// How row separators are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SeparatorStyle {
    None,
    #[default]
    SingleLine,
}

impl SeparatorStyle {
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

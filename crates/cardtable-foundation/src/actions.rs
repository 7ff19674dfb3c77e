//! Trailing row actions.
//!
//! Actions are plain data: the host presents them and decides what invoking
//! one means. The control only routes the set the delegate supplies.

use smallvec::SmallVec;

/// Inline capacity for action sets. Rows rarely carry more than two
/// trailing actions, so this keeps the common case off the heap.
type ActionVec = SmallVec<[RowAction; 2]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActionStyle {
    #[default]
    Normal,
    Destructive,
}

/// One trailing action on a row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowAction {
    pub title: String,
    pub style: ActionStyle,
}

impl RowAction {
    pub fn new(title: impl Into<String>, style: ActionStyle) -> Self {
        Self {
            title: title.into(),
            style,
        }
    }
}

/// The set of trailing actions for one row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionSet {
    actions: ActionVec,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, action: RowAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn push(&mut self, action: RowAction) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowAction> {
        self.actions.iter()
    }
}

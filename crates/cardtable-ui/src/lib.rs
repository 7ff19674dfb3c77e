//! Grouped card-list control.
//!
//! A [`SectionedTable`] is an outer list whose every row hosts an
//! independently laid-out, self-sizing nested list, drawn as a rounded,
//! shadowed card. The consumer supplies a single
//! [`GroupedTableDelegate`] answering section count, row count, and cell
//! content at logical `(section, row)` addresses; the control measures each
//! card off-screen before layout, caches the heights per section, and
//! forwards every nested callback back to the delegate tagged with the
//! owning section.
//!
//! Rendering is a host concern: the control computes frames, heights, and
//! decoration parameters, never pixels.

mod address;
mod delegate;
mod section_cell;
mod sectioned_table;
mod shadow_container;

#[cfg(test)]
mod tests;

pub use address::RowAddress;
pub use delegate::{GroupedTableDelegate, HeaderView};
pub use section_cell::SectionCell;
pub use sectioned_table::{SectionedTable, VisualConfig, SECTION_CELL_IDENTIFIER};
pub use shadow_container::{CardDecoration, ShadowContainer};

pub use cardtable_foundation::{
    ActionSet, ActionStyle, BlankCell, CellKind, CellRegistry, CellView, ListDataSource, ListView,
    RowAction, RowHeight, SeparatorStyle,
};
pub use cardtable_ui_graphics::prelude::*;

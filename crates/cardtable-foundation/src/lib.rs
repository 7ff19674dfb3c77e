//! List primitives for Cardtable.
//!
//! This crate sits below the widget layer and provides the pieces a grouped
//! list control is assembled from: the cell abstraction and its reuse
//! registry, a retained non-scrolling [`ListView`] with a fully synchronous
//! measure/layout pass, per-row measurement records, and visible-strip
//! computation for a scrolling outer axis.
//!
//! Nothing here renders. Hosts own the drawing layer; this crate owns the
//! numbers it draws with.

mod actions;
mod cell;
mod data_source;
mod list_view;
mod measured_row;
mod row_height;
mod separator;
mod visible_strip;

pub use actions::{ActionSet, ActionStyle, RowAction};
pub use cell::{BlankCell, CellKind, CellRegistry, CellView};
pub use data_source::ListDataSource;
pub use list_view::{ListView, ESTIMATED_ROW_HEIGHT_FALLBACK};
pub use measured_row::{ListMeasureResult, MeasuredRow};
pub use row_height::RowHeight;
pub use separator::SeparatorStyle;
pub use visible_strip::compute_visible_strip;

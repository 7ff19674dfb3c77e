//! Data source capability set for a single list.
//!
//! A list never owns its data. Whoever drives the list hands a data source
//! to each operation that needs one, so the list borrows data exactly for
//! the duration of a reload or a selection and no reference cycle forms.
//!
//! Only [`row_count`](ListDataSource::row_count) and
//! [`cell_for_row`](ListDataSource::cell_for_row) are mandatory; every
//! other method is an optional capability with a neutral default.

use crate::actions::ActionSet;
use crate::cell::CellView;
use crate::list_view::ListView;
use crate::row_height::RowHeight;

pub trait ListDataSource {
    /// Number of rows in the list.
    fn row_count(&mut self, list: &ListView) -> usize;

    /// Produces the cell for `row`. Implementations typically dequeue from
    /// the list's registry via [`ListView::dequeue`].
    fn cell_for_row(&mut self, list: &mut ListView, row: usize) -> Box<dyn CellView>;

    /// Height for `row`; `Automatic` lets the cell size itself.
    fn height_for_row(&mut self, list: &ListView, row: usize) -> RowHeight {
        let _ = (list, row);
        RowHeight::Automatic
    }

    /// Called after the list records a selection of `row`.
    fn did_select_row(&mut self, list: &mut ListView, row: usize) {
        let _ = (list, row);
    }

    /// Trailing actions for `row`, if any.
    fn trailing_actions(&mut self, list: &ListView, row: usize) -> Option<ActionSet> {
        let _ = (list, row);
        None
    }

    /// Called once per realized row during a reload, after the cell exists
    /// and its height is resolved.
    fn will_display_row(&mut self, list: &ListView, row: usize, cell: &mut dyn CellView) {
        let _ = (list, row, cell);
    }
}

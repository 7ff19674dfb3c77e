//! Visible-strip computation for the scrolling outer axis.

use core::ops::Range;

use crate::measured_row::MeasuredRow;

/// Returns the `[start, end)` range of rows intersecting the viewport.
///
/// `rows` must be in placement order with monotonically increasing
/// offsets, which is what a measure pass produces. Rows touching the
/// viewport edges count as visible.
pub fn compute_visible_strip(rows: &[MeasuredRow], scroll_offset: f32, viewport: f32) -> Range<usize> {
    if rows.is_empty() || viewport <= 0.0 {
        return 0..0;
    }

    let viewport_end = scroll_offset + viewport;

    // First row whose end extends past the top edge.
    let start = rows.partition_point(|row| row.end_offset() <= scroll_offset);
    // First row that starts at or past the bottom edge.
    let end = rows.partition_point(|row| row.offset < viewport_end);

    start..end.max(start)
}

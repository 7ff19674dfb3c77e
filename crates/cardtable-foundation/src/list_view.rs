//! Retained list view with a synchronous measure/layout pass.
//!
//! [`ListView`] is the explicit list component nested inside each card: it
//! realizes every row eagerly (nested lists do not scroll, so there is
//! nothing to virtualize at this level), resolves per-row heights, and
//! reports the content extent the outer axis needs for placement.
//!
//! The data source is borrowed per operation rather than stored, so a view
//! and its source never form a reference cycle.

use cardtable_ui_graphics::{Color, EdgeInsets, Rect};

use crate::cell::{CellRegistry, CellView};
use crate::data_source::ListDataSource;
use crate::measured_row::{ListMeasureResult, MeasuredRow};
use crate::row_height::RowHeight;
use crate::separator::SeparatorStyle;

/// Estimated row height used when neither the source nor the view supplies
/// one. Matches the provisional-sizing fallback of the measure protocol.
pub const ESTIMATED_ROW_HEIGHT_FALLBACK: f32 = 200.0;

/// A retained, eagerly-realized list.
pub struct ListView {
    frame: Rect,
    content_insets: EdgeInsets,
    estimated_row_height: RowHeight,
    row_height: RowHeight,
    section_header_height: f32,
    separator_style: SeparatorStyle,
    separator_color: Color,
    allows_selection: bool,
    scroll_enabled: bool,
    selected_row: Option<usize>,
    registry: CellRegistry,
    cells: Vec<Box<dyn CellView>>,
    measure: ListMeasureResult,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            frame: Rect::ZERO,
            content_insets: EdgeInsets::default(),
            estimated_row_height: RowHeight::Automatic,
            row_height: RowHeight::Automatic,
            section_header_height: 0.0,
            separator_style: SeparatorStyle::default(),
            separator_color: Color::SEPARATOR,
            allows_selection: true,
            scroll_enabled: true,
            selected_row: None,
            registry: CellRegistry::new(),
            cells: Vec::new(),
            measure: ListMeasureResult::default(),
        }
    }

    // --- configuration -------------------------------------------------

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_content_insets(&mut self, insets: EdgeInsets) {
        self.content_insets = insets;
    }

    pub fn content_insets(&self) -> EdgeInsets {
        self.content_insets
    }

    pub fn set_estimated_row_height(&mut self, height: RowHeight) {
        self.estimated_row_height = height;
    }

    pub fn estimated_row_height(&self) -> RowHeight {
        self.estimated_row_height
    }

    /// Fixed height applied to every row unless the source overrides it.
    pub fn set_row_height(&mut self, height: RowHeight) {
        self.row_height = height;
    }

    pub fn set_section_header_height(&mut self, height: f32) {
        self.section_header_height = height;
    }

    pub fn section_header_height(&self) -> f32 {
        self.section_header_height
    }

    pub fn set_separator_style(&mut self, style: SeparatorStyle) {
        self.separator_style = style;
    }

    pub fn separator_style(&self) -> SeparatorStyle {
        self.separator_style
    }

    pub fn set_separator_color(&mut self, color: Color) {
        self.separator_color = color;
    }

    pub fn separator_color(&self) -> Color {
        self.separator_color
    }

    pub fn set_allows_selection(&mut self, allows: bool) {
        self.allows_selection = allows;
        if !allows {
            self.deselect_selected();
        }
    }

    pub fn allows_selection(&self) -> bool {
        self.allows_selection
    }

    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    pub fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    // --- cell kinds -----------------------------------------------------

    pub fn register(&mut self, identifier: impl Into<String>, kind: crate::cell::CellKind) {
        self.registry.register(identifier, kind);
    }

    /// Installs every kind from `registry`. Must happen before a reload
    /// dequeues any of the identifiers involved.
    pub fn install_kinds(&mut self, registry: &CellRegistry) {
        self.registry.merge(registry);
    }

    pub fn dequeue(&self, identifier: &str) -> Box<dyn CellView> {
        self.registry.dequeue(identifier)
    }

    // --- measure / layout ----------------------------------------------

    /// Realizes every row from `source` and lays them out synchronously.
    ///
    /// Any previous realization and selection is discarded first. Height
    /// resolution per row: the source's `height_for_row`, then the view's
    /// fixed `row_height`, then the cell's own content height at the
    /// current content width.
    pub fn reload(&mut self, source: &mut dyn ListDataSource) {
        self.cells.clear();
        self.measure = ListMeasureResult::default();
        self.selected_row = None;

        let count = source.row_count(self);
        let width = self.content_width();

        let mut offset = 0.0;
        for row in 0..count {
            let mut cell = source.cell_for_row(self, row);
            let height = match source.height_for_row(self, row) {
                RowHeight::Points(h) => h,
                RowHeight::Automatic => self.row_height.resolve(cell.content_height(width)),
            };

            let mut measured = MeasuredRow::new(row, height);
            measured.offset = offset;
            offset += height;
            self.measure.rows.push(measured);

            source.will_display_row(self, row, cell.as_mut());
            self.cells.push(cell);
        }
        self.measure.content_height = offset;

        log::debug!(
            "list reloaded: {count} rows, content height {:.1}",
            self.measure.content_height
        );
    }

    /// Number of realized rows.
    pub fn row_count(&self) -> usize {
        self.measure.len()
    }

    /// Number of sections this list renders. A flat list is always a
    /// single section; the value exists so the measured-height formula has
    /// an explicit section term.
    pub fn sections(&self) -> usize {
        1
    }

    /// Total extent of the realized rows, excluding insets.
    pub fn content_height(&self) -> f32 {
        self.measure.content_height
    }

    /// The authoritative outer height of this list: content plus vertical
    /// insets plus one header extent per section.
    pub fn measured_height(&self) -> f32 {
        self.measure.content_height
            + self.content_insets.vertical_sum()
            + self.sections() as f32 * self.section_header_height
    }

    pub fn measure_result(&self) -> &ListMeasureResult {
        &self.measure
    }

    /// Provisional frame height for `row_count` rows, used by off-screen
    /// measurement before real heights exist. Non-positive estimates fall
    /// back to [`ESTIMATED_ROW_HEIGHT_FALLBACK`].
    pub fn provisional_height(&self, row_count: usize) -> f32 {
        let estimate = self
            .estimated_row_height
            .points()
            .filter(|height| *height > 0.0)
            .unwrap_or(ESTIMATED_ROW_HEIGHT_FALLBACK);
        row_count as f32 * estimate
    }

    /// Width available to cells once horizontal insets are taken out.
    pub fn content_width(&self) -> f32 {
        (self.frame.width - self.content_insets.horizontal_sum()).max(0.0)
    }

    /// Frame of `row` in list-local coordinates.
    pub fn row_frame(&self, row: usize) -> Option<Rect> {
        self.measure.row(row).map(|measured| {
            Rect::new(
                self.content_insets.left,
                self.content_insets.top + measured.offset,
                self.content_width(),
                measured.height,
            )
        })
    }

    // --- cells ----------------------------------------------------------

    pub fn cell_at(&self, row: usize) -> Option<&dyn CellView> {
        self.cells.get(row).map(|cell| cell.as_ref())
    }

    pub fn cell_at_mut(&mut self, row: usize) -> Option<&mut (dyn CellView + 'static)> {
        self.cells.get_mut(row).map(|cell| cell.as_mut())
    }

    // --- selection ------------------------------------------------------

    /// Records `row` as selected, if selection is allowed and the row
    /// exists. Returns whether the selection was applied.
    pub fn select_row(&mut self, row: usize) -> bool {
        if !self.allows_selection || row >= self.cells.len() {
            return false;
        }
        if let Some(previous) = self.selected_row.take() {
            if let Some(cell) = self.cells.get_mut(previous) {
                cell.set_selected(false);
            }
        }
        self.selected_row = Some(row);
        if let Some(cell) = self.cells.get_mut(row) {
            cell.set_selected(true);
        }
        true
    }

    pub fn deselect_selected(&mut self) {
        if let Some(row) = self.selected_row.take() {
            if let Some(cell) = self.cells.get_mut(row) {
                cell.set_selected(false);
            }
        }
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected_row
    }
}

impl std::fmt::Debug for ListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("frame", &self.frame)
            .field("rows", &self.measure.len())
            .field("content_height", &self.measure.content_height)
            .field("selected_row", &self.selected_row)
            .finish_non_exhaustive()
    }
}

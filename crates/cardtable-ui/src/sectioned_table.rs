//! The outer list controller.
//!
//! [`SectionedTable`] owns the measurement/composition protocol: on every
//! [`reload`](SectionedTable::reload) it runs an off-screen measurement
//! pass over all sections with a single throwaway [`SectionCell`], caches
//! the resulting heights, and only then rebuilds its own structure. At
//! render time each visible outer row is backed by a reusable
//! [`SectionCell`] replaying the same data through the same forwarding
//! path, now on-screen.
//!
//! Visual settings the consumer applies here (separator style, color,
//! selectability) are suppressed on the outer list itself and redirected
//! into every nested list, so the cards appear to carry the styling.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use cardtable_foundation::{
    compute_visible_strip, ActionSet, CellKind, CellRegistry, CellView, MeasuredRow, RowHeight,
    SeparatorStyle, ESTIMATED_ROW_HEIGHT_FALLBACK,
};
use cardtable_ui_graphics::{Color, Rect};

use crate::address::RowAddress;
use crate::delegate::{
    delegate_row_count, delegate_section_count, GroupedTableDelegate, HeaderView,
};
use crate::section_cell::SectionCell;

/// Reuse identifier of the outer list's single internal cell kind.
pub const SECTION_CELL_IDENTIFIER: &str = "SectionedTableViewCell";

/// Visual settings captured on the outer control and applied to nested
/// lists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualConfig {
    pub separator_style: SeparatorStyle,
    pub separator_color: Color,
    pub allows_selection: bool,
}

struct VisibleSection {
    section: usize,
    cell: SectionCell,
}

/// Grouped card-list control: one outer row per non-empty section, each
/// hosting a nested list.
pub struct SectionedTable {
    frame: Rect,
    delegate: Weak<RefCell<dyn GroupedTableDelegate>>,
    /// Measured height per section. Fully rebuilt by each reload; absent
    /// entries degrade to automatic sizing.
    pub(crate) heights: FxHashMap<usize, f32>,
    child_registry: CellRegistry,
    nested_separator_style: SeparatorStyle,
    separator_color: Color,
    allows_selection: bool,
    scroll_offset: f32,
    /// Outer selected row bookkeeping, shared with every adapter so a
    /// nested tap can steer it.
    selected_section: Rc<Cell<Option<usize>>>,
    outer_rows: Vec<MeasuredRow>,
    row_sections: Vec<usize>,
    visible: Vec<VisibleSection>,
    reuse_pool: Vec<SectionCell>,
}

impl Default for SectionedTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionedTable {
    pub fn new() -> Self {
        Self {
            frame: Rect::ZERO,
            delegate: Weak::<RefCell<NoDelegate>>::new(),
            heights: FxHashMap::default(),
            child_registry: CellRegistry::new(),
            nested_separator_style: SeparatorStyle::SingleLine,
            separator_color: Color::SEPARATOR,
            allows_selection: true,
            scroll_offset: 0.0,
            selected_section: Rc::new(Cell::new(None)),
            outer_rows: Vec::new(),
            row_sections: Vec::new(),
            visible: Vec::new(),
            reuse_pool: Vec::new(),
        }
    }

    // --- public surface -------------------------------------------------

    /// Installs or replaces the consumer delegate. Non-owning; assignment
    /// triggers no reload by itself — call [`reload`](Self::reload).
    pub fn set_grouped_delegate(&mut self, delegate: Weak<RefCell<dyn GroupedTableDelegate>>) {
        self.delegate = delegate;
    }

    /// Records a cell kind for propagation into nested lists. The outer
    /// list keeps its own single internal cell kind regardless.
    pub fn register(&mut self, identifier: impl Into<String>, kind: CellKind) {
        self.child_registry.register(identifier, kind);
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        self.materialize_visible();
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The separator style the consumer configured; rendered by nested
    /// lists, never by the outer list itself.
    pub fn set_separator_style(&mut self, style: SeparatorStyle) {
        self.nested_separator_style = style;
        self.reapply_visual_config();
    }

    /// The outer list's effective separator style, which is always none —
    /// the configured style lives on the nested lists.
    pub fn separator_style(&self) -> SeparatorStyle {
        SeparatorStyle::None
    }

    pub fn nested_separator_style(&self) -> SeparatorStyle {
        self.nested_separator_style
    }

    pub fn set_separator_color(&mut self, color: Color) {
        self.separator_color = color;
        self.reapply_visual_config();
    }

    pub fn separator_color(&self) -> Color {
        self.separator_color
    }

    pub fn set_allows_selection(&mut self, allows: bool) {
        self.allows_selection = allows;
        if !allows {
            self.selected_section.set(None);
        }
        self.reapply_visual_config();
    }

    pub fn allows_selection(&self) -> bool {
        self.allows_selection
    }

    pub fn visual_config(&self) -> VisualConfig {
        VisualConfig {
            separator_style: self.nested_separator_style,
            separator_color: self.separator_color,
            allows_selection: self.allows_selection,
        }
    }

    /// Rebuilds everything from the delegate.
    ///
    /// Ordering is load-bearing: the height cache is cleared, the full
    /// off-screen measurement pass repopulates it for every non-empty
    /// section, the measurement adapter is discarded, and only then does
    /// the structural reload re-query counts and re-materialize rows. No
    /// outer row height is ever requested before it is known.
    pub fn reload(&mut self) {
        self.heights.clear();

        let section_count = self.section_count();
        let mut measurement_cell = SectionCell::new(Rc::clone(&self.selected_section));
        self.configure_cell(&mut measurement_cell);
        measurement_cell.set_bounds(Rect::new(0.0, 0.0, self.frame.width, self.frame.height));

        for section in 0..section_count {
            if delegate_row_count(&self.delegate, section) == 0 {
                continue;
            }
            let height = measurement_cell.measure_height(section);
            self.heights.insert(section, height);
        }
        log::debug!(
            "measured {} of {section_count} sections",
            self.heights.len()
        );
        drop(measurement_cell);

        self.structural_reload();
    }

    /// Number of sections the delegate reports, with the implicit
    /// single-section fallback for flat delegates.
    pub fn section_count(&self) -> usize {
        delegate_section_count(&self.delegate)
    }

    /// The outer list's physical row count for `section`: one when the
    /// delegate reports at least one logical row, zero otherwise (empty
    /// sections collapse to invisible).
    pub fn rows_in_outer_section(&self, section: usize) -> usize {
        if delegate_row_count(&self.delegate, section) > 0 {
            1
        } else {
            0
        }
    }

    /// Cached height for `section`, or automatic when the cache has no
    /// entry (the host layout right-sizes on the fly).
    pub fn height_for_outer_row(&self, section: usize) -> RowHeight {
        match self.heights.get(&section) {
            Some(&height) => RowHeight::Points(height),
            None => RowHeight::Automatic,
        }
    }

    /// Dequeues the outer row cell for `section` from the
    /// [`SECTION_CELL_IDENTIFIER`] reuse pool. The cell is not configured
    /// yet; [`will_display_row`](Self::will_display_row) finishes the job
    /// just before the row appears.
    pub fn cell_for_outer_row(&mut self, section: usize) -> SectionCell {
        let mut cell = self.dequeue_section_cell();
        cell.set_section(section);
        cell
    }

    /// Prepares `cell` to display `section`: assigns the section,
    /// re-applies the visual configuration, and reloads the nested list.
    /// This is where the real, on-screen render of the section happens.
    pub fn will_display_row(&mut self, cell: &mut SectionCell, section: usize) {
        cell.set_section(section);
        self.configure_cell(cell);
        cell.reload_list();
    }

    /// The cell at a logical address, when its section is materialized.
    pub fn cell_at(&self, address: RowAddress) -> Option<&dyn CellView> {
        self.visible
            .iter()
            .find(|vs| vs.section == address.section)?
            .cell
            .list()
            .cell_at(address.row)
    }

    pub fn cell_at_mut(&mut self, address: RowAddress) -> Option<&mut (dyn CellView + 'static)> {
        self.visible
            .iter_mut()
            .find(|vs| vs.section == address.section)?
            .cell
            .list_mut()
            .cell_at_mut(address.row)
    }

    /// Selects the nested row at `address`, steering the outer selection.
    /// Only rows in materialized sections can be selected.
    pub fn select_row(&mut self, address: RowAddress) -> bool {
        match self
            .visible
            .iter_mut()
            .find(|vs| vs.section == address.section)
        {
            Some(vs) => vs.cell.select_local_row(address.row),
            None => {
                log::debug!("select_row for unmaterialized section {}", address.section);
                false
            }
        }
    }

    /// Clears the nested selection inside the active card, then the outer
    /// selection. Selection is represented at the nested level; the outer
    /// level only steers.
    pub fn clear_selection(&mut self, animated: bool) {
        // This layer performs no animation; the flag mirrors the public
        // surface for hosts that do.
        let _ = animated;
        if let Some(section) = self.selected_section.get() {
            if let Some(vs) = self.visible.iter_mut().find(|vs| vs.section == section) {
                vs.cell.deselect();
            }
            self.selected_section.set(None);
        }
    }

    pub fn selected_section(&self) -> Option<usize> {
        self.selected_section.get()
    }

    /// Updates the scroll position, re-materializes the visible strip,
    /// and notifies the delegate.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        let max_scroll = (self.content_height() - self.frame.height).max(0.0);
        self.scroll_offset = offset.clamp(0.0, max_scroll);
        self.materialize_visible();
        if let Some(delegate) = self.delegate.upgrade() {
            delegate.borrow_mut().scroll_did_change(self.scroll_offset);
        }
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Total extent of the outer rows.
    pub fn content_height(&self) -> f32 {
        self.outer_rows
            .last()
            .map(|row| row.end_offset())
            .unwrap_or(0.0)
    }

    pub fn visible_sections(&self) -> Vec<usize> {
        self.visible.iter().map(|vs| vs.section).collect()
    }

    pub fn visible_cell(&self, section: usize) -> Option<&SectionCell> {
        self.visible
            .iter()
            .find(|vs| vs.section == section)
            .map(|vs| &vs.cell)
    }

    // --- section-scoped passthroughs ------------------------------------

    /// Header for `section`, substituting an empty placeholder when the
    /// delegate declines. `None` only when the delegate is gone.
    pub fn header_view(&self, section: usize) -> Option<HeaderView> {
        let delegate = self.delegate.upgrade()?;
        let view = delegate.borrow_mut().header_view(section);
        Some(view.unwrap_or_else(HeaderView::empty))
    }

    pub fn footer_view(&self, section: usize) -> Option<HeaderView> {
        let delegate = self.delegate.upgrade()?;
        let view = delegate.borrow_mut().footer_view(section);
        view
    }

    pub fn footer_height(&self, section: usize) -> RowHeight {
        match self.delegate.upgrade() {
            Some(delegate) => delegate.borrow_mut().footer_height(section),
            None => RowHeight::Automatic,
        }
    }

    pub fn trailing_actions(&self, address: RowAddress) -> Option<ActionSet> {
        let delegate = self.delegate.upgrade()?;
        let actions = delegate.borrow_mut().trailing_actions(address);
        actions
    }

    // --- internals ------------------------------------------------------

    fn configure_cell(&self, cell: &mut SectionCell) {
        cell.install_kinds(&self.child_registry);
        cell.set_delegate(self.delegate.clone());
        cell.apply_configuration(&self.visual_config());
    }

    fn reapply_visual_config(&mut self) {
        let config = self.visual_config();
        for vs in &mut self.visible {
            vs.cell.apply_configuration(&config);
        }
    }

    /// Re-queries section/row counts and rebuilds the outer row layout
    /// from the height cache, recycling every materialized cell.
    fn structural_reload(&mut self) {
        self.outer_rows.clear();
        self.row_sections.clear();
        self.selected_section.set(None);
        for vs in std::mem::take(&mut self.visible) {
            self.reuse_pool.push(vs.cell);
        }

        let section_count = self.section_count();
        let mut offset = 0.0;
        for section in 0..section_count {
            if self.rows_in_outer_section(section) == 0 {
                continue;
            }
            let height = self
                .height_for_outer_row(section)
                .resolve(ESTIMATED_ROW_HEIGHT_FALLBACK);
            let mut row = MeasuredRow::new(self.outer_rows.len(), height);
            row.offset = offset;
            offset += height;
            self.outer_rows.push(row);
            self.row_sections.push(section);
        }

        self.materialize_visible();
    }

    /// Materializes one adapter per outer row intersecting the viewport,
    /// reusing cells via the pool.
    fn materialize_visible(&mut self) {
        let strip = compute_visible_strip(&self.outer_rows, self.scroll_offset, self.frame.height);

        let mut previous = std::mem::take(&mut self.visible);
        let mut next = Vec::with_capacity(strip.len());

        for index in strip {
            let section = self.row_sections[index];
            let row = self.outer_rows[index];
            let bounds = Rect::new(0.0, row.offset, self.frame.width, row.height);

            if let Some(position) = previous.iter().position(|vs| vs.section == section) {
                let mut vs = previous.swap_remove(position);
                vs.cell.set_bounds(bounds);
                next.push(vs);
            } else {
                let mut cell = self.cell_for_outer_row(section);
                cell.set_bounds(bounds);
                self.will_display_row(&mut cell, section);
                next.push(VisibleSection { section, cell });
            }
        }

        for vs in previous {
            self.reuse_pool.push(vs.cell);
        }
        self.visible = next;
    }

    /// Dequeues a reusable outer cell, instantiating one when the pool is
    /// dry.
    fn dequeue_section_cell(&mut self) -> SectionCell {
        self.reuse_pool
            .pop()
            .unwrap_or_else(|| SectionCell::new(Rc::clone(&self.selected_section)))
    }
}

impl std::fmt::Debug for SectionedTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionedTable")
            .field("frame", &self.frame)
            .field("sections_measured", &self.heights.len())
            .field("outer_rows", &self.outer_rows.len())
            .field("visible", &self.visible.len())
            .finish_non_exhaustive()
    }
}

/// Placeholder delegate type used only to mint an empty `Weak`.
struct NoDelegate;

impl GroupedTableDelegate for NoDelegate {
    fn row_count(&mut self, _section: usize) -> usize {
        0
    }

    fn cell_for_row(
        &mut self,
        _list: &mut cardtable_foundation::ListView,
        _address: RowAddress,
    ) -> Box<dyn CellView> {
        Box::new(cardtable_foundation::BlankCell)
    }
}

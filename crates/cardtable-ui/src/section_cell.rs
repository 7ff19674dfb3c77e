//! The inner list adapter: one card, one section.
//!
//! A [`SectionCell`] wraps a single nested, non-scrolling [`ListView`]
//! bound to one outer section. Every list callback it services is a pure
//! forwarder: it takes the local row index, builds the logical
//! `(section, row)` address, and calls the consumer delegate, substituting
//! a neutral default whenever the delegate is gone. The same adapter type
//! serves both the off-screen measurement pass and the on-screen render.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use cardtable_foundation::{
    ActionSet, BlankCell, CellRegistry, CellView, ListDataSource, ListView, RowHeight,
};
use cardtable_ui_graphics::{EdgeInsets, Rect};

use crate::address::RowAddress;
use crate::delegate::{delegate_row_count, delegate_section_count, GroupedTableDelegate};
use crate::sectioned_table::VisualConfig;
use crate::shadow_container::ShadowContainer;

/// Horizontal inset between the card and the outer list edge.
const DEFAULT_CARD_MARGIN: f32 = 16.0;

/// Forwards the nested list's callbacks to the consumer delegate, tagged
/// with the owning section.
///
/// Borrowed fresh from the [`SectionCell`] for each operation, so the
/// adapter and its list never hold references to one another.
struct SectionForwarder<'a> {
    section: usize,
    delegate: &'a Weak<RefCell<dyn GroupedTableDelegate>>,
    outer_selection: &'a Cell<Option<usize>>,
}

impl ListDataSource for SectionForwarder<'_> {
    fn row_count(&mut self, _list: &ListView) -> usize {
        // A delegate reporting zero sections has no rows anywhere, even if
        // its flat row count would say otherwise.
        if delegate_section_count(self.delegate) == 0 {
            return 0;
        }
        delegate_row_count(self.delegate, self.section)
    }

    fn cell_for_row(&mut self, list: &mut ListView, row: usize) -> Box<dyn CellView> {
        match self.delegate.upgrade() {
            Some(delegate) => delegate
                .borrow_mut()
                .cell_for_row(list, RowAddress::new(self.section, row)),
            None => {
                log::debug!("delegate gone; substituting blank cell");
                Box::new(BlankCell)
            }
        }
    }

    fn height_for_row(&mut self, _list: &ListView, row: usize) -> RowHeight {
        match self.delegate.upgrade() {
            Some(delegate) => delegate
                .borrow_mut()
                .height_for_row(RowAddress::new(self.section, row)),
            None => RowHeight::Automatic,
        }
    }

    fn did_select_row(&mut self, _list: &mut ListView, row: usize) {
        // Keep the outer list's selected-row bookkeeping consistent with
        // which card is active before the consumer hears about the tap.
        self.outer_selection.set(Some(self.section));
        if let Some(delegate) = self.delegate.upgrade() {
            delegate
                .borrow_mut()
                .did_select_row(RowAddress::new(self.section, row));
        }
    }

    fn trailing_actions(&mut self, _list: &ListView, row: usize) -> Option<ActionSet> {
        let delegate = self.delegate.upgrade()?;
        let address = RowAddress::new(self.section, row);
        let result = delegate.borrow_mut().trailing_actions(address);
        result
    }

    fn will_display_row(&mut self, _list: &ListView, row: usize, cell: &mut dyn CellView) {
        if let Some(delegate) = self.delegate.upgrade() {
            delegate
                .borrow_mut()
                .will_display_row(cell, RowAddress::new(self.section, row));
        }
    }
}

/// One outer row: a decorated card hosting the nested list for a section.
pub struct SectionCell {
    section: usize,
    margin: f32,
    container: ShadowContainer,
    list: ListView,
    delegate: Weak<RefCell<dyn GroupedTableDelegate>>,
    outer_selection: Rc<Cell<Option<usize>>>,
}

impl SectionCell {
    pub fn new(outer_selection: Rc<Cell<Option<usize>>>) -> Self {
        let mut container = ShadowContainer::new();
        container.bind_child_margin(EdgeInsets::horizontal(DEFAULT_CARD_MARGIN));

        let mut list = ListView::new();
        list.set_scroll_enabled(false);

        Self {
            section: 0,
            margin: DEFAULT_CARD_MARGIN,
            container,
            list,
            delegate: Weak::<RefCell<BlankDelegate>>::new(),
            outer_selection,
        }
    }

    pub fn section(&self) -> usize {
        self.section
    }

    pub fn set_section(&mut self, section: usize) {
        self.section = section;
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Installs the delegate and, as part of this call's contract,
    /// immediately registers every cell kind the delegate declares on the
    /// nested list. This happens before any row can be requested.
    pub fn set_delegate(&mut self, delegate: Weak<RefCell<dyn GroupedTableDelegate>>) {
        self.delegate = delegate;
        if let Some(strong) = self.delegate.upgrade() {
            for (identifier, kind) in strong.borrow_mut().cell_kinds_to_register() {
                self.list.register(identifier, kind);
            }
        }
    }

    /// Installs cell kinds registered directly on the outer control.
    pub fn install_kinds(&mut self, registry: &CellRegistry) {
        self.list.install_kinds(registry);
    }

    /// Re-applies the outer control's visual settings onto the nested
    /// list, which is where they actually render.
    pub fn apply_configuration(&mut self, config: &VisualConfig) {
        self.list.set_separator_style(config.separator_style);
        self.list.set_separator_color(config.separator_color);
        self.list.set_allows_selection(config.allows_selection);
    }

    /// Updates the card bounds; the nested list fills the card inset by
    /// the margin.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.container.set_bounds(bounds);
        self.list.set_frame(self.container.child_frame());
    }

    /// Reloads the nested list through the forwarding path.
    pub fn reload_list(&mut self) {
        let mut forwarder = SectionForwarder {
            section: self.section,
            delegate: &self.delegate,
            outer_selection: &self.outer_selection,
        };
        self.list.reload(&mut forwarder);
    }

    /// Measures the authoritative height of `section`.
    ///
    /// Adopts a provisional frame of `row_count × estimated_row_height`
    /// (so auto-sizing cells have something to lay out against), performs
    /// a full synchronous reload, and returns the nested list's measured
    /// height: content plus insets plus the per-section header extent.
    pub fn measure_height(&mut self, section: usize) -> f32 {
        self.section = section;

        let count = {
            let mut forwarder = SectionForwarder {
                section: self.section,
                delegate: &self.delegate,
                outer_selection: &self.outer_selection,
            };
            forwarder.row_count(&self.list)
        };

        let mut frame = self.list.frame();
        frame.height = self.list.provisional_height(count);
        self.list.set_frame(frame);

        self.reload_list();
        self.list.measured_height()
    }

    /// Selects a local row, steering the outer selection bookkeeping and
    /// forwarding to the delegate. Returns whether the selection stuck.
    pub fn select_local_row(&mut self, row: usize) -> bool {
        if !self.list.select_row(row) {
            return false;
        }
        let mut forwarder = SectionForwarder {
            section: self.section,
            delegate: &self.delegate,
            outer_selection: &self.outer_selection,
        };
        forwarder.did_select_row(&mut self.list, row);
        true
    }

    /// Clears the nested selection.
    pub fn deselect(&mut self) {
        self.list.deselect_selected();
    }

    /// Trailing actions for a local row, forwarded to the delegate.
    pub fn trailing_actions(&mut self, row: usize) -> Option<ActionSet> {
        let mut forwarder = SectionForwarder {
            section: self.section,
            delegate: &self.delegate,
            outer_selection: &self.outer_selection,
        };
        forwarder.trailing_actions(&self.list, row)
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView {
        &mut self.list
    }

    pub fn container(&self) -> &ShadowContainer {
        &self.container
    }
}

impl std::fmt::Debug for SectionCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionCell")
            .field("section", &self.section)
            .field("rows", &self.list.row_count())
            .finish_non_exhaustive()
    }
}

/// Placeholder delegate type used only to mint an empty `Weak`.
struct BlankDelegate;

impl GroupedTableDelegate for BlankDelegate {
    fn row_count(&mut self, _section: usize) -> usize {
        0
    }

    fn cell_for_row(&mut self, _list: &mut ListView, _address: RowAddress) -> Box<dyn CellView> {
        Box::new(BlankCell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardtable_foundation::CellKind;
    use std::any::Any;

    struct TextCell {
        text: String,
        height: f32,
    }

    impl CellView for TextCell {
        fn content_height(&self, _width: f32) -> f32 {
            self.height
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct GridDelegate {
        sections: usize,
        rows: usize,
        selected: Vec<RowAddress>,
    }

    impl GridDelegate {
        fn new(sections: usize, rows: usize) -> Self {
            Self {
                sections,
                rows,
                selected: Vec::new(),
            }
        }
    }

    impl GroupedTableDelegate for GridDelegate {
        fn number_of_sections(&mut self) -> Option<usize> {
            Some(self.sections)
        }

        fn row_count(&mut self, _section: usize) -> usize {
            self.rows
        }

        fn cell_for_row(&mut self, _list: &mut ListView, address: RowAddress) -> Box<dyn CellView> {
            Box::new(TextCell {
                text: format!("cell {address}"),
                height: 50.0,
            })
        }

        fn did_select_row(&mut self, address: RowAddress) {
            self.selected.push(address);
        }
    }

    fn make_cell(
        delegate: &Rc<RefCell<GridDelegate>>,
    ) -> (SectionCell, Rc<Cell<Option<usize>>>) {
        let outer = Rc::new(Cell::new(None));
        let mut cell = SectionCell::new(Rc::clone(&outer));
        let dyn_delegate: Rc<RefCell<dyn GroupedTableDelegate>> = delegate.clone();
        cell.set_delegate(Rc::downgrade(&dyn_delegate));
        (cell, outer)
    }

    #[test]
    fn test_forwarding_tags_rows_with_section() {
        let delegate = Rc::new(RefCell::new(GridDelegate::new(3, 2)));
        let (mut cell, _outer) = make_cell(&delegate);
        cell.set_bounds(Rect::new(0.0, 0.0, 320.0, 0.0));
        cell.set_section(2);
        cell.reload_list();

        let text = cell
            .list()
            .cell_at(1)
            .and_then(|c| c.as_any().downcast_ref::<TextCell>())
            .map(|c| c.text.clone());
        assert_eq!(text.as_deref(), Some("cell [2, 1]"));
    }

    #[test]
    fn test_measure_height_sums_rows() {
        let delegate = Rc::new(RefCell::new(GridDelegate::new(2, 4)));
        let (mut cell, _outer) = make_cell(&delegate);
        cell.set_bounds(Rect::new(0.0, 0.0, 320.0, 0.0));

        let height = cell.measure_height(1);
        assert_eq!(height, 200.0);
        assert_eq!(cell.section(), 1);
    }

    #[test]
    fn test_selection_steers_outer_before_forwarding() {
        let delegate = Rc::new(RefCell::new(GridDelegate::new(2, 2)));
        let (mut cell, outer) = make_cell(&delegate);
        cell.set_bounds(Rect::new(0.0, 0.0, 320.0, 0.0));
        cell.set_section(1);
        cell.reload_list();

        assert!(cell.select_local_row(0));
        assert_eq!(outer.get(), Some(1));
        assert_eq!(
            delegate.borrow().selected,
            vec![RowAddress::new(1, 0)]
        );
    }

    #[test]
    fn test_dead_delegate_degrades_to_empty() {
        let outer = Rc::new(Cell::new(None));
        let mut cell = SectionCell::new(outer);
        cell.set_bounds(Rect::new(0.0, 0.0, 320.0, 0.0));

        let height = cell.measure_height(0);
        assert_eq!(height, 0.0);
        assert_eq!(cell.list().row_count(), 0);
        assert!(!cell.select_local_row(0));
    }

    #[test]
    fn test_set_delegate_installs_declared_kinds() {
        struct KindDelegate;

        impl GroupedTableDelegate for KindDelegate {
            fn row_count(&mut self, _section: usize) -> usize {
                1
            }

            fn cell_for_row(
                &mut self,
                list: &mut ListView,
                _address: RowAddress,
            ) -> Box<dyn CellView> {
                list.dequeue("declared")
            }

            fn cell_kinds_to_register(&mut self) -> Vec<(String, CellKind)> {
                vec![(
                    "declared".to_string(),
                    CellKind::new(|| {
                        Box::new(TextCell {
                            text: "declared".into(),
                            height: 25.0,
                        })
                    }),
                )]
            }
        }

        let delegate: Rc<RefCell<dyn GroupedTableDelegate>> =
            Rc::new(RefCell::new(KindDelegate));
        let outer = Rc::new(Cell::new(None));
        let mut cell = SectionCell::new(outer);
        cell.set_delegate(Rc::downgrade(&delegate));
        cell.set_bounds(Rect::new(0.0, 0.0, 320.0, 0.0));
        cell.reload_list();

        assert!(cell
            .list()
            .cell_at(0)
            .and_then(|c| c.as_any().downcast_ref::<TextCell>())
            .is_some());
    }
}

//! End-to-end behavior of the outer controller: measurement, caching,
//! address translation, selection steering, and visual redirection.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use cardtable_foundation::{CellKind, CellView, ListView, RowHeight, SeparatorStyle};
use cardtable_ui_graphics::Rect;

use crate::address::RowAddress;
use crate::delegate::GroupedTableDelegate;
use crate::sectioned_table::SectionedTable;

#[derive(Default)]
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

/// Delegate with a fixed per-section row count and 50pt rows, dequeuing
/// its cells from the registered "Cell" kind.
struct DemoDelegate {
    rows_per_section: Vec<usize>,
    selected: Vec<RowAddress>,
    scroll_events: Vec<f32>,
}

impl DemoDelegate {
    fn new(rows_per_section: Vec<usize>) -> Self {
        Self {
            rows_per_section,
            selected: Vec::new(),
            scroll_events: Vec::new(),
        }
    }

    fn cell_text(address: RowAddress) -> String {
        format!(
            "This is sample cell for section {} row {}",
            address.section, address.row
        )
    }
}

impl GroupedTableDelegate for DemoDelegate {
    fn number_of_sections(&mut self) -> Option<usize> {
        Some(self.rows_per_section.len())
    }

    fn row_count(&mut self, section: usize) -> usize {
        self.rows_per_section.get(section).copied().unwrap_or(0)
    }

    fn cell_for_row(&mut self, list: &mut ListView, address: RowAddress) -> Box<dyn CellView> {
        let mut cell = list.dequeue("Cell");
        if let Some(text_cell) = cell.as_any_mut().downcast_mut::<TextCell>() {
            text_cell.text = Self::cell_text(address);
        }
        cell
    }

    fn height_for_row(&mut self, _address: RowAddress) -> RowHeight {
        RowHeight::Points(50.0)
    }

    fn did_select_row(&mut self, address: RowAddress) {
        self.selected.push(address);
    }

    fn scroll_did_change(&mut self, offset: f32) {
        self.scroll_events.push(offset);
    }
}

fn make_table(rows_per_section: Vec<usize>) -> (SectionedTable, Rc<RefCell<DemoDelegate>>) {
    let delegate = Rc::new(RefCell::new(DemoDelegate::new(rows_per_section)));
    let dyn_delegate: Rc<RefCell<dyn GroupedTableDelegate>> = delegate.clone();

    let mut table = SectionedTable::new();
    table.set_frame(Rect::new(0.0, 0.0, 375.0, 600.0));
    table.register("Cell", CellKind::new(|| Box::<TextCell>::default()));
    table.set_grouped_delegate(Rc::downgrade(&dyn_delegate));
    table.reload();
    (table, delegate)
}

#[test]
fn test_cache_has_one_entry_per_nonempty_section() {
    let (table, _delegate) = make_table(vec![2, 3, 0, 1]);

    assert_eq!(table.heights.len(), 3);
    assert!(table.heights.contains_key(&0));
    assert!(table.heights.contains_key(&1));
    assert!(!table.heights.contains_key(&2));
    assert!(table.heights.contains_key(&3));

    // The empty section also collapses out of the outer list.
    assert_eq!(table.rows_in_outer_section(2), 0);
    assert_eq!(table.rows_in_outer_section(1), 1);
}

#[test]
fn test_measurement_scenario_four_rows_of_fifty() {
    let (table, _delegate) = make_table(vec![4]);

    assert_eq!(table.height_for_outer_row(0), RowHeight::Points(200.0));
}

#[test]
fn test_unmeasured_section_degrades_to_automatic() {
    let (table, _delegate) = make_table(vec![2]);

    assert_eq!(table.height_for_outer_row(7), RowHeight::Automatic);
}

#[test]
fn test_reload_is_idempotent() {
    let (mut table, _delegate) = make_table(vec![2, 3, 0, 1]);

    let first: Vec<(usize, f32)> = {
        let mut entries: Vec<_> = table.heights.iter().map(|(&s, &h)| (s, h)).collect();
        entries.sort_by_key(|&(s, _)| s);
        entries
    };
    let first_sections = table.section_count();

    table.reload();

    let second: Vec<(usize, f32)> = {
        let mut entries: Vec<_> = table.heights.iter().map(|(&s, &h)| (s, h)).collect();
        entries.sort_by_key(|&(s, _)| s);
        entries
    };

    assert_eq!(table.section_count(), first_sections);
    assert_eq!(first.len(), second.len());
    for ((s1, h1), (s2, h2)) in first.iter().zip(second.iter()) {
        assert_eq!(s1, s2);
        assert!((h1 - h2).abs() < f32::EPSILON);
    }
}

#[test]
fn test_cell_at_matches_direct_delegate_invocation() {
    let (table, _delegate) = make_table(vec![2, 2]);

    for section in 0..2 {
        for row in 0..2 {
            let address = RowAddress::new(section, row);
            let text = table
                .cell_at(address)
                .and_then(|cell| cell.as_any().downcast_ref::<TextCell>())
                .map(|cell| cell.text.clone());
            assert_eq!(text, Some(DemoDelegate::cell_text(address)));
        }
    }
}

#[test]
fn test_cell_at_unknown_address_is_none() {
    let (table, _delegate) = make_table(vec![2]);

    assert!(table.cell_at(RowAddress::new(0, 9)).is_none());
    assert!(table.cell_at(RowAddress::new(5, 0)).is_none());
}

#[test]
fn test_selection_propagates_to_outer_row() {
    let (mut table, delegate) = make_table(vec![2, 2]);

    assert!(table.select_row(RowAddress::new(1, 0)));
    assert_eq!(table.selected_section(), Some(1));
    assert_eq!(
        table.visible_cell(1).unwrap().list().selected_row(),
        Some(0)
    );
    assert_eq!(delegate.borrow().selected, vec![RowAddress::new(1, 0)]);
}

#[test]
fn test_clear_selection_clears_both_levels() {
    let (mut table, _delegate) = make_table(vec![2, 2]);
    table.select_row(RowAddress::new(1, 1));

    table.clear_selection(false);

    assert_eq!(table.selected_section(), None);
    assert_eq!(table.visible_cell(1).unwrap().list().selected_row(), None);
}

#[test]
fn test_separator_style_redirection() {
    let (mut table, _delegate) = make_table(vec![2, 2]);

    table.set_separator_style(SeparatorStyle::SingleLine);

    // The outer control always renders separator-free.
    assert_eq!(table.separator_style(), SeparatorStyle::None);
    for section in table.visible_sections() {
        let nested = table.visible_cell(section).unwrap().list();
        assert_eq!(nested.separator_style(), SeparatorStyle::SingleLine);
    }

    table.set_separator_style(SeparatorStyle::None);
    for section in table.visible_sections() {
        let nested = table.visible_cell(section).unwrap().list();
        assert_eq!(nested.separator_style(), SeparatorStyle::None);
    }
}

#[test]
fn test_allows_selection_redirection() {
    let (mut table, _delegate) = make_table(vec![2]);

    table.set_allows_selection(false);

    assert!(!table.select_row(RowAddress::new(0, 0)));
    assert_eq!(table.selected_section(), None);
}

/// A delegate that only answers flat row counts, never sections.
struct FlatDelegate {
    rows: usize,
}

impl GroupedTableDelegate for FlatDelegate {
    fn row_count(&mut self, section: usize) -> usize {
        if section == 0 {
            self.rows
        } else {
            0
        }
    }

    fn cell_for_row(&mut self, _list: &mut ListView, _address: RowAddress) -> Box<dyn CellView> {
        Box::new(TextCell {
            text: String::new(),
            height: 40.0,
        })
    }
}

#[test]
fn test_flat_delegate_implies_single_section() {
    let delegate: Rc<RefCell<dyn GroupedTableDelegate>> =
        Rc::new(RefCell::new(FlatDelegate { rows: 3 }));
    let mut table = SectionedTable::new();
    table.set_frame(Rect::new(0.0, 0.0, 375.0, 600.0));
    table.set_grouped_delegate(Rc::downgrade(&delegate));
    table.reload();

    assert_eq!(table.section_count(), 1);
    assert_eq!(table.rows_in_outer_section(0), 1);
    // Three auto-sized 40pt rows.
    assert_eq!(table.height_for_outer_row(0), RowHeight::Points(120.0));
}

#[test]
fn test_flat_delegate_with_no_rows_has_no_sections() {
    let delegate: Rc<RefCell<dyn GroupedTableDelegate>> =
        Rc::new(RefCell::new(FlatDelegate { rows: 0 }));
    let mut table = SectionedTable::new();
    table.set_frame(Rect::new(0.0, 0.0, 375.0, 600.0));
    table.set_grouped_delegate(Rc::downgrade(&delegate));
    table.reload();

    assert_eq!(table.section_count(), 0);
    assert!(table.heights.is_empty());
    assert!(table.visible_sections().is_empty());
}

#[test]
fn test_dead_delegate_degrades_to_empty() {
    let mut table = SectionedTable::new();
    table.set_frame(Rect::new(0.0, 0.0, 375.0, 600.0));
    {
        let delegate: Rc<RefCell<dyn GroupedTableDelegate>> =
            Rc::new(RefCell::new(FlatDelegate { rows: 3 }));
        table.set_grouped_delegate(Rc::downgrade(&delegate));
        table.reload();
        assert_eq!(table.section_count(), 1);
    }

    // The consumer dropped the delegate; everything empties out.
    table.reload();
    assert_eq!(table.section_count(), 0);
    assert!(table.heights.is_empty());
    assert!(table.visible_sections().is_empty());
    assert_eq!(table.height_for_outer_row(0), RowHeight::Automatic);
}

#[test]
fn test_scrolling_rematerializes_and_notifies() {
    // Ten sections of two 50pt rows: each card is 100pt, viewport 250pt.
    let (mut table, delegate) = make_table(vec![2; 10]);
    table.set_frame(Rect::new(0.0, 0.0, 375.0, 250.0));

    let at_top = table.visible_sections();
    assert_eq!(at_top, vec![0, 1, 2]);

    table.set_scroll_offset(400.0);

    let scrolled = table.visible_sections();
    assert_eq!(scrolled, vec![4, 5, 6]);
    assert_eq!(delegate.borrow().scroll_events, vec![400.0]);
}

#[test]
fn test_scroll_offset_clamps_to_content() {
    let (mut table, _delegate) = make_table(vec![2; 4]);
    table.set_frame(Rect::new(0.0, 0.0, 375.0, 250.0));

    table.set_scroll_offset(10_000.0);

    // 4 cards * 100pt - 250pt viewport.
    assert_eq!(table.scroll_offset(), 150.0);
}

#[test]
fn test_content_height_sums_cards() {
    let (table, _delegate) = make_table(vec![2, 3]);

    // 100 + 150.
    assert_eq!(table.content_height(), 250.0);
}

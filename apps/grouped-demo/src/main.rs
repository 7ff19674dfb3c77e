//! Headless drive of the grouped card table.
//!
//! Builds the same data the original demo controller shows — ten sections
//! of two sample rows each — then reloads, scrolls, and selects, printing
//! what a host renderer would consume at each step.
//!
//! Run with `RUST_LOG=debug` to see the measurement pass at work.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use cardtable_ui::{
    CellKind, CellView, GroupedTableDelegate, ListView, Rect, RowAddress, SectionedTable,
};

/// A label-like cell that wraps its text and sizes itself accordingly.
#[derive(Default)]
struct SampleCell {
    text: String,
}

/// Rough glyph advance for the demo's fake text metrics.
const CHAR_WIDTH: f32 = 7.0;
const LINE_HEIGHT: f32 = 20.0;
const TEXT_PADDING: f32 = 24.0;

impl CellView for SampleCell {
    fn content_height(&self, width: f32) -> f32 {
        let per_line = ((width / CHAR_WIDTH).floor() as usize).max(1);
        let lines = self.text.len().div_ceil(per_line).max(1);
        lines as f32 * LINE_HEIGHT + TEXT_PADDING
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct DemoDelegate;

impl GroupedTableDelegate for DemoDelegate {
    fn number_of_sections(&mut self) -> Option<usize> {
        Some(10)
    }

    fn row_count(&mut self, _section: usize) -> usize {
        2
    }

    fn cell_for_row(&mut self, list: &mut ListView, address: RowAddress) -> Box<dyn CellView> {
        let mut cell = list.dequeue("Cell");
        if let Some(sample) = cell.as_any_mut().downcast_mut::<SampleCell>() {
            sample.text = format!(
                "This is sample cell for section {} row {}",
                address.section, address.row
            );
        }
        cell
    }

    fn did_select_row(&mut self, address: RowAddress) {
        println!("delegate: row selected at {address}");
    }

    fn scroll_did_change(&mut self, offset: f32) {
        println!("delegate: scrolled to {offset}");
    }
}

fn main() {
    env_logger::init();

    let delegate: Rc<RefCell<dyn GroupedTableDelegate>> = Rc::new(RefCell::new(DemoDelegate));

    let mut table = SectionedTable::new();
    table.set_frame(Rect::new(0.0, 0.0, 375.0, 667.0));
    table.register("Cell", CellKind::new(|| Box::<SampleCell>::default()));
    table.set_grouped_delegate(Rc::downgrade(&delegate));
    table.reload();

    println!("sections: {}", table.section_count());
    println!("content height: {:.1}", table.content_height());
    for section in 0..table.section_count() {
        println!(
            "  section {section}: height {:?}",
            table.height_for_outer_row(section)
        );
    }

    println!("visible sections: {:?}", table.visible_sections());
    if let Some(cell) = table.visible_cell(0) {
        if let Some(decoration) = cell.container().decoration() {
            println!(
                "card 0 decoration: opacity {:.2}, blur {:.1}, corners {:.1}",
                decoration.shadow.opacity, decoration.shadow.blur, decoration.corner_radii.top_left
            );
        }
    }

    table.select_row(RowAddress::new(0, 1));
    println!("selected section: {:?}", table.selected_section());
    table.clear_selection(true);
    println!("after clear: {:?}", table.selected_section());

    table.set_scroll_offset(300.0);
    println!("visible after scroll: {:?}", table.visible_sections());

    // Keep the delegate alive until the drive is over.
    drop(delegate);
}

//! The consumer-facing delegate capability set.
//!
//! One object answers everything the control needs, addressed at logical
//! `(section, row)` granularity. Only [`row_count`] and [`cell_for_row`]
//! are mandatory; every other method is an optional capability with a
//! documented neutral default, so a delegate implements exactly what it
//! cares about.
//!
//! The control holds the delegate weakly. The consumer owns the `Rc`; if
//! it drops the delegate, the control degrades to zero sections and empty
//! content rather than failing.
//!
//! [`row_count`]: GroupedTableDelegate::row_count
//! [`cell_for_row`]: GroupedTableDelegate::cell_for_row

use std::cell::RefCell;
use std::rc::Weak;

use cardtable_foundation::{ActionSet, CellKind, CellView, ListView, RowHeight};

use crate::address::RowAddress;

/// An opaque section header or footer supplied by the delegate.
///
/// The control forwards these verbatim at section granularity; building an
/// actual view tree out of one is the host's job.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeaderView {
    pub title: String,
    pub height: f32,
}

impl HeaderView {
    pub fn new(title: impl Into<String>, height: f32) -> Self {
        Self {
            title: title.into(),
            height,
        }
    }

    /// The empty placeholder substituted when a delegate declines to
    /// provide a header.
    pub fn empty() -> Self {
        Self::default()
    }
}

pub trait GroupedTableDelegate {
    /// Number of sections, or `None` when the delegate does not implement
    /// multi-section support. A `None` answer falls back to a single
    /// implicit section when `row_count(0) > 0`.
    fn number_of_sections(&mut self) -> Option<usize> {
        None
    }

    /// Number of logical rows in `section`.
    fn row_count(&mut self, section: usize) -> usize;

    /// Produces the cell for `address`, typically by dequeuing a
    /// registered kind from the nested list.
    fn cell_for_row(&mut self, list: &mut ListView, address: RowAddress) -> Box<dyn CellView>;

    fn did_select_row(&mut self, address: RowAddress) {
        let _ = address;
    }

    fn height_for_row(&mut self, address: RowAddress) -> RowHeight {
        let _ = address;
        RowHeight::Automatic
    }

    fn trailing_actions(&mut self, address: RowAddress) -> Option<ActionSet> {
        let _ = address;
        None
    }

    fn will_display_row(&mut self, cell: &mut dyn CellView, address: RowAddress) {
        let _ = (cell, address);
    }

    fn header_view(&mut self, section: usize) -> Option<HeaderView> {
        let _ = section;
        None
    }

    fn footer_view(&mut self, section: usize) -> Option<HeaderView> {
        let _ = section;
        None
    }

    fn footer_height(&mut self, section: usize) -> RowHeight {
        let _ = section;
        RowHeight::Automatic
    }

    /// The outer list's scroll position changed.
    fn scroll_did_change(&mut self, offset: f32) {
        let _ = offset;
    }

    /// Cell kinds the delegate needs installed on every nested list before
    /// it renders.
    fn cell_kinds_to_register(&mut self) -> Vec<(String, CellKind)> {
        Vec::new()
    }
}

/// Section count of a possibly-dead delegate, applying the
/// implicit-single-section fallback: a delegate that never implements
/// `number_of_sections` but reports rows in section 0 is one section.
pub(crate) fn delegate_section_count(delegate: &Weak<RefCell<dyn GroupedTableDelegate>>) -> usize {
    let Some(delegate) = delegate.upgrade() else {
        return 0;
    };
    let mut delegate = delegate.borrow_mut();
    match delegate.number_of_sections() {
        Some(count) => count,
        None => {
            if delegate.row_count(0) > 0 {
                1
            } else {
                0
            }
        }
    }
}

/// Row count of `section` for a possibly-dead delegate.
pub(crate) fn delegate_row_count(
    delegate: &Weak<RefCell<dyn GroupedTableDelegate>>,
    section: usize,
) -> usize {
    match delegate.upgrade() {
        Some(delegate) => delegate.borrow_mut().row_count(section),
        None => 0,
    }
}

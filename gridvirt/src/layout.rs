//! Viewport-relative cell layout.
//!
//! Absolute offsets (`index * size`) for tens of thousands of rows quickly exceed what
//! rendering backends can position precisely (browsers cap coordinates around 33M px). Every
//! offset produced here is instead measured from the first row/column of the resolved
//! [`VisibleRange`], so it stays within the viewport size plus overscan no matter where the
//! viewport is. The host translates the whole rendered block by the block origin
//! (`GridVirtualizer::origin`).

use alloc::vec::Vec;

use crate::{AxisRange, CellLayout, Fault, SizeResolver, VisibleRange};

/// Computes the layout of cell `(row, column)` relative to `range`.
///
/// Indexes before the first visible index get negative offsets.
pub fn layout_cell(
    row: usize,
    column: usize,
    range: &VisibleRange,
    rows: &SizeResolver<'_>,
    columns: &SizeResolver<'_>,
) -> CellLayout {
    layout_cell_with(row, column, range, rows, columns, &mut |_| {})
}

pub fn layout_cell_with(
    row: usize,
    column: usize,
    range: &VisibleRange,
    rows: &SizeResolver<'_>,
    columns: &SizeResolver<'_>,
    on_fault: &mut dyn FnMut(Fault),
) -> CellLayout {
    let (top, height) = relative_slot(rows, row, range.rows.first, on_fault);
    let (left, width) = relative_slot(columns, column, range.columns.first, on_fault);
    CellLayout {
        top,
        left,
        height,
        width,
    }
}

/// Offset of `index` measured from `first`, and the size of `index`.
fn relative_slot(
    resolver: &SizeResolver<'_>,
    index: usize,
    first: usize,
    on_fault: &mut dyn FnMut(Fault),
) -> (f64, f64) {
    if let Some(size) = resolver.uniform_with(index, on_fault) {
        let offset = if index >= first {
            (index - first) as f64 * size
        } else {
            -((first - index) as f64 * size)
        };
        return (offset, size);
    }

    let offset = if index >= first {
        resolver.cumulative_with(index - first, first, on_fault)
    } else {
        -resolver.cumulative_with(first - index, index, on_fault)
    };
    (offset, resolver.resolve_with(index, on_fault))
}

/// Offset and size of one index along an axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Slot {
    pub(crate) offset: f64,
    pub(crate) size: f64,
}

/// Lays out every index of `range` along one axis, in one pass.
///
/// Produces bit-identical values to [`layout_cell`] for the same range: fixed sizes use
/// `relative_index * size`, computed sizes a running sum in index order.
pub(crate) fn axis_slots(
    resolver: &SizeResolver<'_>,
    range: AxisRange,
    on_fault: &mut dyn FnMut(Fault),
    out: &mut Vec<Slot>,
) {
    out.clear();
    if range.is_empty() {
        return;
    }
    out.reserve(range.len());

    if let Some(size) = resolver.uniform_with(range.first, on_fault) {
        for relative in 0..range.len() {
            out.push(Slot {
                offset: relative as f64 * size,
                size,
            });
        }
        return;
    }

    let mut offset = 0.0;
    for i in range.indices() {
        let size = resolver.resolve_with(i, on_fault);
        out.push(Slot { offset, size });
        offset += size;
    }
}

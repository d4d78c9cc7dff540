use crate::prefix::PrefixSums;
use crate::{AxisRange, Dimensions, GridShape, Overscan, ScrollOffset, Viewport, VisibleRange};

/// How a scroll offset is mapped to a row/column index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeStrategy {
    /// `floor(offset / average_size)`. O(1); exact for fixed sizes, approximate for computed
    /// sizes with high variance.
    #[default]
    Average,
    /// Binary search over cumulative sizes, built once per shape change. Exact for computed
    /// sizes at the cost of O(count) memory per computed axis.
    Exact,
}

/// Maps an offset along one axis to an (unclamped) index.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Locator<'a> {
    Average(f64),
    Exact(&'a PrefixSums),
}

impl Locator<'_> {
    pub(crate) fn index_at(&self, offset: f64) -> usize {
        match self {
            Self::Average(avg) => {
                if *avg > 0.0 {
                    floor_index(offset / avg)
                } else {
                    0
                }
            }
            Self::Exact(prefix) => prefix.index_at(offset),
        }
    }

    /// Absolute offset of `index` from the grid origin.
    pub(crate) fn start_of(&self, index: usize) -> f64 {
        match self {
            Self::Average(avg) => index as f64 * avg,
            Self::Exact(prefix) => prefix.start_of(index),
        }
    }

    pub(crate) fn size_of(&self, index: usize) -> f64 {
        match self {
            Self::Average(avg) => *avg,
            Self::Exact(prefix) => prefix.size_of(index),
        }
    }
}

/// `floor(v)` as an index. NaN and negative values map to 0; huge values saturate.
pub(crate) fn floor_index(v: f64) -> usize {
    if v.is_nan() || v <= 0.0 {
        0
    } else {
        // `as` truncates toward zero and saturates, which is `floor` for non-negative input.
        v as usize
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.max(0.0) }
}

/// Resolves the rows and columns to render for the given scroll position.
///
/// Uses the average sizes in `dims` (see [`RangeStrategy::Average`]).
pub fn resolve_range(
    viewport: Viewport,
    scroll: ScrollOffset,
    shape: &GridShape,
    dims: &Dimensions,
    overscan: Overscan,
) -> VisibleRange {
    VisibleRange {
        rows: resolve_axis(
            scroll.top,
            viewport.height,
            shape.row_count,
            overscan.row_count,
            Locator::Average(dims.avg_row_height),
        ),
        columns: resolve_axis(
            scroll.left,
            viewport.width,
            shape.column_count,
            overscan.column_count,
            Locator::Average(dims.avg_column_width),
        ),
    }
}

/// Resolves one axis.
///
/// `first = first_visible - overscan` and `last = last_visible + overscan`, both clamped to
/// `[0, count - 1]`. A zero `count` yields [`AxisRange::EMPTY`].
pub(crate) fn resolve_axis(
    offset: f64,
    extent: f64,
    count: usize,
    overscan: usize,
    locator: Locator<'_>,
) -> AxisRange {
    if count == 0 {
        return AxisRange::EMPTY;
    }
    let offset = non_negative(offset);
    let end = offset + non_negative(extent);

    let first_visible = locator.index_at(offset);
    // A zero average means every item has zero size: only the first one is considered
    // visible so the work stays bounded.
    let last_visible = locator.index_at(end).max(first_visible);

    let max_index = count - 1;
    let first = first_visible.saturating_sub(overscan).min(max_index);
    let last = last_visible.saturating_add(overscan).min(max_index);
    AxisRange::new(first, last)
}

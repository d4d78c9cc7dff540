use core::fmt;

/// One of the two virtualized axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Row => "row",
            Self::Column => "column",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// The visible window extent, in the same unit as cell sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub height: f64,
    pub width: f64,
}

impl Viewport {
    pub fn new(height: f64, width: f64) -> Self {
        Self { height, width }
    }

    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.height,
            Axis::Column => self.width,
        }
    }
}

/// Distance scrolled from the grid origin along each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollOffset {
    pub top: f64,
    pub left: f64,
}

impl ScrollOffset {
    pub const ORIGIN: Self = Self {
        top: 0.0,
        left: 0.0,
    };

    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.top,
            Axis::Column => self.left,
        }
    }
}

/// Total content extent of the grid (the size of the outer scroll surface).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub height: f64,
    pub width: f64,
}

/// Extra rows/columns rendered on each side of the strictly visible window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overscan {
    pub row_count: usize,
    pub column_count: usize,
}

impl Overscan {
    pub const NONE: Self = Self {
        row_count: 0,
        column_count: 0,
    };

    pub fn new(row_count: usize, column_count: usize) -> Self {
        Self {
            row_count,
            column_count,
        }
    }

    pub fn along(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.row_count,
            Axis::Column => self.column_count,
        }
    }
}

impl Default for Overscan {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// An inclusive index range along one axis.
///
/// An empty axis (count 0) is represented by [`AxisRange::EMPTY`]: both bounds are 0 and
/// [`AxisRange::indices`] yields nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisRange {
    pub first: usize,
    pub last: usize,
    len: usize,
}

impl AxisRange {
    pub const EMPTY: Self = Self {
        first: 0,
        last: 0,
        len: 0,
    };

    pub fn new(first: usize, last: usize) -> Self {
        debug_assert!(first <= last, "AxisRange: first={first} > last={last}");
        Self {
            first,
            last,
            len: last.saturating_sub(first).saturating_add(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn contains(&self, index: usize) -> bool {
        !self.is_empty() && index >= self.first && index <= self.last
    }

    /// The indexes in this range, in ascending order.
    pub fn indices(&self) -> core::ops::Range<usize> {
        self.first..self.first + self.len
    }
}

/// The rows and columns to render, overscan included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub rows: AxisRange,
    pub columns: AxisRange,
}

impl VisibleRange {
    pub const EMPTY: Self = Self {
        rows: AxisRange::EMPTY,
        columns: AxisRange::EMPTY,
    };

    pub fn along(&self, axis: Axis) -> AxisRange {
        match axis {
            Axis::Row => self.rows,
            Axis::Column => self.columns,
        }
    }

    /// `true` when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len().saturating_mul(self.columns.len())
    }

    pub fn contains(&self, row: usize, column: usize) -> bool {
        self.rows.contains(row) && self.columns.contains(column)
    }
}

impl Default for VisibleRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Position and size of one cell.
///
/// `top`/`left` are relative to the first row/column of the [`VisibleRange`] the layout was
/// computed for, not to the grid origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellLayout {
    pub top: f64,
    pub left: f64,
    pub height: f64,
    pub width: f64,
}

impl CellLayout {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// A visible cell handed to the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualCell {
    pub row: usize,
    pub column: usize,
    pub layout: CellLayout,
}

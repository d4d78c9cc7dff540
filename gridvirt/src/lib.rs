//! A headless virtualization engine for very large two-dimensional grids.
//!
//! For input sanitization and a host-facing controller, see the `gridvirt-adapter` crate.
//!
//! Only the part of the grid that intersects the viewport (plus overscan) is ever touched:
//! dimensions are derived once per shape change, the visible row/column range is computed
//! from the scroll offset in O(1) (or O(log n) with [`RangeStrategy::Exact`]), and each
//! visible cell gets a layout relative to the first visible row/column so coordinates stay
//! small even at the far end of a grid with 10⁵ rows.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the grid shape (row/column counts and size specs)
//! - viewport size (height/width)
//! - scroll offsets from the scroll surface
//! - a cell renderer
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod callback;
mod dimensions;
mod error;
mod grid;
mod layout;
mod options;
mod prefix;
mod range;
mod render;
mod scroll;
mod size;
mod types;


pub use dimensions::{Dimensions, GridShape};
pub use error::{CallbackError, Fault, SizeFault};
pub use grid::GridVirtualizer;
pub use layout::{layout_cell, layout_cell_with};
pub use options::{GridOptions, OnChangeCallback, OnFaultCallback};
pub use range::{RangeStrategy, resolve_range};
pub use render::{CellContent, CellRenderer, GridFrame, RenderedCell, TryRender};
pub use scroll::{correct_scroll, max_scroll};
pub use size::{
    DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT, FallbackSizes, SizeFn, SizeResolver, SizeSpec,
};
pub use types::{
    Align, Axis, AxisRange, CellLayout, Extent, Overscan, ScrollOffset, Viewport, VirtualCell,
    VisibleRange,
};

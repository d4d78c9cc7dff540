use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::callback;
use crate::dimensions::{AxisMetrics, measure_axis};
use crate::layout::{Slot, axis_slots};
use crate::prefix::PrefixSums;
use crate::range::{Locator, resolve_axis};
use crate::scroll::align_offset;
use crate::{
    Align, Axis, AxisRange, CellContent, CellLayout, CellRenderer, Dimensions, Extent, Fault,
    FallbackSizes, GridFrame, GridOptions, GridShape, Overscan, RangeStrategy, RenderedCell,
    ScrollOffset, SizeResolver, SizeSpec, Viewport, VirtualCell, VisibleRange, correct_scroll,
    layout_cell_with, max_scroll,
};

/// Which inputs changed since the last recomputation.
#[derive(Clone, Copy, Debug, Default)]
struct Dirty {
    shape: bool,
    viewport: bool,
    scroll: bool,
    range: bool,
}

impl Dirty {
    const ALL: Self = Self {
        shape: true,
        viewport: true,
        scroll: true,
        range: true,
    };

    fn any(&self) -> bool {
        self.shape || self.viewport || self.scroll || self.range
    }

    fn merge(&mut self, other: Self) {
        self.shape |= other.shape;
        self.viewport |= other.viewport;
        self.scroll |= other.scroll;
        self.range |= other.range;
    }
}

/// A headless two-dimensional grid virtualization engine.
///
/// The host drives it with configuration changes and scroll events; after each change the
/// virtualizer holds freshly derived [`Dimensions`], a corrected [`ScrollOffset`] and the
/// [`VisibleRange`] to render. Each input change triggers exactly one recomputation (or one
/// per [`batch_update`](Self::batch_update)), and enumeration never touches indexes outside
/// the resolved range, so the work per frame is bounded by the viewport and overscan, not by
/// the grid size.
///
/// Cell layouts are viewport-relative: see [`crate::layout_cell`].
#[derive(Clone, Debug)]
pub struct GridVirtualizer {
    options: GridOptions,
    scroll: ScrollOffset,

    dims: Dimensions,
    row_prefix: Option<PrefixSums>,
    column_prefix: Option<PrefixSums>,
    range: VisibleRange,
    origin: ScrollOffset,

    dirty: Dirty,
    batch_depth: usize,
    recomputes: u64,
    faults: Cell<u64>,
}

impl GridVirtualizer {
    /// Creates a virtualizer and derives its initial state.
    ///
    /// `options.initial_scroll` is clamped to the content. `on_change` is not fired.
    pub fn new(options: GridOptions) -> Self {
        gdebug!(
            rows = options.shape.row_count,
            columns = options.shape.column_count,
            overscan_rows = options.overscan.row_count,
            overscan_columns = options.overscan.column_count,
            "GridVirtualizer::new"
        );
        let mut v = Self {
            scroll: options.initial_scroll,
            options,
            dims: Dimensions::default(),
            row_prefix: None,
            column_prefix: None,
            range: VisibleRange::EMPTY,
            origin: ScrollOffset::ORIGIN,
            dirty: Dirty::default(),
            batch_depth: 0,
            recomputes: 0,
            faults: Cell::new(0),
        };
        v.recompute(Dirty::ALL);
        v
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Replaces the options, recomputing only what the change requires.
    ///
    /// The current scroll offset is kept (and corrected); `initial_scroll` is ignored.
    pub fn set_options(&mut self, options: GridOptions) {
        let dirty = Dirty {
            shape: !self.options.shape.same_as(&options.shape)
                || self.options.fallback != options.fallback
                || self.options.strategy != options.strategy,
            viewport: self.options.viewport != options.viewport,
            scroll: false,
            range: self.options.overscan != options.overscan,
        };
        self.options = options;
        gtrace!(
            rows = self.options.shape.row_count,
            columns = self.options.shape.column_count,
            "GridVirtualizer::set_options"
        );
        self.mark(dirty);
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut GridOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(&mut self, on_change: Option<impl Fn(&Self) + Send + Sync + 'static>) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    pub fn set_on_fault(&mut self, on_fault: Option<impl Fn(&Fault) + Send + Sync + 'static>) {
        self.options.on_fault = on_fault.map(|f| Arc::new(f) as _);
    }

    /// Coalesces several updates into a single recomputation and `on_change` notification.
    ///
    /// On a typical frame an adapter may update the viewport, the scroll offset and the grid
    /// size together; without batching each setter would recompute on its own.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);
        f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 {
            self.flush();
        }
    }

    pub fn shape(&self) -> &GridShape {
        &self.options.shape
    }

    pub fn row_count(&self) -> usize {
        self.options.shape.row_count
    }

    pub fn column_count(&self) -> usize {
        self.options.shape.column_count
    }

    pub fn set_shape(&mut self, shape: GridShape) {
        if self.options.shape.same_as(&shape) {
            return;
        }
        self.options.shape = shape;
        self.mark(Dirty {
            shape: true,
            ..Dirty::default()
        });
    }

    pub fn set_row_count(&mut self, row_count: usize) {
        if self.options.shape.row_count == row_count {
            return;
        }
        self.options.shape.row_count = row_count;
        self.mark(Dirty {
            shape: true,
            ..Dirty::default()
        });
    }

    pub fn set_column_count(&mut self, column_count: usize) {
        if self.options.shape.column_count == column_count {
            return;
        }
        self.options.shape.column_count = column_count;
        self.mark(Dirty {
            shape: true,
            ..Dirty::default()
        });
    }

    pub fn set_row_size(&mut self, row_size: impl Into<SizeSpec>) {
        let row_size = row_size.into();
        if self.options.shape.row_size.same_as(&row_size) {
            return;
        }
        self.options.shape.row_size = row_size;
        self.mark(Dirty {
            shape: true,
            ..Dirty::default()
        });
    }

    pub fn set_column_size(&mut self, column_size: impl Into<SizeSpec>) {
        let column_size = column_size.into();
        if self.options.shape.column_size.same_as(&column_size) {
            return;
        }
        self.options.shape.column_size = column_size;
        self.mark(Dirty {
            shape: true,
            ..Dirty::default()
        });
    }

    pub fn set_fallback_sizes(&mut self, fallback: FallbackSizes) {
        if self.options.fallback == fallback {
            return;
        }
        self.options.fallback = fallback;
        self.mark(Dirty {
            shape: true,
            ..Dirty::default()
        });
    }

    pub fn strategy(&self) -> RangeStrategy {
        self.options.strategy
    }

    pub fn set_strategy(&mut self, strategy: RangeStrategy) {
        if self.options.strategy == strategy {
            return;
        }
        self.options.strategy = strategy;
        self.mark(Dirty {
            shape: true,
            ..Dirty::default()
        });
    }

    pub fn viewport(&self) -> Viewport {
        self.options.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.options.viewport == viewport {
            return;
        }
        self.options.viewport = viewport;
        self.mark(Dirty {
            viewport: true,
            ..Dirty::default()
        });
    }

    pub fn set_viewport_size(&mut self, height: f64, width: f64) {
        self.set_viewport(Viewport::new(height, width));
    }

    pub fn overscan(&self) -> Overscan {
        self.options.overscan
    }

    pub fn set_overscan(&mut self, overscan: Overscan) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.mark(Dirty {
            range: true,
            ..Dirty::default()
        });
    }

    pub fn scroll(&self) -> ScrollOffset {
        self.scroll
    }

    /// Applies a scroll offset reported by the viewport widget.
    ///
    /// The offset is corrected into the valid range. Returns the applied offset; when it
    /// differs from `offset` the host should write it back to its scroll surface. Inside a
    /// batch the correction happens when the batch ends, so the returned value is the
    /// uncorrected input.
    pub fn set_scroll(&mut self, offset: ScrollOffset) -> ScrollOffset {
        if self.scroll == offset {
            return self.scroll;
        }
        gtrace!(top = offset.top, left = offset.left, "set_scroll");
        self.scroll = offset;
        self.mark(Dirty {
            scroll: true,
            ..Dirty::default()
        });
        self.scroll
    }

    pub fn scroll_by(&mut self, delta_top: f64, delta_left: f64) -> ScrollOffset {
        let next = ScrollOffset::new(self.scroll.top + delta_top, self.scroll.left + delta_left);
        self.set_scroll(next)
    }

    /// Scroll offset that brings cell `(row, column)` into view, clamped to the content.
    ///
    /// Positions come from the range strategy: exact for fixed sizes and for
    /// [`RangeStrategy::Exact`], average-based otherwise.
    pub fn scroll_to_cell_offset(&self, row: usize, column: usize, align: Align) -> ScrollOffset {
        let target = ScrollOffset {
            top: self.scroll_to_axis_offset(Axis::Row, row, align),
            left: self.scroll_to_axis_offset(Axis::Column, column, align),
        };
        correct_scroll(target, &self.dims, self.options.viewport)
    }

    /// Scrolls so that cell `(row, column)` is in view. Returns the applied offset.
    pub fn scroll_to_cell(&mut self, row: usize, column: usize, align: Align) -> ScrollOffset {
        let offset = self.scroll_to_cell_offset(row, column, align);
        self.set_scroll(offset)
    }

    fn scroll_to_axis_offset(&self, axis: Axis, index: usize, align: Align) -> f64 {
        let count = self.options.shape.count(axis);
        let current = self.scroll.along(axis);
        if count == 0 {
            return current;
        }
        let index = index.min(count - 1);
        let locator = self.locator(axis);
        align_offset(
            locator.start_of(index),
            locator.size_of(index),
            current,
            self.options.viewport.along(axis),
            align,
        )
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn total_size(&self) -> Extent {
        self.dims.extent()
    }

    pub fn max_scroll(&self) -> ScrollOffset {
        max_scroll(&self.dims, self.options.viewport)
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.range
    }

    /// Absolute offset of the first rendered row (`top`) and column (`left`).
    ///
    /// Cell layouts are relative to this point; the host translates the rendered block by it.
    pub fn origin(&self) -> ScrollOffset {
        self.origin
    }

    /// Number of recomputations performed so far (including the one in `new`).
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Number of faults contained so far.
    pub fn fault_count(&self) -> u64 {
        self.faults.get()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Row under a viewport-relative vertical position, if any.
    pub fn row_at_offset(&self, y: f64) -> Option<usize> {
        self.index_at_offset(Axis::Row, y)
    }

    /// Column under a viewport-relative horizontal position, if any.
    pub fn column_at_offset(&self, x: f64) -> Option<usize> {
        self.index_at_offset(Axis::Column, x)
    }

    fn index_at_offset(&self, axis: Axis, offset_in_viewport: f64) -> Option<usize> {
        let count = self.options.shape.count(axis);
        if count == 0 {
            return None;
        }
        let absolute = self.scroll.along(axis) + offset_in_viewport.max(0.0);
        Some(self.locator(axis).index_at(absolute).min(count - 1))
    }

    /// Layout of a cell inside the current visible range.
    pub fn cell_layout(&self, row: usize, column: usize) -> Option<CellLayout> {
        if !self.range.contains(row, column) {
            return None;
        }
        let rows = self.resolver(Axis::Row);
        let columns = self.resolver(Axis::Column);
        Some(layout_cell_with(
            row,
            column,
            &self.range,
            &rows,
            &columns,
            &mut |fault| self.report(&fault),
        ))
    }

    /// Visits every cell of the visible range in row-major order.
    pub fn for_each_cell(&self, f: impl FnMut(VirtualCell)) {
        self.for_each_cell_with(f, &mut |_| {});
    }

    fn for_each_cell_with(&self, mut f: impl FnMut(VirtualCell), sink: &mut dyn FnMut(Fault)) {
        if self.range.is_empty() {
            return;
        }
        let mut on_fault = |fault: Fault| {
            self.report(&fault);
            sink(fault);
        };

        let mut columns = Vec::new();
        axis_slots(
            &self.resolver(Axis::Column),
            self.range.columns,
            &mut on_fault,
            &mut columns,
        );

        let rows = self.resolver(Axis::Row);
        let uniform_height = rows.uniform_with(self.range.rows.first, &mut on_fault);
        let mut top = 0.0;
        for (relative, row) in self.range.rows.indices().enumerate() {
            let height = match uniform_height {
                Some(height) => {
                    top = relative as f64 * height;
                    height
                }
                None => rows.resolve_with(row, &mut on_fault),
            };
            for (column, &Slot { offset, size }) in self.range.columns.indices().zip(&columns) {
                f(VirtualCell {
                    row,
                    column,
                    layout: CellLayout {
                        top,
                        left: offset,
                        height,
                        width: size,
                    },
                });
            }
            if uniform_height.is_none() {
                top += height;
            }
        }
    }

    /// Collects the visible cells into `out` (clears `out` first).
    ///
    /// Convenience wrapper around [`Self::for_each_cell`]; reuse `out` across frames.
    pub fn collect_cells(&self, out: &mut Vec<VirtualCell>) {
        out.clear();
        out.reserve(self.range.cell_count());
        self.for_each_cell(|cell| out.push(cell));
    }

    /// Renders every visible cell.
    ///
    /// A renderer failure (error or panic) yields [`CellContent::Placeholder`] for that cell
    /// only; enumeration continues. Contained faults are listed in the frame.
    pub fn render_frame<R: CellRenderer>(&self, renderer: &mut R) -> GridFrame<R::Output> {
        let mut faults = Vec::new();
        let mut visible = Vec::with_capacity(self.range.cell_count());
        self.for_each_cell_with(|cell| visible.push(cell), &mut |fault| faults.push(fault));

        let mut cells = Vec::with_capacity(visible.len());
        for cell in visible {
            let content = match callback::invoke(|| renderer.render(&cell)) {
                Ok(out) => CellContent::Rendered(out),
                Err(error) => {
                    gwarn!(
                        row = cell.row,
                        column = cell.column,
                        error = %error,
                        "render callback failed, substituting placeholder"
                    );
                    let fault = Fault::Render {
                        row: cell.row,
                        column: cell.column,
                        error: error.clone(),
                    };
                    self.report(&fault);
                    faults.push(fault);
                    CellContent::Placeholder(error)
                }
            };
            cells.push(RenderedCell { cell, content });
        }

        GridFrame {
            total: self.total_size(),
            scroll: self.scroll,
            origin: self.origin,
            range: self.range,
            cells,
            faults,
        }
    }

    fn resolver(&self, axis: Axis) -> SizeResolver<'_> {
        SizeResolver::new(
            self.options.shape.size(axis),
            axis,
            self.options.fallback.along(axis),
        )
    }

    fn locator(&self, axis: Axis) -> Locator<'_> {
        let prefix = match axis {
            Axis::Row => self.row_prefix.as_ref(),
            Axis::Column => self.column_prefix.as_ref(),
        };
        match prefix {
            Some(prefix) => Locator::Exact(prefix),
            None => Locator::Average(self.dims.avg(axis)),
        }
    }

    fn report(&self, fault: &Fault) {
        self.faults.set(self.faults.get().saturating_add(1));
        if let Some(cb) = &self.options.on_fault {
            cb(fault);
        }
    }

    fn mark(&mut self, dirty: Dirty) {
        self.dirty.merge(dirty);
        if self.batch_depth == 0 {
            self.flush();
        }
    }

    fn flush(&mut self) {
        let dirty = core::mem::take(&mut self.dirty);
        if !dirty.any() {
            return;
        }
        self.recompute(dirty);
        self.notify();
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn recompute(&mut self, dirty: Dirty) {
        self.recomputes = self.recomputes.saturating_add(1);

        if dirty.shape {
            let with_prefix = self.options.strategy == RangeStrategy::Exact;
            let (rows, columns) = {
                let mut on_fault = |fault: Fault| self.report(&fault);
                let shape = &self.options.shape;
                let fallback = self.options.fallback;
                (
                    measure_axis(shape, fallback, Axis::Row, with_prefix, &mut on_fault),
                    measure_axis(shape, fallback, Axis::Column, with_prefix, &mut on_fault),
                )
            };
            self.apply_metrics(rows, columns);
        }

        if dirty.shape || dirty.viewport || dirty.scroll {
            let corrected = correct_scroll(self.scroll, &self.dims, self.options.viewport);
            if corrected != self.scroll {
                gtrace!(
                    top = corrected.top,
                    left = corrected.left,
                    "scroll corrected"
                );
            }
            self.scroll = corrected;
        }

        let viewport = self.options.viewport;
        let overscan = self.options.overscan;
        let range = VisibleRange {
            rows: self.resolve_axis_range(Axis::Row, viewport, overscan),
            columns: self.resolve_axis_range(Axis::Column, viewport, overscan),
        };
        self.range = range;
        self.origin = ScrollOffset {
            top: self.axis_origin(Axis::Row),
            left: self.axis_origin(Axis::Column),
        };
        gtrace!(
            first_row = range.rows.first,
            last_row = range.rows.last,
            first_column = range.columns.first,
            last_column = range.columns.last,
            "visible range resolved"
        );
    }

    fn apply_metrics(&mut self, rows: AxisMetrics, columns: AxisMetrics) {
        self.dims = Dimensions::from_metrics(&rows, &columns);
        self.row_prefix = rows.prefix;
        self.column_prefix = columns.prefix;
        gdebug!(
            total_height = self.dims.total_height,
            total_width = self.dims.total_width,
            avg_row_height = self.dims.avg_row_height,
            avg_column_width = self.dims.avg_column_width,
            "dimensions recomputed"
        );
    }

    fn resolve_axis_range(&self, axis: Axis, viewport: Viewport, overscan: Overscan) -> AxisRange {
        resolve_axis(
            self.scroll.along(axis),
            viewport.along(axis),
            self.options.shape.count(axis),
            overscan.along(axis),
            self.locator(axis),
        )
    }

    fn axis_origin(&self, axis: Axis) -> f64 {
        let range = self.range.along(axis);
        if range.is_empty() {
            return 0.0;
        }
        self.locator(axis).start_of(range.first)
    }
}

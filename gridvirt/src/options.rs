use alloc::sync::Arc;

use crate::grid::GridVirtualizer;
use crate::{
    Fault, FallbackSizes, GridShape, Overscan, RangeStrategy, ScrollOffset, SizeSpec, Viewport,
};

/// A callback fired after the virtualizer recomputed its derived state.
///
/// Inside [`GridVirtualizer::batch_update`] it fires once, when the batch ends.
pub type OnChangeCallback = Arc<dyn Fn(&GridVirtualizer) + Send + Sync>;

/// A callback fired for every contained fault (unusable size, failing render callback).
pub type OnFaultCallback = Arc<dyn Fn(&Fault) + Send + Sync>;

/// Configuration for [`GridVirtualizer`].
///
/// Cheap to clone: closures are shared through `Arc`s, so adapters can tweak a few fields and
/// call `GridVirtualizer::set_options` without reallocating them. The virtualizer assumes the
/// numeric fields are already sanitized (finite, non-negative).
#[derive(Clone)]
pub struct GridOptions {
    pub shape: GridShape,
    pub viewport: Viewport,
    pub overscan: Overscan,

    /// Scroll offset applied by `GridVirtualizer::new` (clamped to the content).
    pub initial_scroll: ScrollOffset,

    /// Sizes substituted when a size spec yields an unusable value.
    pub fallback: FallbackSizes,

    pub strategy: RangeStrategy,

    pub on_change: Option<OnChangeCallback>,
    pub on_fault: Option<OnFaultCallback>,
}

impl GridOptions {
    pub fn new(
        row_count: usize,
        column_count: usize,
        row_size: impl Into<SizeSpec>,
        column_size: impl Into<SizeSpec>,
    ) -> Self {
        Self::from_shape(GridShape::new(
            row_count,
            column_count,
            row_size,
            column_size,
        ))
    }

    pub fn from_shape(shape: GridShape) -> Self {
        Self {
            shape,
            viewport: Viewport::default(),
            overscan: Overscan::default(),
            initial_scroll: ScrollOffset::ORIGIN,
            fallback: FallbackSizes::default(),
            strategy: RangeStrategy::default(),
            on_change: None,
            on_fault: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_viewport_size(self, height: f64, width: f64) -> Self {
        self.with_viewport(Viewport::new(height, width))
    }

    pub fn with_overscan(mut self, overscan: Overscan) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_scroll(mut self, initial_scroll: ScrollOffset) -> Self {
        self.initial_scroll = initial_scroll;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackSizes) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_strategy(mut self, strategy: RangeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&GridVirtualizer) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_fault(
        mut self,
        on_fault: Option<impl Fn(&Fault) + Send + Sync + 'static>,
    ) -> Self {
        self.on_fault = on_fault.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for GridOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridOptions")
            .field("shape", &self.shape)
            .field("viewport", &self.viewport)
            .field("overscan", &self.overscan)
            .field("initial_scroll", &self.initial_scroll)
            .field("fallback", &self.fallback)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

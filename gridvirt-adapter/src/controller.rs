use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use gridvirt::{
    Align, CallbackError, CellRenderer, GridFrame, GridOptions, GridVirtualizer, ScrollOffset,
    VirtualCell,
};

use crate::{ConfigWarning, RawGridConfig};

/// A shared, fallible cell renderer.
pub type RenderFn<R> = Arc<dyn Fn(&VirtualCell) -> Result<R, CallbackError> + Send + Sync>;

/// Outcome of [`GridController::apply_config`].
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigUpdate {
    /// Invalid values that were replaced by fallbacks.
    pub warnings: Vec<ConfigWarning>,
    /// The corrected scroll offset, when the new configuration moved it.
    pub scroll: Option<ScrollOffset>,
}

/// A framework-neutral controller that wraps a `gridvirt::GridVirtualizer` and a cell renderer.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` when the scroll surface reports a new offset
/// - `on_resize` when the viewport size changes
/// - `apply_config` when the raw configuration changes
///
/// Each of these returns `Some(offset)` when the engine corrected the scroll position; write that
/// offset back to the real scroll surface so both stay in sync. `frame()` produces everything
/// the rendering layer mounts.
pub struct GridController<R> {
    v: GridVirtualizer,
    renderer: Option<RenderFn<R>>,
}

impl<R> GridController<R> {
    pub fn new(options: GridOptions) -> Self {
        Self::from_virtualizer(GridVirtualizer::new(options))
    }

    /// Builds a controller from raw configuration. Returns the sanitize warnings alongside.
    pub fn from_config(config: &RawGridConfig) -> (Self, Vec<ConfigWarning>) {
        let sanitized = config.sanitize();
        (Self::new(sanitized.options), sanitized.warnings)
    }

    pub fn from_virtualizer(v: GridVirtualizer) -> Self {
        Self { v, renderer: None }
    }

    pub fn with_renderer(
        mut self,
        render: impl Fn(&VirtualCell) -> R + Send + Sync + 'static,
    ) -> Self {
        self.renderer = Some(Arc::new(
            move |cell: &VirtualCell| -> Result<R, CallbackError> { Ok(render(cell)) },
        ));
        self
    }

    pub fn with_try_renderer<E: fmt::Display>(
        mut self,
        render: impl Fn(&VirtualCell) -> Result<R, E> + Send + Sync + 'static,
    ) -> Self {
        self.renderer = Some(Arc::new(move |cell: &VirtualCell| {
            render(cell).map_err(CallbackError::failed)
        }));
        self
    }

    /// Replaces the renderer. `None` falls back to a no-op renderer (see [`Self::frame`]).
    pub fn set_renderer(&mut self, renderer: Option<RenderFn<R>>) {
        self.renderer = renderer;
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn virtualizer(&self) -> &GridVirtualizer {
        &self.v
    }

    pub fn virtualizer_mut(&mut self) -> &mut GridVirtualizer {
        &mut self.v
    }

    pub fn into_virtualizer(self) -> GridVirtualizer {
        self.v
    }

    /// Call this when the UI reports a scroll offset change (e.g. user wheel/drag).
    ///
    /// Returns the corrected offset when it differs from the reported one.
    pub fn on_scroll(&mut self, top: f64, left: f64) -> Option<ScrollOffset> {
        let reported = ScrollOffset::new(top, left);
        let applied = self.v.set_scroll(reported);
        (applied != reported).then_some(applied)
    }

    /// Call this when the viewport is resized.
    ///
    /// Returns the corrected offset when the resize moved the scroll position.
    pub fn on_resize(&mut self, height: f64, width: f64) -> Option<ScrollOffset> {
        let before = self.v.scroll();
        self.v.set_viewport_size(height, width);
        let after = self.v.scroll();
        (after != before).then_some(after)
    }

    /// Sanitizes `config` and applies its shape, viewport and overscan in one recomputation.
    ///
    /// Hooks, fallback sizes and the range strategy of the current options are kept.
    pub fn apply_config(&mut self, config: &RawGridConfig) -> ConfigUpdate {
        let sanitized = config.sanitize();
        let next = sanitized.options;
        let before = self.v.scroll();
        adebug!(
            rows = next.shape.row_count,
            columns = next.shape.column_count,
            warnings = sanitized.warnings.len(),
            "apply_config"
        );
        self.v.batch_update(|v| {
            v.set_shape(next.shape);
            v.set_viewport(next.viewport);
            v.set_overscan(next.overscan);
        });
        let after = self.v.scroll();
        ConfigUpdate {
            warnings: sanitized.warnings,
            scroll: (after != before).then_some(after),
        }
    }

    /// Applies a scroll-to-cell immediately.
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_cell(&mut self, row: usize, column: usize, align: Align) -> ScrollOffset {
        self.v.scroll_to_cell(row, column, align)
    }

    /// Renders the current frame.
    ///
    /// Without a renderer every cell gets `R::default()`.
    pub fn frame(&self) -> GridFrame<R>
    where
        R: Default,
    {
        match &self.renderer {
            Some(render) => self.v.render_frame(&mut Shared(render)),
            None => self.v.render_frame(&mut |_: &VirtualCell| R::default()),
        }
    }
}

impl<R> Clone for GridController<R> {
    fn clone(&self) -> Self {
        Self {
            v: self.v.clone(),
            renderer: self.renderer.clone(),
        }
    }
}

impl<R> fmt::Debug for GridController<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridController")
            .field("v", &self.v)
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}

struct Shared<'a, R>(&'a RenderFn<R>);

impl<R> CellRenderer for Shared<'_, R> {
    type Output = R;

    fn render(&mut self, cell: &VirtualCell) -> Result<R, CallbackError> {
        (self.0)(cell)
    }
}

use alloc::vec::Vec;
use core::fmt;

use crate::{CallbackError, Extent, Fault, ScrollOffset, VirtualCell, VisibleRange};

/// Turns a visible cell into something the host can mount.
///
/// Implemented for every `FnMut(&VirtualCell) -> R`. Wrap fallible closures in
/// [`TryRender`]. Renderers must not depend on virtualizer state beyond the cell they get.
pub trait CellRenderer {
    type Output;

    fn render(&mut self, cell: &VirtualCell) -> Result<Self::Output, CallbackError>;
}

impl<F, R> CellRenderer for F
where
    F: FnMut(&VirtualCell) -> R,
{
    type Output = R;

    fn render(&mut self, cell: &VirtualCell) -> Result<R, CallbackError> {
        Ok(self(cell))
    }
}

/// Adapts a closure returning `Result<R, E>` into a [`CellRenderer`].
pub struct TryRender<F>(pub F);

impl<F, R, E> CellRenderer for TryRender<F>
where
    F: FnMut(&VirtualCell) -> Result<R, E>,
    E: fmt::Display,
{
    type Output = R;

    fn render(&mut self, cell: &VirtualCell) -> Result<R, CallbackError> {
        (self.0)(cell).map_err(CallbackError::failed)
    }
}

/// What ended up in a cell slot.
#[derive(Clone, Debug, PartialEq)]
pub enum CellContent<R> {
    Rendered(R),
    /// The renderer failed for this cell; hosts should draw a distinctly styled placeholder.
    Placeholder(CallbackError),
}

impl<R> CellContent<R> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    pub fn rendered(&self) -> Option<&R> {
        match self {
            Self::Rendered(r) => Some(r),
            Self::Placeholder(_) => None,
        }
    }

    pub fn into_rendered(self) -> Option<R> {
        match self {
            Self::Rendered(r) => Some(r),
            Self::Placeholder(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCell<R> {
    pub cell: VirtualCell,
    pub content: CellContent<R>,
}

/// Everything a rendering layer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GridFrame<R> {
    /// Size of the outer scroll surface.
    pub total: Extent,
    /// The (corrected) scroll offset to apply to the scroll surface.
    pub scroll: ScrollOffset,
    /// Absolute offset of the first rendered row/column; translate the cell block by this.
    pub origin: ScrollOffset,
    pub range: VisibleRange,
    /// Cells in row-major order.
    pub cells: Vec<RenderedCell<R>>,
    /// Faults contained while building this frame.
    pub faults: Vec<Fault>,
}

impl<R> GridFrame<R> {
    pub fn placeholder_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.content.is_placeholder())
            .count()
    }
}

use crate::{Align, Dimensions, ScrollOffset, Viewport};

/// The largest valid scroll offset on each axis: `max(0, total - viewport)`.
pub fn max_scroll(dims: &Dimensions, viewport: Viewport) -> ScrollOffset {
    ScrollOffset {
        top: (dims.total_height - viewport.height).max(0.0),
        left: (dims.total_width - viewport.width).max(0.0),
    }
}

/// Clamps `scroll` into `[0, max_scroll]` on both axes.
///
/// Idempotent: an in-bounds offset is returned unchanged. NaN is treated as 0.
pub fn correct_scroll(scroll: ScrollOffset, dims: &Dimensions, viewport: Viewport) -> ScrollOffset {
    let max = max_scroll(dims, viewport);
    ScrollOffset {
        top: clamp_offset(scroll.top, max.top),
        left: clamp_offset(scroll.left, max.left),
    }
}

fn clamp_offset(offset: f64, max: f64) -> f64 {
    if offset.is_nan() {
        return 0.0;
    }
    offset.clamp(0.0, max)
}

/// Target scroll offset (unclamped) that brings an item into view along one axis.
///
/// `start`/`size` describe the item in absolute coordinates, `current` is the current offset
/// and `view` the viewport extent on that axis.
pub(crate) fn align_offset(start: f64, size: f64, current: f64, view: f64, align: Align) -> f64 {
    let end = start + size;
    match align {
        Align::Start => start,
        Align::End => end - view,
        Align::Center => start + size / 2.0 - view / 2.0,
        Align::Auto => {
            if start >= current && end <= current + view {
                current
            } else if start < current {
                start
            } else {
                end - view
            }
        }
    }
}

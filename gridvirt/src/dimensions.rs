use crate::prefix::PrefixSums;
use crate::{Axis, Extent, Fault, FallbackSizes, SizeResolver, SizeSpec};

/// Grid size and per-axis sizing rules.
#[derive(Clone, Debug)]
pub struct GridShape {
    pub row_count: usize,
    pub column_count: usize,
    pub row_size: SizeSpec,
    pub column_size: SizeSpec,
}

impl GridShape {
    pub fn new(
        row_count: usize,
        column_count: usize,
        row_size: impl Into<SizeSpec>,
        column_size: impl Into<SizeSpec>,
    ) -> Self {
        Self {
            row_count,
            column_count,
            row_size: row_size.into(),
            column_size: column_size.into(),
        }
    }

    pub fn count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.row_count,
            Axis::Column => self.column_count,
        }
    }

    pub fn size(&self, axis: Axis) -> &SizeSpec {
        match axis {
            Axis::Row => &self.row_size,
            Axis::Column => &self.column_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.column_count == 0
    }

    pub(crate) fn same_as(&self, other: &Self) -> bool {
        self.row_count == other.row_count
            && self.column_count == other.column_count
            && self.row_size.same_as(&other.row_size)
            && self.column_size.same_as(&other.column_size)
    }
}

/// Total content extent and average cell size per axis.
///
/// The averages convert a scroll offset into an approximate starting index. For fixed sizes
/// they are exact; for computed sizes they are `total / count`, which is only accurate when
/// sizes vary little.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub total_height: f64,
    pub total_width: f64,
    pub avg_row_height: f64,
    pub avg_column_width: f64,
}

impl Dimensions {
    pub fn compute(shape: &GridShape, fallback: FallbackSizes) -> Self {
        Self::compute_with(shape, fallback, &mut |_| {})
    }

    pub fn compute_with(
        shape: &GridShape,
        fallback: FallbackSizes,
        on_fault: &mut dyn FnMut(Fault),
    ) -> Self {
        let rows = measure_axis(shape, fallback, Axis::Row, false, on_fault);
        let columns = measure_axis(shape, fallback, Axis::Column, false, on_fault);
        Self::from_metrics(&rows, &columns)
    }

    pub(crate) fn from_metrics(rows: &AxisMetrics, columns: &AxisMetrics) -> Self {
        Self {
            total_height: rows.total,
            total_width: columns.total,
            avg_row_height: rows.avg,
            avg_column_width: columns.avg,
        }
    }

    pub fn total(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.total_height,
            Axis::Column => self.total_width,
        }
    }

    pub fn avg(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.avg_row_height,
            Axis::Column => self.avg_column_width,
        }
    }

    pub fn extent(&self) -> Extent {
        Extent {
            height: self.total_height,
            width: self.total_width,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct AxisMetrics {
    pub(crate) total: f64,
    pub(crate) avg: f64,
    pub(crate) prefix: Option<PrefixSums>,
}

/// Measures one axis in a single pass over its sizes.
///
/// With `with_prefix`, computed specs also keep the cumulative table used by exact range
/// resolution; the total then comes from the same pass.
pub(crate) fn measure_axis(
    shape: &GridShape,
    fallback: FallbackSizes,
    axis: Axis,
    with_prefix: bool,
    on_fault: &mut dyn FnMut(Fault),
) -> AxisMetrics {
    let count = shape.count(axis);
    let resolver = SizeResolver::new(shape.size(axis), axis, fallback.along(axis));

    if let Some(size) = resolver.uniform_with(0, on_fault) {
        return AxisMetrics {
            total: count as f64 * size,
            avg: size,
            prefix: None,
        };
    }

    let (total, prefix) = if with_prefix {
        let prefix = PrefixSums::build(&resolver, count, on_fault);
        (prefix.total(), Some(prefix))
    } else {
        (resolver.cumulative_with(count, 0, on_fault), None)
    };
    let avg = if count == 0 { 0.0 } else { total / count as f64 };

    AxisMetrics { total, avg, prefix }
}

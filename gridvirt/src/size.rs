use alloc::sync::Arc;
use core::fmt;

use crate::callback;
use crate::{Axis, CallbackError, Fault, SizeFault};

/// Default substitute for a row height that could not be resolved.
pub const DEFAULT_ROW_HEIGHT: f64 = 50.0;
/// Default substitute for a column width that could not be resolved.
pub const DEFAULT_COLUMN_WIDTH: f64 = 100.0;

/// A per-index size function.
///
/// Infallible functions are wrapped by [`SizeSpec::computed`]; use [`SizeSpec::try_computed`]
/// when the function can fail.
pub type SizeFn = Arc<dyn Fn(usize) -> Result<f64, CallbackError> + Send + Sync>;

/// A per-axis sizing rule.
#[derive(Clone)]
pub enum SizeSpec {
    /// Every index has the same size.
    Fixed(f64),
    /// The size of index `i` is `f(i)`.
    Computed(SizeFn),
}

impl SizeSpec {
    pub fn fixed(size: f64) -> Self {
        Self::Fixed(size)
    }

    pub fn computed(f: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(move |i| Ok(f(i))))
    }

    pub fn try_computed<E: fmt::Display>(
        f: impl Fn(usize) -> Result<f64, E> + Send + Sync + 'static,
    ) -> Self {
        Self::Computed(Arc::new(move |i| f(i).map_err(CallbackError::failed)))
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    pub fn fixed_value(&self) -> Option<f64> {
        match self {
            Self::Fixed(v) => Some(*v),
            Self::Computed(_) => None,
        }
    }

    /// Evaluates the spec at `index` without any fallback.
    pub fn try_size(&self, index: usize) -> Result<f64, SizeFault> {
        let size = match self {
            Self::Fixed(v) => *v,
            Self::Computed(f) => callback::invoke(|| f(index))?,
        };
        if is_valid_size(size) {
            Ok(size)
        } else {
            Err(SizeFault::Invalid(size))
        }
    }

    /// Whether two specs are known to produce the same sizes.
    ///
    /// Computed specs compare by function identity.
    pub(crate) fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a.to_bits() == b.to_bits(),
            (Self::Computed(a), Self::Computed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<f64> for SizeSpec {
    fn from(size: f64) -> Self {
        Self::Fixed(size)
    }
}

impl fmt::Debug for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

pub(crate) fn is_valid_size(size: f64) -> bool {
    size.is_finite() && size >= 0.0
}

/// Sizes substituted when a [`SizeSpec`] yields an unusable value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FallbackSizes {
    pub row_height: f64,
    pub column_width: f64,
}

impl FallbackSizes {
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Row => self.row_height,
            Axis::Column => self.column_width,
        }
    }
}

impl Default for FallbackSizes {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

/// Resolves sizes along one axis with fault containment.
///
/// Faults never escape: an unusable size is logged, reported to the optional `on_fault`
/// sink, and replaced by the fallback.
#[derive(Clone, Copy)]
pub struct SizeResolver<'a> {
    spec: &'a SizeSpec,
    axis: Axis,
    fallback: f64,
}

impl<'a> SizeResolver<'a> {
    pub fn new(spec: &'a SizeSpec, axis: Axis, fallback: f64) -> Self {
        Self {
            spec,
            axis,
            fallback,
        }
    }

    pub fn rows(spec: &'a SizeSpec) -> Self {
        Self::new(spec, Axis::Row, DEFAULT_ROW_HEIGHT)
    }

    pub fn columns(spec: &'a SizeSpec) -> Self {
        Self::new(spec, Axis::Column, DEFAULT_COLUMN_WIDTH)
    }

    pub fn spec(&self) -> &'a SizeSpec {
        self.spec
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn fallback(&self) -> f64 {
        self.fallback
    }

    pub fn resolve(&self, index: usize) -> f64 {
        self.resolve_with(index, &mut |_| {})
    }

    pub fn resolve_with(&self, index: usize, on_fault: &mut dyn FnMut(Fault)) -> f64 {
        match self.spec.try_size(index) {
            Ok(size) => size,
            Err(fault) => {
                gwarn!(
                    axis = %self.axis,
                    index,
                    fault = %fault,
                    fallback = self.fallback,
                    "unusable size, substituting fallback"
                );
                on_fault(Fault::Size {
                    axis: self.axis,
                    index,
                    fault,
                });
                self.fallback
            }
        }
    }

    /// The size shared by every index, for fixed specs.
    pub(crate) fn uniform_with(
        &self,
        index: usize,
        on_fault: &mut dyn FnMut(Fault),
    ) -> Option<f64> {
        self.spec
            .is_fixed()
            .then(|| self.resolve_with(index, on_fault))
    }

    /// Sum of the sizes of `count` indexes starting at `start`.
    pub fn cumulative(&self, count: usize, start: usize) -> f64 {
        self.cumulative_with(count, start, &mut |_| {})
    }

    pub fn cumulative_with(
        &self,
        count: usize,
        start: usize,
        on_fault: &mut dyn FnMut(Fault),
    ) -> f64 {
        if count == 0 {
            return 0.0;
        }
        if let Some(size) = self.uniform_with(start, on_fault) {
            return count as f64 * size;
        }
        let mut sum = 0.0;
        for i in start..start.saturating_add(count) {
            sum += self.resolve_with(i, on_fault);
        }
        sum
    }
}

impl fmt::Debug for SizeResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeResolver")
            .field("spec", self.spec)
            .field("axis", &self.axis)
            .field("fallback", &self.fallback)
            .finish()
    }
}

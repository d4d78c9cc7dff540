use alloc::vec::Vec;
use core::fmt;

use crate::{Fault, SizeResolver};

/// Cumulative sizes along one axis: `sums[i]` is the total size of indexes `0..i`.
///
/// Built once per shape change for computed size specs when exact range resolution is
/// requested. Sizes never change between rebuilds, so a flat table with binary search is
/// enough.
#[derive(Clone)]
pub(crate) struct PrefixSums {
    sums: Vec<f64>,
}

impl PrefixSums {
    pub(crate) fn build(
        resolver: &SizeResolver<'_>,
        count: usize,
        on_fault: &mut dyn FnMut(Fault),
    ) -> Self {
        let mut sums = Vec::with_capacity(count.saturating_add(1));
        let mut total = 0.0;
        sums.push(total);
        for i in 0..count {
            total += resolver.resolve_with(i, on_fault);
            sums.push(total);
        }
        Self { sums }
    }

    pub(crate) fn len(&self) -> usize {
        self.sums.len().saturating_sub(1)
    }

    pub(crate) fn total(&self) -> f64 {
        self.sums.last().copied().unwrap_or(0.0)
    }

    pub(crate) fn start_of(&self, index: usize) -> f64 {
        let i = index.min(self.len());
        self.sums.get(i).copied().unwrap_or(0.0)
    }

    pub(crate) fn size_of(&self, index: usize) -> f64 {
        self.start_of(index.saturating_add(1)) - self.start_of(index)
    }

    /// Returns the index of the item containing `offset`, clamped to the last item.
    ///
    /// Equivalent to the number of items whose end is `<= offset`, which matches
    /// `floor(offset / size)` for uniform sizes.
    pub(crate) fn index_at(&self, offset: f64) -> usize {
        let n = self.len();
        if n == 0 {
            return 0;
        }
        let ends = self.sums.get(1..).unwrap_or(&[]);
        ends.partition_point(|&end| end <= offset).min(n - 1)
    }
}

impl fmt::Debug for PrefixSums {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixSums")
            .field("len", &self.len())
            .field("total", &self.total())
            .finish()
    }
}

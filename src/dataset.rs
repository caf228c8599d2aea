use std::cmp::Ordering;

/// The values being sorted during a session.
///
/// A dataset is owned by exactly one sort procedure at a time and its length never changes after
/// creation. Every comparison, swap and write performed through it is counted so the cost of an
/// algorithm can be observed after the fact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Dataset<T = u32> {
    values: Vec<T>,
    comparisons: u64,
    swaps: u64,
    writes: u64,
}

impl<T: Copy + Ord> Dataset<T> {
    pub(crate) fn new(values: Vec<T>) -> Self {
        Self { values, comparisons: 0, swaps: 0, writes: 0 }
    }

    pub(crate) fn values(&self) -> &[T] {
        &self.values
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> T {
        self.values[index]
    }

    /// Compare two values, counting the comparison.
    pub(crate) fn compare(&mut self, left: T, right: T) -> Ordering {
        self.comparisons += 1;
        left.cmp(&right)
    }

    /// Compare the values at two indexes, counting the comparison.
    pub(crate) fn compare_at(&mut self, left: usize, right: usize) -> Ordering {
        self.compare(self.values[left], self.values[right])
    }

    pub(crate) fn swap(&mut self, left: usize, right: usize) {
        self.swaps += 1;
        self.values.swap(left, right);
    }

    pub(crate) fn write(&mut self, index: usize, value: T) {
        self.writes += 1;
        self.values[index] = value;
    }

    /// Copy a range of values out of the dataset.
    pub(crate) fn copy_range(&self, start: usize, end: usize) -> Vec<T> {
        self.values[start..end].to_vec()
    }

    pub(crate) fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub(crate) fn swaps(&self) -> u64 {
        self.swaps
    }

    pub(crate) fn writes(&self) -> u64 {
        self.writes
    }
}

/// Generate `count` values uniformly drawn from `[0, max_value)`.
///
/// A `max_value` of 0 yields all zeroes rather than an empty range.
pub(crate) fn generate(count: usize, max_value: u32) -> Dataset<u32> {
    let upper = max_value.max(1);
    let values = (0..count).map(|_| fastrand::u32(0..upper)).collect();
    Dataset::new(values)
}

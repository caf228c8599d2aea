use super::{SortProcedure, Step, StepKind, StepOutcome};
use crate::dataset::Dataset;
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Top-down merge sort, rendered after every single write back into the dataset.
///
/// Each frame highlights the index that was just written, not the one the next write goes to.
///
/// The recursion only depends on the length of the dataset, so the order in which ranges are merged
/// is planned up front and each merge is then replayed one write at a time.
#[derive(Debug)]
pub(crate) struct MergeSort<T> {
    plan: Option<VecDeque<MergeRange>>,
    active: Option<ActiveMerge<T>>,
}

impl<T> Default for MergeSort<T> {
    fn default() -> Self {
        Self { plan: None, active: None }
    }
}

impl<T: Copy + Ord> SortProcedure<T> for MergeSort<T> {
    fn step(&mut self, data: &mut Dataset<T>) -> StepOutcome {
        let plan = self.plan.get_or_insert_with(|| plan_merges(data.len()));
        loop {
            if let Some(index) = self.active.as_mut().and_then(|merge| merge.write_next(data)) {
                return StepOutcome::Step(Step::new(index, StepKind::Write));
            }
            let Some(range) = plan.pop_front() else {
                self.active = None;
                return StepOutcome::Done;
            };
            self.active = Some(ActiveMerge::new(data, range));
        }
    }
}

/// A merge of `[start, mid]` and `[mid + 1, end]`, both inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MergeRange {
    start: usize,
    mid: usize,
    end: usize,
}

/// Lists the merges a recursive merge sort performs, in the order it performs them.
fn plan_merges(len: usize) -> VecDeque<MergeRange> {
    fn visit(start: usize, end: usize, plan: &mut VecDeque<MergeRange>) {
        if start >= end {
            return;
        }
        let mid = (start + end) / 2;
        visit(start, mid, plan);
        visit(mid + 1, end, plan);
        plan.push_back(MergeRange { start, mid, end });
    }

    let mut plan = VecDeque::new();
    if len > 1 {
        visit(0, len - 1, &mut plan);
    }
    plan
}

#[derive(Debug)]
struct ActiveMerge<T> {
    left: Vec<T>,
    right: Vec<T>,
    left_index: usize,
    right_index: usize,
    next_write: usize,
}

impl<T: Copy + Ord> ActiveMerge<T> {
    fn new(data: &Dataset<T>, range: MergeRange) -> Self {
        Self {
            left: data.copy_range(range.start, range.mid + 1),
            right: data.copy_range(range.mid + 1, range.end + 1),
            left_index: 0,
            right_index: 0,
            next_write: range.start,
        }
    }

    /// Write the next merged value, returning the index written.
    fn write_next(&mut self, data: &mut Dataset<T>) -> Option<usize> {
        let value = match (self.left.get(self.left_index), self.right.get(self.right_index)) {
            (Some(&left), Some(&right)) => {
                // ties take from the left to keep the sort stable
                if data.compare(left, right) == Ordering::Greater {
                    self.right_index += 1;
                    right
                } else {
                    self.left_index += 1;
                    left
                }
            }
            (Some(&left), None) => {
                self.left_index += 1;
                left
            }
            (None, Some(&right)) => {
                self.right_index += 1;
                right
            }
            (None, None) => return None,
        };
        let index = self.next_write;
        data.write(index, value);
        self.next_write += 1;
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::run_to_end;

    #[derive(Clone, Copy, Debug)]
    struct Tagged {
        value: u32,
        tag: char,
    }

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.value == other.value
        }
    }

    impl Eq for Tagged {}

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> Ordering {
            self.value.cmp(&other.value)
        }
    }

    fn tagged(value: u32, tag: char) -> Tagged {
        Tagged { value, tag }
    }

    #[test]
    fn stable() {
        let input = vec![tagged(4, 'a'), tagged(2, 'l'), tagged(2, 'r'), tagged(8, 'b')];
        let mut data = Dataset::new(input);
        run_to_end(&mut MergeSort::default(), &mut data);
        let output: Vec<_> = data.values().iter().map(|item| (item.value, item.tag)).collect();
        assert_eq!(output, &[(2, 'l'), (2, 'r'), (4, 'a'), (8, 'b')]);
    }

    #[test]
    fn plan_is_post_order() {
        let plan: Vec<_> = plan_merges(4).into_iter().map(|range| (range.start, range.mid, range.end)).collect();
        assert_eq!(plan, &[(0, 0, 1), (2, 2, 3), (0, 1, 3)]);
        assert!(plan_merges(1).is_empty());
        assert!(plan_merges(0).is_empty());
    }

    #[test]
    fn one_step_per_write() {
        let mut data = Dataset::new(vec![5, 3, 8, 1]);
        let steps = run_to_end(&mut MergeSort::default(), &mut data);
        assert_eq!(data.values(), &[1, 3, 5, 8]);
        let highlights: Vec<_> = steps.iter().filter_map(|step| step.highlight).collect();
        assert_eq!(highlights, &[0, 1, 2, 3, 0, 1, 2, 3]);
        assert_eq!(data.writes(), steps.len() as u64);
    }

    #[test]
    fn writes_are_n_log_n() {
        let input: Vec<u32> = (0..64).rev().collect();
        let mut data = Dataset::new(input);
        let steps = run_to_end(&mut MergeSort::default(), &mut data);
        assert_eq!(steps.len(), 64 * 6);
        assert_eq!(data.writes(), 64 * 6);
    }

    #[test]
    fn drains_leftovers() {
        let mut data = Dataset::new(vec![1, 2, 3, 0]);
        let mut sort = MergeSort::default();
        // [1] + [2], then [3] + [0]
        run_to_end(&mut sort, &mut data);
        assert_eq!(data.values(), &[0, 1, 2, 3]);
    }
}

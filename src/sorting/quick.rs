use super::{SortProcedure, Step, StepKind, StepOutcome};
use crate::dataset::Dataset;
use std::cmp::Ordering;

/// Quick sort using the Lomuto partition scheme with the last element of each range as the pivot.
///
/// A step is produced after every swap made while partitioning and once more when the pivot is
/// moved to its final position. Ranges left to sort are kept in an explicit stack so the left side
/// of a partition is always sorted before the right side.
#[derive(Debug)]
pub(crate) struct QuickSort<T> {
    pending: Option<Vec<(usize, usize)>>,
    partition: Option<Partition<T>>,
}

impl<T> Default for QuickSort<T> {
    fn default() -> Self {
        Self { pending: None, partition: None }
    }
}

impl<T: Copy + Ord> SortProcedure<T> for QuickSort<T> {
    fn step(&mut self, data: &mut Dataset<T>) -> StepOutcome {
        let pending = self.pending.get_or_insert_with(|| match data.len() {
            0 => Vec::new(),
            len => vec![(0, len - 1)],
        });
        loop {
            match self.partition.as_mut().map(|partition| partition.advance(data)) {
                Some(PartitionProgress::Swapped(index)) => {
                    return StepOutcome::Step(Step::new(index, StepKind::Swap));
                }
                Some(PartitionProgress::Placed { index, left, right }) => {
                    self.partition = None;
                    pending.push((index + 1, right));
                    if let Some(end) = index.checked_sub(1) {
                        pending.push((left, end));
                    }
                    return StepOutcome::Step(Step::new(index, StepKind::PivotPlaced { index }));
                }
                None => (),
            };
            match pending.pop() {
                Some((left, right)) if left < right => {
                    self.partition = Some(Partition::new(data, left, right));
                }
                Some(_) => continue,
                None => return StepOutcome::Done,
            }
        }
    }
}

#[derive(Debug)]
struct Partition<T> {
    left: usize,
    right: usize,
    pivot: T,
    boundary: usize,
    scan: usize,
}

enum PartitionProgress {
    Swapped(usize),
    Placed { index: usize, left: usize, right: usize },
}

impl<T: Copy + Ord> Partition<T> {
    fn new(data: &Dataset<T>, left: usize, right: usize) -> Self {
        Self { left, right, pivot: data.get(right), boundary: left, scan: left }
    }

    fn advance(&mut self, data: &mut Dataset<T>) -> PartitionProgress {
        while self.scan < self.right {
            let scan = self.scan;
            self.scan += 1;
            if data.compare(data.get(scan), self.pivot) == Ordering::Less {
                data.swap(self.boundary, scan);
                self.boundary += 1;
                return PartitionProgress::Swapped(scan);
            }
        }
        data.swap(self.boundary, self.right);
        PartitionProgress::Placed { index: self.boundary, left: self.left, right: self.right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::run_to_end;

    #[test]
    fn first_partition() {
        let mut data = Dataset::new(vec![3, 6, 1, 8, 2]);
        let mut sort = QuickSort::default();

        assert_eq!(sort.step(&mut data), StepOutcome::Step(Step::new(2, StepKind::Swap)));
        assert_eq!(data.values(), &[1, 6, 3, 8, 2]);

        let placed = Step::new(1, StepKind::PivotPlaced { index: 1 });
        assert_eq!(sort.step(&mut data), StepOutcome::Step(placed));
        assert_eq!(&data.values()[..2], &[1, 2]);
        let mut rest = data.values()[2..].to_vec();
        rest.sort();
        assert_eq!(rest, &[3, 6, 8]);

        // left range is popped first
        assert_eq!(sort.pending.as_deref(), Some(&[(2, 4), (0, 0)][..]));
    }

    #[test]
    fn one_pivot_per_partition() {
        let mut data = Dataset::new(vec![3, 6, 1, 8, 2]);
        let steps = run_to_end(&mut QuickSort::default(), &mut data);
        assert_eq!(data.values(), &[1, 2, 3, 6, 8]);
        let pivots: Vec<_> = steps
            .iter()
            .filter_map(|step| match step.kind {
                StepKind::PivotPlaced { index } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(pivots, &[1, 3]);
        let swaps = steps.iter().filter(|step| step.kind == StepKind::Swap).count();
        assert_eq!(swaps as u64 + pivots.len() as u64, data.swaps());
    }

    #[test]
    fn pivot_lands_in_sorted_position() {
        let input = vec![9, 4, 7, 1, 5, 3, 8, 5];
        let mut data = Dataset::new(input.clone());
        let mut sorted = input;
        sorted.sort();
        let mut sort = QuickSort::default();
        while let StepOutcome::Step(step) = sort.step(&mut data) {
            if let StepKind::PivotPlaced { index } = step.kind {
                assert_eq!(data.get(index), sorted[index]);
            }
        }
    }

    #[test]
    fn self_swaps_are_rendered() {
        let mut data = Dataset::new(vec![1, 2, 3]);
        let steps = run_to_end(&mut QuickSort::default(), &mut data);
        let highlights: Vec<_> = steps.iter().filter_map(|step| step.highlight).collect();
        // [0, 2]: 1 and 2 swap with themselves, pivot 3 stays at 2; then [0, 1]: 1 swaps, pivot 2 at 1
        assert_eq!(highlights, &[0, 1, 2, 0, 1]);
    }
}

use super::{SortProcedure, Step, StepKind, StepOutcome};
use crate::dataset::Dataset;
use std::cmp::Ordering;

/// Selection sort, rendered once per outer iteration whether or not a swap happened.
#[derive(Debug, Default)]
pub(crate) struct SelectionSort {
    position: usize,
}

impl<T: Copy + Ord> SortProcedure<T> for SelectionSort {
    fn step(&mut self, data: &mut Dataset<T>) -> StepOutcome {
        let len = data.len();
        if self.position + 1 >= len {
            return StepOutcome::Done;
        }
        let position = self.position;
        let mut min = position;
        for index in position + 1..len {
            if data.compare_at(index, min) == Ordering::Less {
                min = index;
            }
        }
        if min != position {
            data.swap(position, min);
        }
        self.position += 1;
        StepOutcome::Step(Step::new(position, StepKind::Select))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkthrough() {
        let mut data = Dataset::new(vec![5, 3, 8, 1]);
        let mut sort = SelectionSort::default();

        assert_eq!(sort.step(&mut data), StepOutcome::Step(Step::new(0, StepKind::Select)));
        assert_eq!(data.values(), &[1, 3, 8, 5]);
        assert_eq!(data.swaps(), 1);

        assert_eq!(sort.step(&mut data), StepOutcome::Step(Step::new(1, StepKind::Select)));
        assert_eq!(data.values(), &[1, 3, 8, 5]);
        assert_eq!(data.swaps(), 1);

        assert_eq!(sort.step(&mut data), StepOutcome::Step(Step::new(2, StepKind::Select)));
        assert_eq!(data.values(), &[1, 3, 5, 8]);
        assert_eq!(data.swaps(), 2);

        assert_eq!(sort.step(&mut data), StepOutcome::Done);
    }

    #[test]
    fn equal_minimum_is_not_swapped() {
        let mut data = Dataset::new(vec![2, 2, 1]);
        let mut sort = SelectionSort::default();
        sort.step(&mut data);
        assert_eq!(data.values(), &[1, 2, 2]);
        sort.step(&mut data);
        assert_eq!(data.swaps(), 1);
    }
}

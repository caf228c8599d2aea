use super::{SortProcedure, Step, StepKind, StepOutcome};
use crate::dataset::Dataset;
use std::cmp::Ordering;

/// Bubble sort, rendered once per completed pass.
///
/// Each step runs a full pass of adjacent comparisons and highlights the index that just became
/// part of the sorted suffix.
#[derive(Debug, Default)]
pub(crate) struct BubbleSort {
    pass: usize,
}

impl<T: Copy + Ord> SortProcedure<T> for BubbleSort {
    fn step(&mut self, data: &mut Dataset<T>) -> StepOutcome {
        let len = data.len();
        if self.pass + 1 >= len {
            return StepOutcome::Done;
        }
        let boundary = len - self.pass - 1;
        for index in 0..boundary {
            if data.compare_at(index, index + 1) == Ordering::Greater {
                data.swap(index, index + 1);
            }
        }
        self.pass += 1;
        StepOutcome::Step(Step::new(boundary, StepKind::Pass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::run_to_end;

    #[test]
    fn one_step_per_pass() {
        let mut data = Dataset::new(vec![5, 3, 8, 1]);
        let steps = run_to_end(&mut BubbleSort::default(), &mut data);
        assert_eq!(data.values(), &[1, 3, 5, 8]);
        let highlights: Vec<_> = steps.iter().map(|step| step.highlight).collect();
        assert_eq!(highlights, &[Some(3), Some(2), Some(1)]);
        assert!(steps.iter().all(|step| step.kind == StepKind::Pass));
    }

    #[test]
    fn first_pass_bubbles_maximum() {
        let mut data = Dataset::new(vec![5, 3, 8, 1]);
        let mut sort = BubbleSort::default();
        sort.step(&mut data);
        assert_eq!(data.values(), &[3, 5, 1, 8]);
    }

    #[test]
    fn sorted_input_still_paces() {
        let mut data = Dataset::new(vec![1, 2, 3]);
        let steps = run_to_end(&mut BubbleSort::default(), &mut data);
        assert_eq!(steps.len(), 2);
        assert_eq!(data.swaps(), 0);
    }

    #[test]
    fn short_inputs() {
        let mut data = Dataset::<u32>::new(vec![]);
        assert_eq!(BubbleSort::default().step(&mut data), StepOutcome::Done);
        let mut data = Dataset::new(vec![4]);
        assert_eq!(BubbleSort::default().step(&mut data), StepOutcome::Done);
    }
}

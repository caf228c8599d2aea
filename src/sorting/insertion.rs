use super::{SortProcedure, Step, StepKind, StepOutcome};
use crate::dataset::Dataset;
use std::cmp::Ordering;

/// Insertion sort, rendered once per inserted key after its shift completes.
#[derive(Debug)]
pub(crate) struct InsertionSort {
    position: usize,
}

impl Default for InsertionSort {
    fn default() -> Self {
        Self { position: 1 }
    }
}

impl<T: Copy + Ord> SortProcedure<T> for InsertionSort {
    fn step(&mut self, data: &mut Dataset<T>) -> StepOutcome {
        let position = self.position;
        if position >= data.len() {
            return StepOutcome::Done;
        }
        let key = data.get(position);
        let mut slot = position;
        while slot > 0 && data.compare(data.get(slot - 1), key) == Ordering::Greater {
            data.write(slot, data.get(slot - 1));
            slot -= 1;
        }
        data.write(slot, key);
        self.position += 1;
        StepOutcome::Step(Step::new(position, StepKind::Insert))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::run_to_end;

    #[test]
    fn highlights_each_position() {
        let mut data = Dataset::new(vec![5, 3, 8, 1]);
        let steps = run_to_end(&mut InsertionSort::default(), &mut data);
        assert_eq!(data.values(), &[1, 3, 5, 8]);
        let highlights: Vec<_> = steps.iter().filter_map(|step| step.highlight).collect();
        assert_eq!(highlights, &[1, 2, 3]);
    }

    #[test]
    fn shifts_key_left() {
        let mut data = Dataset::new(vec![2, 4, 6, 1]);
        let mut sort = InsertionSort::default();
        sort.step(&mut data);
        sort.step(&mut data);
        assert_eq!(data.values(), &[2, 4, 6, 1]);
        sort.step(&mut data);
        assert_eq!(data.values(), &[1, 2, 4, 6]);
    }

    #[test]
    fn sorted_input_compares_linearly() {
        let mut data = Dataset::new((0..20).collect());
        run_to_end(&mut InsertionSort::default(), &mut data);
        assert_eq!(data.comparisons(), 19);
    }
}

mod bubble;
mod insertion;
mod merge;
mod quick;
mod selection;

pub(crate) use bubble::BubbleSort;
pub(crate) use insertion::InsertionSort;
pub(crate) use merge::MergeSort;
pub(crate) use quick::QuickSort;
pub(crate) use selection::SelectionSort;

use crate::dataset::Dataset;
use serde::Deserialize;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// The sorting algorithms that can be visualized.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    strum::Display,
    clap::ValueEnum,
)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Algorithm {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

impl Algorithm {
    /// The identifier used to select this algorithm.
    pub(crate) fn id(&self) -> &'static str {
        self.into()
    }

    /// A human readable name.
    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
        }
    }

    pub(crate) fn description(&self) -> &'static str {
        match self {
            Self::Bubble => {
                "Bubble Sort repeatedly swaps adjacent elements if they are in the wrong order. Often used for \
                 teaching sorting basics and simple educational purposes. Suitable for small datasets due to its \
                 simplicity but inefficient for large data. Source: GeeksforGeeks, Wikipedia."
            }
            Self::Selection => {
                "Selection Sort selects the smallest element repeatedly and places it at the beginning. Good for \
                 small datasets and simple implementations where memory writes are costly. Commonly used in \
                 embedded systems. Source: Wikipedia."
            }
            Self::Insertion => {
                "Insertion Sort builds the array one item at a time by inserting elements into their correct \
                 position. Common in online algorithms and small or nearly sorted datasets. Used in practice for \
                 small arrays within hybrid sorting algorithms. Source: GeeksforGeeks, Wikipedia."
            }
            Self::Merge => {
                "Merge Sort divides and merges arrays efficiently with guaranteed O(n log n) performance. Widely \
                 used in databases, external sorting, and scenarios requiring stable sort. Suitable for large \
                 datasets. Source: Wikipedia, GeeksforGeeks."
            }
            Self::Quick => {
                "Quick Sort partitions with a pivot and recursively sorts partitions. Widely used in practice (e.g., \
                 C's stdlib qsort), known for average-case efficiency. Common in system libraries and \
                 general-purpose sorting. Source: GeeksforGeeks, Wikipedia."
            }
        }
    }

    /// Build a fresh procedure that sorts using this algorithm.
    pub(crate) fn procedure<T: Copy + Ord + 'static>(&self) -> Box<dyn SortProcedure<T>> {
        match self {
            Self::Bubble => Box::new(BubbleSort::default()),
            Self::Selection => Box::new(SelectionSort::default()),
            Self::Insertion => Box::new(InsertionSort::default()),
            Self::Merge => Box::new(MergeSort::default()),
            Self::Quick => Box::new(QuickSort::default()),
        }
    }
}

/// What a single visualized step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepKind {
    /// A full bubble sort pass completed.
    Pass,

    /// A selection sort outer iteration completed.
    Select,

    /// An insertion sort outer iteration completed.
    Insert,

    /// A merge wrote one value back into the dataset.
    Write,

    /// A partition swapped a value below the pivot into place.
    Swap,

    /// A partition moved its pivot to its final position.
    PivotPlaced { index: usize },
}

/// An observable point in the execution of a procedure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Step {
    /// The index to draw distinguished in the frame for this step.
    pub(crate) highlight: Option<usize>,

    pub(crate) kind: StepKind,
}

impl Step {
    pub(crate) fn new(highlight: usize, kind: StepKind) -> Self {
        Self { highlight: Some(highlight), kind }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// The dataset was mutated and should be rendered before the next step.
    Step(Step),

    /// The dataset is sorted.
    Done,
}

/// A sorting algorithm that can be advanced one visualized step at a time.
///
/// Each call to [SortProcedure::step] performs every mutation up to the next point that should be
/// rendered. Once [StepOutcome::Done] is returned every later call returns it as well.
pub(crate) trait SortProcedure<T> {
    fn step(&mut self, data: &mut Dataset<T>) -> StepOutcome;
}

/// Run a procedure to completion, collecting every step it produced.
#[cfg(test)]
pub(crate) fn run_to_end<T, P>(procedure: &mut P, data: &mut Dataset<T>) -> Vec<Step>
where
    P: SortProcedure<T> + ?Sized,
{
    let mut steps = Vec::new();
    while let StepOutcome::Step(step) = procedure.step(data) {
        steps.push(step);
    }
    steps
}

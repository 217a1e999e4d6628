mod analyzer;
mod ordering;
mod search;
mod statistics;

pub use analyzer::Analyzer;
pub use ordering::{sort, SortCriterion};
pub use search::find;
pub use statistics::{
    average_age, average_height, density, extreme, extreme_by, Averages, Measure, StandSummary,
};

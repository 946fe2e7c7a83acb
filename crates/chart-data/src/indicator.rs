// File: crates/chart-data/src/indicator.rs
// Summary: Indicator trait deriving companion series (moving average, running total) from a series.

use crate::series::NamedSeries;
use crate::smooth::{cumulative_sum, moving_average_sparse};
use crate::types::{CUMULATIVE_SERIES, DEFAULT_WINDOW};

/// Indicator transforms an input series into a derived series on the same axis.
pub trait Indicator {
    fn id(&self) -> &'static str;
    fn compute(&self, input: &NamedSeries) -> NamedSeries;
}

/// Trailing simple moving average over `window` periods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovingAverage {
    pub window: usize,
}

impl Default for MovingAverage {
    fn default() -> Self { Self { window: DEFAULT_WINDOW } }
}

impl MovingAverage {
    pub fn new(window: usize) -> Self { Self { window } }

    /// Series name used in chart rows, e.g. `"30-period average"`.
    pub fn series_name(&self) -> String {
        format!("{}-period average", self.window)
    }
}

impl Indicator for MovingAverage {
    fn id(&self) -> &'static str { "moving_average" }

    fn compute(&self, input: &NamedSeries) -> NamedSeries {
        let smoothed = moving_average_sparse(&input.resolved(), self.window);
        NamedSeries::optional(self.series_name(), smoothed)
    }
}

/// Running total, published under the fixed `"Cumulative"` name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunningTotal;

impl Indicator for RunningTotal {
    fn id(&self) -> &'static str { "running_total" }

    fn compute(&self, input: &NamedSeries) -> NamedSeries {
        let totals = cumulative_sum(&input.resolved());
        NamedSeries::required(CUMULATIVE_SERIES, totals.into_iter().map(Some).collect())
    }
}

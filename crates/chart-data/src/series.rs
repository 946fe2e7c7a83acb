// File: crates/chart-data/src/series.rs
// Summary: Named numeric series aligned to a shared time axis.
// Notes:
// - Gaps are kept as `None`; how a gap reaches the chart row depends on the
//   series' `MissingValue` policy (required series read as zero).

/// How the assembler treats a missing value at some index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingValue {
    /// Gap renders as `0` (value, cumulative).
    Zero,
    /// Gap stays absent from the row (min/max/avg, smoothed series).
    Absent,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
    pub missing: MissingValue,
}

impl NamedSeries {
    /// Series whose gaps read as zero.
    pub fn required(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self { name: name.into(), values, missing: MissingValue::Zero }
    }

    /// Series whose gaps stay absent.
    pub fn optional(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self { name: name.into(), values, missing: MissingValue::Absent }
    }

    /// Required series from dense values.
    pub fn from_values(name: impl Into<String>, values: &[f64]) -> Self {
        Self::required(name, values.iter().copied().map(Some).collect())
    }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Value at `index` after applying the missing-value policy. Indices past
    /// the end and non-finite entries count as gaps.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        match self.values.get(index).copied().flatten().filter(|v| v.is_finite()) {
            Some(v) => Some(v),
            None => match self.missing {
                MissingValue::Zero => Some(0.0),
                MissingValue::Absent => None,
            },
        }
    }

    /// Values with the missing-value policy applied, one per input index.
    pub fn resolved(&self) -> Vec<Option<f64>> {
        (0..self.len()).map(|i| self.value_at(i)).collect()
    }
}

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::types::{Category, ChartData};

/// Recoverable input problem found while normalizing chart data.
///
/// Diagnostics never abort an update; the affected values are replaced by
/// zero (or dropped) and layout continues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataDiagnostic {
    /// `values.len()` differs from the category count.
    ShapeMismatch {
        series_key: String,
        expected: usize,
        actual: usize,
    },
    /// A negative value was clamped to zero.
    NegativeValueClamped {
        series_key: String,
        category_index: usize,
        value: f64,
    },
    /// A NaN or infinite value was replaced by zero.
    NonFiniteValue {
        series_key: String,
        category_index: usize,
    },
    /// A series reused an earlier key and was skipped.
    DuplicateSeriesKey { series_key: String },
    /// The stacked total of a category exceeds `f64::MAX` and is saturated.
    StackTotalSaturated { category_index: usize },
}

/// Series with exactly one finite, non-negative value per category.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    pub key: String,
    pub values: Vec<f64>,
}

/// Chart data after shape repair and value sanitizing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedData {
    pub categories: Vec<Category>,
    pub series: Vec<NormalizedSeries>,
}

impl NormalizedData {
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn series_index(&self, series_key: &str) -> Option<usize> {
        self.series.iter().position(|series| series.key == series_key)
    }

    /// Sanitized value for one bar, `None` when the identity is unknown.
    #[must_use]
    pub fn value(&self, category_index: usize, series_key: &str) -> Option<f64> {
        let series = self.series.iter().find(|series| series.key == series_key)?;
        series.values.get(category_index).copied()
    }
}

/// Repairs `data` into a rectangular, non-negative grid.
///
/// Missing positions and `None` become zero, extra positions are dropped,
/// negative values are clamped to zero, non-finite values become zero and
/// duplicate series keys keep their first declaration.
#[must_use]
pub fn normalize(data: &ChartData) -> (NormalizedData, Vec<DataDiagnostic>) {
    let category_count = data.categories().len();
    let mut diagnostics = Vec::new();
    let mut seen = IndexSet::with_capacity(data.series().len());
    let mut series = Vec::with_capacity(data.series().len());

    for input in data.series() {
        if !seen.insert(input.key.as_str()) {
            warn!(series_key = %input.key, "duplicate series key skipped");
            diagnostics.push(DataDiagnostic::DuplicateSeriesKey {
                series_key: input.key.clone(),
            });
            continue;
        }

        if input.values.len() != category_count {
            warn!(
                series_key = %input.key,
                expected = category_count,
                actual = input.values.len(),
                "series length does not match categories; missing values treated as zero"
            );
            diagnostics.push(DataDiagnostic::ShapeMismatch {
                series_key: input.key.clone(),
                expected: category_count,
                actual: input.values.len(),
            });
        }

        let mut values = Vec::with_capacity(category_count);
        for category_index in 0..category_count {
            let raw = input.values.get(category_index).copied().flatten();
            let value = match raw {
                None => 0.0,
                Some(value) if !value.is_finite() => {
                    warn!(
                        series_key = %input.key,
                        category_index,
                        "non-finite value treated as zero"
                    );
                    diagnostics.push(DataDiagnostic::NonFiniteValue {
                        series_key: input.key.clone(),
                        category_index,
                    });
                    0.0
                }
                Some(value) if value < 0.0 => {
                    warn!(
                        series_key = %input.key,
                        category_index,
                        value,
                        "negative value clamped to zero"
                    );
                    diagnostics.push(DataDiagnostic::NegativeValueClamped {
                        series_key: input.key.clone(),
                        category_index,
                        value,
                    });
                    0.0
                }
                Some(value) => value,
            };
            values.push(value);
        }

        series.push(NormalizedSeries {
            key: input.key.clone(),
            values,
        });
    }

    for category_index in 0..category_count {
        let total: f64 = series.iter().map(|series| series.values[category_index]).sum();
        if total.is_infinite() {
            warn!(category_index, "stacked total overflows; saturating at f64::MAX");
            diagnostics.push(DataDiagnostic::StackTotalSaturated { category_index });
        }
    }

    let normalized = NormalizedData {
        categories: data.categories().to_vec(),
        series,
    };
    (normalized, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Series;

    #[test]
    fn short_series_is_padded_with_zero() {
        let data = ChartData::new(["Jan", "Feb", "Mar"], vec![Series::new("A", [1.0])]);
        let (normalized, diagnostics) = normalize(&data);
        assert_eq!(normalized.series[0].values, vec![1.0, 0.0, 0.0]);
        assert_eq!(
            diagnostics,
            vec![DataDiagnostic::ShapeMismatch {
                series_key: "A".to_owned(),
                expected: 3,
                actual: 1,
            }]
        );
    }

    #[test]
    fn long_series_is_truncated() {
        let data = ChartData::new(["Jan"], vec![Series::new("A", [1.0, 2.0, 3.0])]);
        let (normalized, diagnostics) = normalize(&data);
        assert_eq!(normalized.series[0].values, vec![1.0]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn gaps_become_zero_without_diagnostic() {
        let data = ChartData::new(
            ["Jan", "Feb"],
            vec![Series::with_gaps("A", vec![None, Some(4.0)])],
        );
        let (normalized, diagnostics) = normalize(&data);
        assert_eq!(normalized.series[0].values, vec![0.0, 4.0]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn duplicate_keys_keep_first_declaration() {
        let data = ChartData::new(
            ["Jan"],
            vec![Series::new("A", [1.0]), Series::new("A", [9.0])],
        );
        let (normalized, diagnostics) = normalize(&data);
        assert_eq!(normalized.series.len(), 1);
        assert_eq!(normalized.value(0, "A"), Some(1.0));
        assert!(matches!(
            diagnostics.as_slice(),
            [DataDiagnostic::DuplicateSeriesKey { .. }]
        ));
    }

    #[test]
    fn nan_and_negative_values_are_zeroed() {
        let data = ChartData::new(
            ["Jan", "Feb"],
            vec![Series::new("A", [f64::NAN, -5.0])],
        );
        let (normalized, diagnostics) = normalize(&data);
        assert_eq!(normalized.series[0].values, vec![0.0, 0.0]);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn overflowing_stack_total_is_reported() {
        let data = ChartData::new(
            ["Jan", "Feb"],
            vec![Series::new("A", [f64::MAX, 1.0]), Series::new("B", [f64::MAX, 1.0])],
        );
        let (_, diagnostics) = normalize(&data);
        assert_eq!(
            diagnostics,
            vec![DataDiagnostic::StackTotalSaturated { category_index: 0 }]
        );
    }
}

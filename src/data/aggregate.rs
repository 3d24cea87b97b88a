use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Scalar aggregates with missing-value skip
// ---------------------------------------------------------------------------

/// Sum of present values; 0 when none are present.
pub fn sum(values: &[Option<f64>]) -> f64 {
    values.iter().flatten().sum()
}

/// Mean of present values; `None` when none are present.
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let (total, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(t, n), v| (t + v, n + 1));
    (count > 0).then(|| total / count as f64)
}

// ---------------------------------------------------------------------------
// Grouped aggregates
// ---------------------------------------------------------------------------

/// One point of a per-year trend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub year: i64,
    /// `None` when every value in the year's group is missing.
    pub value: Option<f64>,
}

/// A labelled total (term or area).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub label: String,
    pub value: f64,
}

impl CategoryTotal {
    /// Fraction of `total` this entry represents, 0 when `total` is 0.
    pub fn share_of(&self, total: f64) -> f64 {
        if total == 0.0 {
            0.0
        } else {
            self.value / total
        }
    }
}

/// Mean of `values` per year, ascending by year. Rows with no year are skipped.
pub fn mean_by_year(years: &[Option<i64>], values: &[Option<f64>]) -> Vec<TrendPoint> {
    let mut groups: BTreeMap<i64, Vec<Option<f64>>> = BTreeMap::new();
    for (year, value) in years.iter().zip(values) {
        if let Some(year) = year {
            groups.entry(*year).or_default().push(*value);
        }
    }
    groups
        .into_iter()
        .map(|(year, vals)| TrendPoint {
            year,
            value: mean(&vals),
        })
        .collect()
}

/// Sum of `values` per term, largest first; ties keep ascending term order.
pub fn sum_by_term(terms: &[String], values: &[Option<f64>]) -> Vec<CategoryTotal> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for (term, value) in terms.iter().zip(values) {
        *groups.entry(term.as_str()).or_default() += value.unwrap_or(0.0);
    }
    let mut totals: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(label, value)| CategoryTotal {
            label: label.to_string(),
            value,
        })
        .collect();
    totals.sort_by(|a, b| b.value.total_cmp(&a.value));
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_skips_missing() {
        assert_eq!(mean(&[Some(80.0), None, Some(90.0)]), Some(85.0));
        assert_eq!(mean(&[None, None]), None);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_sum_skips_missing() {
        assert_eq!(sum(&[Some(1.5), None, Some(2.5)]), 4.0);
        assert_eq!(sum(&[None]), 0.0);
    }

    #[test]
    fn test_mean_by_year_orders_ascending() {
        let years = [Some(2021), Some(2019), None, Some(2021), Some(2020)];
        let values = [Some(90.0), Some(70.0), Some(10.0), Some(80.0), None];
        let trend = mean_by_year(&years, &values);
        assert_eq!(
            trend,
            vec![
                TrendPoint {
                    year: 2019,
                    value: Some(70.0),
                },
                TrendPoint {
                    year: 2020,
                    value: None,
                },
                TrendPoint {
                    year: 2021,
                    value: Some(85.0),
                },
            ]
        );
    }

    #[test]
    fn test_sum_by_term_orders_descending() {
        let terms: Vec<String> = ["Fall", "Spring", "Fall", "Summer", "Spring"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let values = [Some(10.0), Some(30.0), Some(15.0), None, Some(5.0)];
        let totals = sum_by_term(&terms, &values);
        let labels: Vec<&str> = totals.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Spring", "Fall", "Summer"]);
        assert_eq!(totals[0].value, 35.0);
        assert_eq!(totals[1].value, 25.0);
        assert_eq!(totals[2].value, 0.0);
    }

    #[test]
    fn test_ties_keep_term_order() {
        let terms = vec!["Spring".to_string(), "Fall".to_string()];
        let totals = sum_by_term(&terms, &[Some(5.0), Some(5.0)]);
        assert_eq!(totals[0].label, "Fall");
        assert_eq!(totals[1].label, "Spring");
    }

    #[test]
    fn test_share_of() {
        let t = CategoryTotal {
            label: "Fall".into(),
            value: 25.0,
        };
        assert_eq!(t.share_of(100.0), 0.25);
        assert_eq!(t.share_of(0.0), 0.0);
    }
}

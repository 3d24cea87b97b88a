use crate::data::aggregate::{self, CategoryTotal, TrendPoint};
use crate::data::filter::{self, FilterSelection};
use crate::data::model::{
    title_case, StudentTable, AREA_COLUMNS, ENROLLED, RETENTION_RATE, STUDENT_SATISFACTION,
};

// ---------------------------------------------------------------------------
// View model – everything the dashboard draws, computed from a filter state
// ---------------------------------------------------------------------------

/// Headline numbers for the filtered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    /// Sum of `enrolled`, 0 when the column is absent.
    pub total_enrolled: f64,
    /// `None` when the column is absent or every value is missing.
    pub avg_retention: Option<f64>,
    pub avg_satisfaction: Option<f64>,
}

/// Term enrollment totals, shared by the bar and the pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TermEnrollment {
    pub totals: Vec<CategoryTotal>,
}

impl TermEnrollment {
    pub fn grand_total(&self) -> f64 {
        self.totals.iter().map(|t| t.value).sum()
    }

    /// `(label, share)` pairs for the pie chart, in bar order.
    pub fn shares(&self) -> Vec<(String, f64)> {
        let total = self.grand_total();
        self.totals
            .iter()
            .map(|t| (t.label.clone(), t.share_of(total)))
            .collect()
    }
}

/// Every chart and metric for one filter state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub summary: SummaryMetrics,
    pub retention_trend: Option<Vec<TrendPoint>>,
    pub satisfaction_trend: Option<Vec<TrendPoint>>,
    pub term_enrollment: Option<TermEnrollment>,
    pub area_enrollment: Option<Vec<CategoryTotal>>,
    /// The filtered rows, for the data preview.
    pub filtered: StudentTable,
}

impl DashboardView {
    /// How many of the five charts are drawn.
    pub fn chart_count(&self) -> usize {
        let term_charts = if self.term_enrollment.is_some() { 2 } else { 0 };
        usize::from(self.retention_trend.is_some())
            + usize::from(self.satisfaction_trend.is_some())
            + term_charts
            + usize::from(self.area_enrollment.is_some())
    }
}

/// Result of one dashboard run.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome {
    Ready(Box<DashboardView>),
    /// No rows match the selection; nothing is computed.
    Empty,
}

/// Run the whole pipeline for one filter state: mask, empty check,
/// metrics, then each chart whose columns are present.
pub fn build_view(table: &StudentTable, selection: &FilterSelection) -> ViewOutcome {
    let filtered = filter::apply(table, selection);
    if filtered.is_empty() {
        log::debug!("selection matches no rows");
        return ViewOutcome::Empty;
    }

    let summary = SummaryMetrics {
        total_enrolled: filtered
            .numeric(ENROLLED)
            .map(aggregate::sum)
            .unwrap_or(0.0),
        avg_retention: filtered.numeric(RETENTION_RATE).and_then(aggregate::mean),
        avg_satisfaction: filtered
            .numeric(STUDENT_SATISFACTION)
            .and_then(aggregate::mean),
    };

    let retention_trend = year_trend(&filtered, RETENTION_RATE);
    let satisfaction_trend = year_trend(&filtered, STUDENT_SATISFACTION);

    let term_enrollment = match (filtered.terms(), filtered.numeric(ENROLLED)) {
        (Some(terms), Some(enrolled)) => Some(TermEnrollment {
            totals: aggregate::sum_by_term(terms, enrolled),
        }),
        _ => None,
    };

    let areas: Vec<CategoryTotal> = AREA_COLUMNS
        .iter()
        .filter_map(|&name| {
            filtered.numeric(name).map(|values| CategoryTotal {
                label: area_label(name),
                value: aggregate::sum(values),
            })
        })
        .collect();
    let area_enrollment = (!areas.is_empty()).then_some(areas);

    let view = DashboardView {
        summary,
        retention_trend,
        satisfaction_trend,
        term_enrollment,
        area_enrollment,
        filtered,
    };
    log::debug!(
        "built view: {} rows, {} charts",
        view.filtered.len(),
        view.chart_count()
    );
    ViewOutcome::Ready(Box::new(view))
}

fn year_trend(table: &StudentTable, metric: &str) -> Option<Vec<TrendPoint>> {
    let years = table.years()?;
    let values = table.numeric(metric)?;
    Some(aggregate::mean_by_year(years, values))
}

/// `engineering_enrolled` → `Engineering`.
pub fn area_label(column: &str) -> String {
    title_case(column.strip_suffix("_enrolled").unwrap_or(column))
}

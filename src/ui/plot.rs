use std::f64::consts::TAU;

use eframe::egui::{self, Align2, Color32, RichText, ScrollArea, Stroke, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};
use egui_plot::{
    Bar, BarChart, Legend, Line, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::color::CategoryColors;
use crate::data::aggregate::{CategoryTotal, TrendPoint};
use crate::data::model::StudentTable;
use crate::state::AppState;
use crate::view::{DashboardView, SummaryMetrics, TermEnrollment, ViewOutcome};

const CHART_HEIGHT: f32 = 280.0;
const LINE_COLOR: Color32 = Color32::from_rgb(52, 152, 219);
const BAR_COLOR: Color32 = Color32::from_rgb(46, 204, 113);
const AREA_COLOR: Color32 = Color32::from_rgb(155, 89, 182);

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the dashboard for the current view outcome.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading("University Admissions & Enrollment Dashboard");
    ui.separator();

    let view = match &state.outcome {
        Some(ViewOutcome::Ready(view)) => view,
        Some(ViewOutcome::Empty) => {
            ui.add_space(20.0);
            ui.label(
                RichText::new("No data available for the selected filters.")
                    .size(16.0)
                    .color(Color32::from_rgb(243, 156, 18)),
            );
            return;
        }
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                let text = if state.status_message.is_some() {
                    "Data could not be loaded (see the status bar)."
                } else {
                    "Open a CSV file to view the dashboard  (File → Open…)"
                };
                ui.heading(text);
            });
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            summary_cards(ui, &view.summary);
            ui.add_space(12.0);
            charts(ui, view);
            ui.add_space(12.0);
            data_preview(ui, &view.filtered, state.preview_rows);
        });
}

fn summary_cards(ui: &mut Ui, summary: &SummaryMetrics) {
    let percent = |v: Option<f64>| v.map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}%"));
    let cards = [
        ("Total Enrolled", format!("{:.0}", summary.total_enrolled)),
        ("Avg Retention Rate", percent(summary.avg_retention)),
        ("Avg Student Satisfaction", percent(summary.avg_satisfaction)),
    ];

    ui.columns(cards.len(), |columns| {
        for (ui, (label, value)) in columns.iter_mut().zip(cards) {
            egui::Frame::group(ui.style())
                .inner_margin(10.0)
                .show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(label).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(24.0).strong());
                });
        }
    });
}

fn charts(ui: &mut Ui, view: &DashboardView) {
    ui.columns(2, |columns| {
        if let Some(trend) = &view.retention_trend {
            chart_title(&mut columns[0], "Retention Rate Trend");
            retention_line(&mut columns[0], trend);
        }
        if let Some(trend) = &view.satisfaction_trend {
            chart_title(&mut columns[1], "Student Satisfaction by Year");
            satisfaction_bars(&mut columns[1], trend);
        }
    });

    if let Some(terms) = &view.term_enrollment {
        ui.add_space(8.0);
        let colors = CategoryColors::new(terms.totals.iter().map(|t| t.label.as_str()));
        ui.columns(2, |columns| {
            chart_title(&mut columns[0], "Enrollment by Term");
            term_bars(&mut columns[0], &terms.totals, &colors);
            chart_title(&mut columns[1], "Enrollment Share by Term");
            term_pie(&mut columns[1], terms, &colors);
        });
    }

    if let Some(areas) = &view.area_enrollment {
        ui.add_space(8.0);
        chart_title(ui, "Enrollment by Area");
        labelled_bars(ui, "area_bars", "Enrolled", areas, |_| AREA_COLOR);
    }
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).size(15.0).strong());
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn retention_line(ui: &mut Ui, trend: &[TrendPoint]) {
    let points: Vec<[f64; 2]> = trend
        .iter()
        .filter_map(|p| p.value.map(|v| [p.year as f64, v]))
        .collect();

    let bounds = percent_bounds(trend);

    Plot::new("retention_trend")
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Year")
        .y_axis_label("Retention %")
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(bounds);
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .color(LINE_COLOR)
                    .width(2.0)
                    .name("Retention rate"),
            );
            plot_ui.points(Points::new(PlotPoints::from(points)).radius(4.0).color(LINE_COLOR));
        });
}

fn satisfaction_bars(ui: &mut Ui, trend: &[TrendPoint]) {
    let present: Vec<(i64, f64)> = trend
        .iter()
        .filter_map(|p| p.value.map(|v| (p.year, v)))
        .collect();

    let bounds = percent_bounds(trend);

    Plot::new("satisfaction_trend")
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Year")
        .y_axis_label("Satisfaction %")
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(bounds);
            let bars: Vec<Bar> = present
                .iter()
                .map(|&(year, v)| Bar::new(year as f64, v).width(0.6).fill(BAR_COLOR))
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).name("Satisfaction"));
            for &(year, v) in &present {
                plot_ui.text(
                    Text::new(PlotPoint::new(year as f64, v), format!("{v:.1}"))
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

/// Plot window for a per-year percentage chart: every year, y pinned to [0, 100].
fn percent_bounds(trend: &[TrendPoint]) -> PlotBounds {
    let first = trend.iter().map(|p| p.year).min().unwrap_or(0) as f64;
    let last = trend.iter().map(|p| p.year).max().unwrap_or(0) as f64;
    PlotBounds::from_min_max([first - 0.5, 0.0], [last + 0.5, 100.0])
}

fn term_bars(ui: &mut Ui, totals: &[CategoryTotal], colors: &CategoryColors) {
    labelled_bars(ui, "term_bars", "Enrolled", totals, |label| colors.color_for(label));
}

/// Categorical bar chart with the value printed above each bar.
fn labelled_bars(
    ui: &mut Ui,
    id: &str,
    y_label: &str,
    totals: &[CategoryTotal],
    color_for: impl Fn(&str) -> Color32,
) {
    let labels: Vec<String> = totals.iter().map(|t| t.label.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = totals
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    Bar::new(i as f64, t.value)
                        .width(0.6)
                        .name(&t.label)
                        .fill(color_for(&t.label))
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars));
            for (i, t) in totals.iter().enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(i as f64, t.value), format!("{:.0}", t.value))
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

/// Pie chart drawn as polygon slices on a unit circle.
fn term_pie(ui: &mut Ui, terms: &TermEnrollment, colors: &CategoryColors) {
    let shares = terms.shares();

    Plot::new("term_pie")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for (label, share) in &shares {
                if *share <= 0.0 {
                    continue;
                }
                let sweep = share * TAU;
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(slice_points(start, sweep)))
                        .fill_color(colors.color_for(label))
                        .stroke(Stroke::new(1.0, Color32::WHITE))
                        .name(label),
                );
                let mid = start + sweep / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                        RichText::new(format!("{:.1}%", share * 100.0)).color(Color32::WHITE),
                    )
                    .anchor(Align2::CENTER_CENTER),
                );
                start += sweep;
            }
        });
}

/// Outline of a pie slice starting at angle `start` spanning `sweep` radians.
fn slice_points(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / TAU) * 96.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start + sweep * i as f64 / steps as f64;
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

// ---------------------------------------------------------------------------
// Filtered data preview
// ---------------------------------------------------------------------------

fn data_preview(ui: &mut Ui, table: &StudentTable, max_rows: usize) {
    let shown = table.len().min(max_rows);
    let header = format!("Filtered data  ({shown} of {} rows)", table.len());

    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("data_preview")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            let columns = table.columns();
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .columns(TableColumn::auto().at_least(60.0), columns.len())
                .header(20.0, |mut header| {
                    for (name, _) in columns {
                        header.col(|ui| {
                            ui.strong(name.as_str());
                        });
                    }
                })
                .body(|mut body| {
                    for row in 0..shown {
                        body.row(18.0, |mut table_row| {
                            for (_, column) in columns {
                                table_row.col(|ui| {
                                    ui.label(column.display(row));
                                });
                            }
                        });
                    }
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_bounds_pin_the_y_axis() {
        let trend = [
            TrendPoint {
                year: 2021,
                value: Some(91.0),
            },
            TrendPoint {
                year: 2019,
                value: None,
            },
            TrendPoint {
                year: 2020,
                value: Some(40.0),
            },
        ];
        let bounds = percent_bounds(&trend);
        assert_eq!(bounds.min(), [2018.5, 0.0]);
        assert_eq!(bounds.max(), [2021.5, 100.0]);
    }

    #[test]
    fn test_slice_points_trace_the_arc() {
        let pts = slice_points(0.0, TAU / 4.0);
        assert_eq!(pts[0], [0.0, 0.0]);
        let first = pts[1];
        let last = pts[pts.len() - 1];
        assert!((first[0] - 1.0).abs() < 1e-12 && first[1].abs() < 1e-12);
        assert!(last[0].abs() < 1e-12 && (last[1] - 1.0).abs() < 1e-12);
        for p in &pts[1..] {
            assert!(((p[0] * p[0] + p[1] * p[1]).sqrt() - 1.0).abs() < 1e-12);
        }
    }
}

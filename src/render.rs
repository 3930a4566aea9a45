//! Render functions: one validated payload in, one screen region out.
//!
//! Each function is pure with respect to its payload and idempotent; calling
//! it twice with the same input leaves the same visible state. Formatting is
//! contract-fixed: rates and durations carry exactly one decimal, AUC/F1
//! exactly three.

use crate::config::ISSUE_OVERFLOW_THRESHOLD;
use crate::model::{Diagnostics, ModelMetrics, OverviewStats, Prediction};
use crate::screen::{
    CategoryRow, ConfusionCells, CustomerRow, IssueList, PredictionRegion, Screen, Verdict,
};

pub fn format_rate(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn format_hours(value: f64) -> String {
    format!("{value:.1}h")
}

pub fn format_score(value: f64) -> String {
    format!("{value:.3}")
}

pub fn render_overview(screen: &mut Screen, stats: &OverviewStats) {
    let panel = &mut screen.overview;
    panel.breach_rate = Some(format_rate(stats.sla_breach_rate));
    panel.median_resolution = Some(format_hours(stats.median_resolution_time));
    panel.p95_resolution = Some(format_hours(stats.p95_resolution_time));
    panel.total_tickets = Some(stats.total_tickets().to_string());

    // Rows keep the backend's ordering; no client-side re-sorting.
    panel.problem_customers = stats
        .problem_customers
        .iter()
        .map(|customer| CustomerRow {
            customer_id: customer.customer_id.clone(),
            breach_rate: format_rate(customer.breach_rate),
            total_tickets: customer.total_tickets.to_string(),
        })
        .collect();
    panel.top_categories = stats
        .top_categories
        .iter()
        .map(|(label, count)| CategoryRow {
            label: label.clone(),
            count: count.to_string(),
        })
        .collect();
}

pub fn render_diagnostics(screen: &mut Screen, diagnostics: &Diagnostics) {
    let panel = &mut screen.diagnostics;
    panel.ticket_count = Some(diagnostics.ticket_count.to_string());
    panel.dirty_count = Some(diagnostics.dirty_count.to_string());
    panel.customer_count = diagnostics.customer_count.map(|count| count.to_string());

    panel.issues = if diagnostics.issues.is_empty() {
        IssueList::Clean
    } else {
        // The remainder is computed from dirty_count, not from the number of
        // issue strings supplied; the backend caps the strings at the same
        // threshold.
        let overflow = if diagnostics.dirty_count > ISSUE_OVERFLOW_THRESHOLD {
            Some(format!(
                "...and {} more issues.",
                diagnostics.dirty_count - ISSUE_OVERFLOW_THRESHOLD
            ))
        } else {
            None
        };
        IssueList::Listed {
            lines: diagnostics.issues.clone(),
            overflow,
        }
    };
}

/// Skips silently when no metrics exist. When `confusion_matrix` is absent the
/// four cells are left untouched even though AUC/F1 render.
pub fn render_metrics(screen: &mut Screen, metrics: Option<&ModelMetrics>) {
    let Some(metrics) = metrics else {
        return;
    };
    screen.metrics.auc = Some(format_score(metrics.auc));
    screen.metrics.f1 = Some(format_score(metrics.f1));
    if let Some(cm) = &metrics.confusion_matrix {
        screen.metrics.confusion = Some(ConfusionCells {
            c00: cm[0][0].to_string(),
            c01: cm[0][1].to_string(),
            c10: cm[1][0].to_string(),
            c11: cm[1][1].to_string(),
        });
    }
}

pub fn render_prediction_pending(screen: &mut Screen) {
    screen.prediction = PredictionRegion::Pending;
}

pub fn render_prediction(screen: &mut Screen, prediction: &Prediction) {
    let verdict = if prediction.label == 1 {
        Verdict::WillBreach
    } else {
        Verdict::Safe
    };
    screen.prediction = PredictionRegion::Settled {
        probability: format_rate(prediction.probability * 100.0),
        verdict,
    };
}

pub fn render_prediction_error(screen: &mut Screen, message: &str) {
    screen.prediction = PredictionRegion::Rejected {
        message: message.to_string(),
    };
}

pub fn render_prediction_unreachable(screen: &mut Screen) {
    screen.prediction = PredictionRegion::Unreachable;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProblemCustomer;
    use crate::screen::Tone;
    use std::collections::BTreeMap;

    fn overview_fixture() -> OverviewStats {
        let mut daily_volume = BTreeMap::new();
        daily_volume.insert("2024-01-01".to_string(), 3);
        daily_volume.insert("2024-01-02".to_string(), 5);
        OverviewStats {
            sla_breach_rate: 12.0,
            median_resolution_time: 4.25,
            p95_resolution_time: 30.0,
            daily_volume,
            problem_customers: vec![ProblemCustomer {
                customer_id: "CUST-0042".to_string(),
                breach_rate: 80.0,
                total_tickets: 10,
            }],
            top_categories: vec![
                ("Security".to_string(), 40),
                ("Billing".to_string(), 12),
            ],
        }
    }

    #[test]
    fn rates_and_durations_render_with_one_decimal() {
        assert_eq!(format_rate(12.0), "12.0%");
        assert_eq!(format_rate(7.8499), "7.8%");
        assert_eq!(format_hours(4.25), "4.2h");
        assert_eq!(format_hours(0.0), "0.0h");
    }

    #[test]
    fn scores_render_with_three_decimals() {
        assert_eq!(format_score(0.915234), "0.915");
        assert_eq!(format_score(1.0), "1.000");
    }

    #[test]
    fn overview_renders_totals_and_ordered_rows() {
        let mut screen = Screen::new();
        render_overview(&mut screen, &overview_fixture());

        assert_eq!(screen.overview.breach_rate.as_deref(), Some("12.0%"));
        assert_eq!(screen.overview.median_resolution.as_deref(), Some("4.2h"));
        assert_eq!(screen.overview.total_tickets.as_deref(), Some("8"));
        assert_eq!(screen.overview.problem_customers[0].breach_rate, "80.0%");
        assert_eq!(screen.overview.top_categories[0].label, "Security");
        assert_eq!(screen.overview.top_categories[1].count, "12");
    }

    #[test]
    fn overview_render_is_idempotent() {
        let stats = overview_fixture();
        let mut screen = Screen::new();
        render_overview(&mut screen, &stats);
        let first = screen.overview.clone();
        render_overview(&mut screen, &stats);
        assert_eq!(screen.overview, first);
    }

    #[test]
    fn diagnostics_overflow_uses_dirty_count_remainder() {
        let mut screen = Screen::new();
        render_diagnostics(
            &mut screen,
            &Diagnostics {
                ticket_count: 1000,
                dirty_count: 120,
                issues: (0..5).map(|i| format!("issue {i}")).collect(),
                customer_count: None,
            },
        );
        match &screen.diagnostics.issues {
            IssueList::Listed { lines, overflow } => {
                assert_eq!(lines.len(), 5);
                assert_eq!(overflow.as_deref(), Some("...and 70 more issues."));
            }
            other => panic!("expected listed issues, got {other:?}"),
        }
    }

    #[test]
    fn diagnostics_under_threshold_has_no_overflow_line() {
        let mut screen = Screen::new();
        render_diagnostics(
            &mut screen,
            &Diagnostics {
                ticket_count: 100,
                dirty_count: 3,
                issues: vec!["Ticket T-1: Missing response time".to_string()],
                customer_count: Some(40),
            },
        );
        match &screen.diagnostics.issues {
            IssueList::Listed { lines, overflow } => {
                assert_eq!(lines.len(), 1);
                assert!(overflow.is_none());
            }
            other => panic!("expected listed issues, got {other:?}"),
        }
        assert_eq!(screen.diagnostics.customer_count.as_deref(), Some("40"));
    }

    #[test]
    fn diagnostics_with_no_issues_shows_affirmation() {
        let mut screen = Screen::new();
        render_diagnostics(
            &mut screen,
            &Diagnostics {
                ticket_count: 100,
                dirty_count: 0,
                issues: vec![],
                customer_count: None,
            },
        );
        assert_eq!(screen.diagnostics.issues, IssueList::Clean);
    }

    #[test]
    fn metrics_absent_skips_silently() {
        let mut screen = Screen::new();
        render_metrics(&mut screen, None);
        assert!(screen.metrics.auc.is_none());
        assert!(screen.metrics.confusion.is_none());
    }

    #[test]
    fn metrics_without_confusion_matrix_leaves_cells_untouched() {
        let mut screen = Screen::new();
        render_metrics(
            &mut screen,
            Some(&ModelMetrics {
                auc: 0.915234,
                f1: 0.8,
                confusion_matrix: None,
            }),
        );
        assert_eq!(screen.metrics.auc.as_deref(), Some("0.915"));
        assert_eq!(screen.metrics.f1.as_deref(), Some("0.800"));
        assert!(screen.metrics.confusion.is_none());
    }

    #[test]
    fn metrics_project_confusion_cells_in_fixed_order() {
        let mut screen = Screen::new();
        render_metrics(
            &mut screen,
            Some(&ModelMetrics {
                auc: 0.9,
                f1: 0.8,
                confusion_matrix: Some([[100, 5], [8, 40]]),
            }),
        );
        let cells = screen.metrics.confusion.unwrap();
        assert_eq!(cells.c00, "100");
        assert_eq!(cells.c01, "5");
        assert_eq!(cells.c10, "8");
        assert_eq!(cells.c11, "40");
    }

    #[test]
    fn prediction_renders_probability_and_verdict() {
        let mut screen = Screen::new();
        render_prediction(
            &mut screen,
            &Prediction {
                probability: 0.837,
                label: 1,
            },
        );
        match &screen.prediction {
            PredictionRegion::Settled {
                probability,
                verdict,
            } => {
                assert_eq!(probability, "83.7%");
                assert_eq!(*verdict, Verdict::WillBreach);
                assert_eq!(verdict.tone(), Tone::Danger);
            }
            other => panic!("expected settled prediction, got {other:?}"),
        }

        render_prediction(
            &mut screen,
            &Prediction {
                probability: 0.12,
                label: 0,
            },
        );
        match &screen.prediction {
            PredictionRegion::Settled { verdict, .. } => {
                assert_eq!(*verdict, Verdict::Safe);
                assert_eq!(verdict.tone(), Tone::Safe);
            }
            other => panic!("expected settled prediction, got {other:?}"),
        }
    }
}

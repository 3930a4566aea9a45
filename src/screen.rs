//! The console's view-model: a fixed set of regions holding already-formatted
//! text, three controls, and a bounded notice feed.
//!
//! The screen is the only shared mutable surface in the process. Render
//! functions mutate it synchronously under the lock and never suspend, so
//! every render is atomic with respect to other cycles. `draw` projects the
//! whole screen to a string for the terminal; it carries no logic beyond
//! layout.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::{NOTICE_BUFFER_SIZE, PREDICT_CAPTION, REINGEST_CAPTION, TRAIN_CAPTION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    Train,
    Reingest,
    Predict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub enabled: bool,
    pub caption: String,
}

impl Control {
    fn new(caption: &str) -> Self {
        Self {
            enabled: true,
            caption: caption.to_string(),
        }
    }
}

/// Visual tone of a settled prediction, the colored-background equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Danger,
    Safe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    WillBreach,
    Safe,
}

impl Verdict {
    pub fn caption(&self) -> &'static str {
        match self {
            Verdict::WillBreach => "WILL BREACH",
            Verdict::Safe => "SAFE",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Verdict::WillBreach => Tone::Danger,
            Verdict::Safe => Tone::Safe,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewPanel {
    pub breach_rate: Option<String>,
    pub median_resolution: Option<String>,
    pub p95_resolution: Option<String>,
    pub total_tickets: Option<String>,
    pub problem_customers: Vec<CustomerRow>,
    pub top_categories: Vec<CategoryRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub customer_id: String,
    pub breach_rate: String,
    pub total_tickets: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub label: String,
    pub count: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticsPanel {
    pub ticket_count: Option<String>,
    pub customer_count: Option<String>,
    pub dirty_count: Option<String>,
    pub issues: IssueList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IssueList {
    /// Nothing fetched yet.
    #[default]
    Unloaded,
    /// Fetched and empty: the single affirmative line.
    Clean,
    /// One line per issue plus at most one overflow line.
    Listed {
        lines: Vec<String>,
        overflow: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsPanel {
    pub auc: Option<String>,
    pub f1: Option<String>,
    pub confusion: Option<ConfusionCells>,
}

/// The four fixed cells, projected as [0][0], [0][1], [1][0], [1][1].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionCells {
    pub c00: String,
    pub c01: String,
    pub c10: String,
    pub c11: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PredictionRegion {
    /// Not visible until the first submit.
    #[default]
    Hidden,
    /// Visible with the transient placeholder.
    Pending,
    /// Backend rejected the input; the message is the backend's literal text.
    Rejected { message: String },
    /// The request itself failed; generic text, neutral tone.
    Unreachable,
    Settled {
        probability: String,
        verdict: Verdict,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub timestamp: DateTime<Utc>,
    pub level: NoticeLevel,
    pub text: String,
}

pub struct Screen {
    pub overview: OverviewPanel,
    pub diagnostics: DiagnosticsPanel,
    pub metrics: MetricsPanel,
    pub prediction: PredictionRegion,
    pub train: Control,
    pub reingest: Control,
    pub predict: Control,
    pub notices: VecDeque<Notice>,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            overview: OverviewPanel::default(),
            diagnostics: DiagnosticsPanel::default(),
            metrics: MetricsPanel::default(),
            prediction: PredictionRegion::default(),
            train: Control::new(TRAIN_CAPTION),
            reingest: Control::new(REINGEST_CAPTION),
            predict: Control::new(PREDICT_CAPTION),
            notices: VecDeque::with_capacity(NOTICE_BUFFER_SIZE),
        }
    }

    pub fn control(&self, id: ControlId) -> &Control {
        match id {
            ControlId::Train => &self.train,
            ControlId::Reingest => &self.reingest,
            ControlId::Predict => &self.predict,
        }
    }

    pub fn control_mut(&mut self, id: ControlId) -> &mut Control {
        match id {
            ControlId::Train => &mut self.train,
            ControlId::Reingest => &mut self.reingest,
            ControlId::Predict => &mut self.predict,
        }
    }

    pub fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        if self.notices.len() >= NOTICE_BUFFER_SIZE {
            self.notices.pop_front();
        }
        self.notices.push_back(Notice {
            timestamp: Utc::now(),
            level,
            text: text.into(),
        });
    }

    /// Terminal projection of every region.
    pub fn draw(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "== Overview ==");
        let _ = writeln!(
            out,
            "  breach rate {}   median {}   p95 {}   tickets {}",
            cell(&self.overview.breach_rate),
            cell(&self.overview.median_resolution),
            cell(&self.overview.p95_resolution),
            cell(&self.overview.total_tickets),
        );
        if !self.overview.problem_customers.is_empty() {
            let _ = writeln!(out, "  problem customers:");
            for row in &self.overview.problem_customers {
                let _ = writeln!(
                    out,
                    "    {:<12} {:>7}  {:>4} tickets",
                    row.customer_id, row.breach_rate, row.total_tickets
                );
            }
        }
        if !self.overview.top_categories.is_empty() {
            let _ = writeln!(out, "  top categories:");
            for row in &self.overview.top_categories {
                let _ = writeln!(out, "    {:<12} {:>5}", row.label, row.count);
            }
        }

        let _ = writeln!(out, "== Data quality ==");
        let _ = writeln!(
            out,
            "  tickets {}   dirty {}   customers {}",
            cell(&self.diagnostics.ticket_count),
            cell(&self.diagnostics.dirty_count),
            cell(&self.diagnostics.customer_count),
        );
        match &self.diagnostics.issues {
            IssueList::Unloaded => {}
            IssueList::Clean => {
                let _ = writeln!(out, "  No data quality issues found!");
            }
            IssueList::Listed { lines, overflow } => {
                for line in lines {
                    let _ = writeln!(out, "  - {line}");
                }
                if let Some(overflow) = overflow {
                    let _ = writeln!(out, "  {overflow}");
                }
            }
        }

        let _ = writeln!(out, "== Model ==");
        match (&self.metrics.auc, &self.metrics.f1) {
            (Some(auc), Some(f1)) => {
                let _ = writeln!(out, "  AUC {auc}   F1 {f1}");
                if let Some(cm) = &self.metrics.confusion {
                    let _ = writeln!(out, "  confusion  [{:>5} {:>5}]", cm.c00, cm.c01);
                    let _ = writeln!(out, "             [{:>5} {:>5}]", cm.c10, cm.c11);
                }
            }
            _ => {
                let _ = writeln!(out, "  (no model trained yet)");
            }
        }

        match &self.prediction {
            PredictionRegion::Hidden => {}
            PredictionRegion::Pending => {
                let _ = writeln!(out, "== Prediction ==");
                let _ = writeln!(out, "  Predicting...");
            }
            PredictionRegion::Rejected { message } => {
                let _ = writeln!(out, "== Prediction ==");
                let _ = writeln!(out, "  [!] {message}");
            }
            PredictionRegion::Unreachable => {
                let _ = writeln!(out, "== Prediction ==");
                let _ = writeln!(out, "  Prediction failed.");
            }
            PredictionRegion::Settled {
                probability,
                verdict,
            } => {
                let _ = writeln!(out, "== Prediction ==");
                let marker = match verdict.tone() {
                    Tone::Danger => "[!]",
                    Tone::Safe => "[ok]",
                };
                let _ = writeln!(
                    out,
                    "  Probability of Breach: {probability}   Result: {} {marker}",
                    verdict.caption()
                );
            }
        }

        let _ = writeln!(
            out,
            "[{}] [{}] [{}]",
            control_face(&self.train),
            control_face(&self.reingest),
            control_face(&self.predict),
        );

        for notice in &self.notices {
            let mark = match notice.level {
                NoticeLevel::Info => "*",
                NoticeLevel::Error => "!",
            };
            let _ = writeln!(
                out,
                "{mark} {} {}",
                notice.timestamp.format("%H:%M:%S"),
                notice.text
            );
        }

        out
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Lock the screen, recovering from a poisoned mutex: the screen holds plain
/// display text, so a panicked render cannot leave it logically corrupt.
pub fn lock(screen: &Mutex<Screen>) -> MutexGuard<'_, Screen> {
    screen.lock().unwrap_or_else(PoisonError::into_inner)
}

fn cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("--")
}

fn control_face(control: &Control) -> String {
    if control.enabled {
        control.caption.clone()
    } else {
        format!("{} (busy)", control.caption)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_feed_is_bounded() {
        let mut screen = Screen::new();
        for i in 0..(NOTICE_BUFFER_SIZE + 5) {
            screen.notify(NoticeLevel::Info, format!("notice {i}"));
        }
        assert_eq!(screen.notices.len(), NOTICE_BUFFER_SIZE);
        assert_eq!(screen.notices.front().unwrap().text, "notice 5");
    }

    #[test]
    fn fresh_screen_has_enabled_controls_and_placeholders() {
        let screen = Screen::new();
        assert!(screen.train.enabled);
        assert_eq!(screen.train.caption, "Train Model");
        assert_eq!(screen.reingest.caption, "Re-run Ingestion");
        assert_eq!(screen.predict.caption, "Predict");

        let drawn = screen.draw();
        assert!(drawn.contains("breach rate --"));
        assert!(drawn.contains("(no model trained yet)"));
        assert!(!drawn.contains("== Prediction =="));
    }

    #[test]
    fn draw_hides_confusion_cells_until_present() {
        let mut screen = Screen::new();
        screen.metrics.auc = Some("0.915".to_string());
        screen.metrics.f1 = Some("0.845".to_string());
        let drawn = screen.draw();
        assert!(drawn.contains("AUC 0.915"));
        assert!(!drawn.contains("confusion"));
    }
}

use jiff::civil::Date;
use tracing::debug;

use super::aggregate::SprintData;

/// How many remaining issues are listed in full before truncating.
const MAX_LISTED_TASKS: usize = 10;

/// Sprint risk level, in ascending severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Risk {
    OnTrack,
    PaceWarning,
    AtRisk,
    Overdue,
}

impl Risk {
    pub fn emoji(&self) -> &'static str {
        match self {
            Risk::OnTrack => "🟢",
            Risk::PaceWarning => "🟡",
            Risk::AtRisk | Risk::Overdue => "🔴",
        }
    }
}

/// A velocity forecast for the active sprint. Derived fresh on every call,
/// never cached.
#[derive(Debug)]
pub struct ForecastReport {
    pub sprint_name: String,
    pub metric_name: &'static str,
    pub total: f64,
    pub completed: f64,
    pub elapsed_days: i64,
    pub remaining_days: i64,
    pub current_velocity: f64,
    pub required_velocity: f64,
    pub risk: Risk,
    pub remaining_tasks: Vec<String>,
    pub end_date: Option<Date>,
}

/// Compute the forecast for `data` as of `today`.
///
/// Returns `None` when the sprint is undated (missing start or end date),
/// which callers treat as a skip. Elapsed days floor at one so that day
/// zero never divides by zero; remaining days may go negative, which marks
/// the sprint overdue and forces the required-velocity divisor to one
/// ("must finish immediately").
pub fn forecast(data: &SprintData, today: Date) -> Option<ForecastReport> {
    let start = data.sprint.start_date?;
    let end = data.sprint.end_date?;

    let metric = data.metric();
    let elapsed_days = (today - start).get_days() as i64;
    let elapsed_days = elapsed_days.max(1);
    let remaining_days = (end - today).get_days() as i64;

    let remaining_work = metric.total - metric.completed;
    let current_velocity = metric.completed / elapsed_days as f64;
    let required_velocity = remaining_work / remaining_days.max(1) as f64;

    let overdue = remaining_days < 0;
    let risk = if overdue && remaining_work > 0.0 {
        Risk::Overdue
    } else if required_velocity > current_velocity * 1.2 {
        Risk::AtRisk
    } else if required_velocity > current_velocity {
        Risk::PaceWarning
    } else {
        Risk::OnTrack
    };

    debug!(
        "Forecast for '{}': {:.1}/{:.1} {} done, {} elapsed, {} remaining, risk {:?}",
        data.sprint.name, metric.completed, metric.total, metric.name, elapsed_days,
        remaining_days, risk
    );

    let remaining_tasks = data
        .remaining()
        .iter()
        .map(|issue| format!("• *{}*: {}", issue.key, issue.summary))
        .collect();

    Some(ForecastReport {
        sprint_name: data.sprint.name.clone(),
        metric_name: metric.name,
        total: metric.total,
        completed: metric.completed,
        elapsed_days,
        remaining_days,
        current_velocity,
        required_velocity,
        risk,
        remaining_tasks,
        end_date: Some(end),
    })
}

impl ForecastReport {
    pub fn progress_pct(&self) -> f64 {
        if self.total > 0.0 {
            self.completed / self.total * 100.0
        } else {
            0.0
        }
    }

    pub fn remaining_work(&self) -> f64 {
        self.total - self.completed
    }

    pub fn is_overdue(&self) -> bool {
        self.remaining_days < 0
    }

    /// Forecasts are surfaced only near the end of the sprint or once it
    /// is overdue; earlier they are computed but suppressed.
    pub fn should_notify(&self, window_days: i64) -> bool {
        self.remaining_days <= window_days || self.is_overdue()
    }

    /// Render the forecast as a Slack-markup message.
    pub fn render(&self) -> String {
        let mut message = format!(
            "{} *Velocity Forecast: {}*\n\n\
             📊 *Progress*: {:.0} / {:.0} {} ({:.0}%)\n\
             ⏳ *Time*: {} days elapsed / {} days left\n\n\
             🚀 *Current Velocity*: {:.1} {}/day\n\
             🎯 *Required Velocity*: {:.1} {}/day\n",
            self.risk.emoji(),
            self.sprint_name,
            self.completed,
            self.total,
            self.metric_name,
            self.progress_pct(),
            self.elapsed_days,
            self.remaining_days.max(0),
            self.current_velocity,
            self.metric_name,
            self.required_velocity,
            self.metric_name,
        );

        if !self.remaining_tasks.is_empty() {
            message.push_str("\n*Remaining Tasks*:\n");
            for task in self.remaining_tasks.iter().take(MAX_LISTED_TASKS) {
                message.push_str(task);
                message.push('\n');
            }
            if self.remaining_tasks.len() > MAX_LISTED_TASKS {
                message.push_str(&format!(
                    "_...and {} more tasks_\n",
                    self.remaining_tasks.len() - MAX_LISTED_TASKS
                ));
            }
        }

        message.push('\n');
        message.push_str(&match self.risk {
            Risk::Overdue => match self.end_date {
                Some(end) => format!(
                    "🚨 *Overdue Alert*: This sprint was scheduled to end on {} but still has {:.0} {} to finish!",
                    end.strftime("%b %d"),
                    self.remaining_work(),
                    self.metric_name
                ),
                None => "🚨 *Overdue Alert*: This sprint is past its end date with work remaining!"
                    .to_string(),
            },
            Risk::AtRisk => {
                "⚠️ *Risk Alert*: The team is falling behind. Consider moving tasks to the next sprint."
                    .to_string()
            }
            Risk::PaceWarning => {
                "⚖️ *Pace Warning*: Team needs to accelerate to hit the deadline.".to_string()
            }
            Risk::OnTrack => "✅ *On Track*: Progress is looking solid!".to_string(),
        });

        message
    }
}

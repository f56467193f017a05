//! What the monitor hands to the presentation layer.

use chrono::{DateTime, Utc};

use crate::api::ApiError;
use crate::monitor::{
    Affordances, Applied, ImportKind, JobId, JobState, MonitorSession, Observation, Transition,
};

/// Emitted once per applied status record.
#[derive(Debug, Clone, PartialEq)]
pub struct PollUpdate {
    pub job_id: JobId,
    pub state: JobState,
    pub transition: Transition,
    pub message: String,
    /// Lines new in this update, in server order.
    pub new_log_lines: Vec<String>,
    pub affordances: Affordances,
    pub review_items: Vec<String>,
    pub report_lines: Vec<String>,
    pub received_at: DateTime<Utc>,
}

impl PollUpdate {
    pub fn from_applied(session: &MonitorSession, applied: Applied) -> Self {
        let new_log_lines = match applied.observation {
            Observation::NewLines(lines) => lines,
            Observation::NoNewLines => Vec::new(),
        };
        Self {
            job_id: session.job_id.clone(),
            state: session.state,
            transition: applied.transition,
            message: session.message.clone(),
            new_log_lines,
            affordances: applied.affordances,
            review_items: session.review_items.clone(),
            report_lines: session.report_lines.clone(),
            received_at: Utc::now(),
        }
    }
}

/// Panels to render once polling stops.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalView {
    pub job_id: JobId,
    pub state: JobState,
    pub message: String,
    pub affordances: Affordances,
    /// Hidden when no log line was ever received, so it never shows empty.
    pub show_log: bool,
    pub log_lines: usize,
    /// Most recent log line, if any.
    pub last_log_line: Option<String>,
    pub review_notice: bool,
    pub fixme_notice: bool,
    /// Building/address options cannot change while addresses await review.
    pub options_locked: bool,
    /// The publication template only makes sense for a finished import.
    pub show_template: bool,
    pub import_kind: ImportKind,
    pub review_items: Vec<String>,
    pub report_lines: Vec<String>,
}

impl TerminalView {
    pub fn from_session(session: &MonitorSession) -> Self {
        Self {
            job_id: session.job_id.clone(),
            state: session.state,
            message: session.message.clone(),
            affordances: session.affordances(),
            show_log: session.cursor.has_output(),
            log_lines: session.cursor.displayed_len(),
            last_log_line: session.cursor.displayed().next().map(str::to_string),
            review_notice: session.state == JobState::Review,
            fixme_notice: session.state == JobState::Fixme,
            options_locked: session.state == JobState::Review,
            show_template: session.state == JobState::Done,
            import_kind: session.report.import_kind(),
            review_items: session.review_items.clone(),
            report_lines: session.report_lines.clone(),
        }
    }
}

/// Receives everything the poller produces.
pub trait Presenter {
    fn update(&mut self, update: &PollUpdate);

    /// Polling stopped on a settled state (or an idle job).
    fn settled(&mut self, view: &TerminalView);

    fn failed(&mut self, job_id: &JobId, error: &ApiError);
}

/// Presenter that keeps everything it receives.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub updates: Vec<PollUpdate>,
    pub settled: Vec<TerminalView>,
    pub failures: Vec<String>,
}

#[cfg(test)]
impl Presenter for RecordingPresenter {
    fn update(&mut self, update: &PollUpdate) {
        self.updates.push(update.clone());
    }

    fn settled(&mut self, view: &TerminalView) {
        self.settled.push(view.clone());
    }

    fn failed(&mut self, _job_id: &JobId, error: &ApiError) {
        self.failures.push(error.user_message());
    }
}

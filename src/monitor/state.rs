use std::fmt;

use serde::{Deserialize, Serialize};

/// The six lifecycle states reported by the job-status endpoint.
///
/// The server is authoritative: a state is only ever taken from a fresh
/// status record, never computed from other fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Available,
    Running,
    Done,
    Review,
    Fixme,
    Error,
}

impl JobState {
    #[cfg(test)]
    pub const ALL: [JobState; 6] = [
        JobState::Available,
        JobState::Running,
        JobState::Done,
        JobState::Review,
        JobState::Fixme,
        JobState::Error,
    ];

    /// Whether the poller must schedule another fetch after seeing this state.
    ///
    /// `Available` keeps polling because it shows up transiently right after
    /// a start request, before the server flips the job to `Running`.
    pub fn keeps_polling(self) -> bool {
        match self {
            JobState::Available | JobState::Running => true,
            JobState::Done | JobState::Review | JobState::Fixme | JobState::Error => false,
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Available => write!(f, "AVAILABLE"),
            JobState::Running => write!(f, "RUNNING"),
            JobState::Done => write!(f, "DONE"),
            JobState::Review => write!(f, "REVIEW"),
            JobState::Fixme => write!(f, "FIXME"),
            JobState::Error => write!(f, "ERROR"),
        }
    }
}

/// The result of feeding a freshly fetched state into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same state as before.
    Unchanged(JobState),
    /// The server reported a different state.
    Changed { from: JobState, to: JobState },
}

impl Transition {
    pub fn between(from: JobState, to: JobState) -> Self {
        if from == to {
            Transition::Unchanged(to)
        } else {
            Transition::Changed { from, to }
        }
    }
}

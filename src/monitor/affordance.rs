use super::state::JobState;

/// Which user actions are permitted for the current job state.
///
/// Always derived from a [`JobState`] with [`Affordances::for_state`], never
/// patched field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    /// Start (or restart) the import.
    pub process: bool,
    /// Open the flagged items for manual review.
    pub review: bool,
    /// Download the results folder.
    pub download: bool,
}

impl Affordances {
    pub fn for_state(state: JobState) -> Self {
        let (process, review, download) = match state {
            JobState::Available => (true, false, false),
            JobState::Running => (false, false, false),
            JobState::Done => (false, false, true),
            JobState::Review => (true, true, false),
            JobState::Fixme => (false, true, false),
            JobState::Error => (true, false, false),
        };
        Self {
            process,
            review,
            download,
        }
    }
}

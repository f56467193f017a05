mod affordance;
mod cursor;
mod job;
mod report;
mod state;

pub use affordance::Affordances;
pub use cursor::Observation;
pub use job::{Applied, JobId, MonitorSession};
pub use report::{ImportKind, ReportFields};
pub use state::{JobState, Transition};

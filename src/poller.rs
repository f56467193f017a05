use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, error, info};
use tokio::time::sleep;

use crate::api::{ApiError, JobApi, StartRequest, StatusRecord};
use crate::monitor::{JobId, JobState, MonitorSession, Transition};
use crate::view::{PollUpdate, Presenter, TerminalView};

/// Settings for the polling loop.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    /// Delay between the end of one tick and the start of the next.
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
        }
    }
}

/// Shared generation counter. Whoever holds a clone can supersede the
/// session that is currently polling; its pending tick and any in-flight
/// response are then dropped.
#[derive(Debug, Clone, Default)]
pub struct SessionSwitch(Arc<AtomicU64>);

impl SessionSwitch {
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }

    /// Invalidate the running session.
    pub fn supersede(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Result of a single poll.
#[derive(Debug)]
pub enum TickOutcome {
    /// State is RUNNING or AVAILABLE; another tick is due.
    Continue,
    /// Polling-terminal state reached.
    Settled(JobState),
    /// The request failed. The session is over.
    Failed(ApiError),
    /// The session was replaced while the request was in flight.
    Superseded,
}

/// How a polling session ended.
#[derive(Debug)]
pub enum SessionEnd {
    Settled(JobState),
    /// The job has never run; there is nothing to follow.
    Idle,
    Failed(ApiError),
    Superseded,
}

/// Drives the monitoring of one job at a time.
pub struct Poller<A> {
    api: A,
    settings: PollSettings,
    switch: SessionSwitch,
    session: Option<MonitorSession>,
}

impl<A: JobApi> Poller<A> {
    pub fn new(api: A, settings: PollSettings) -> Self {
        Self {
            api,
            settings,
            switch: SessionSwitch::default(),
            session: None,
        }
    }

    pub fn switch(&self) -> SessionSwitch {
        self.switch.clone()
    }

    pub fn session(&self) -> Option<&MonitorSession> {
        self.session.as_ref()
    }

    /// Open a new session for `job_id`, superseding any previous one.
    /// Re-monitoring the same job keeps its cursor.
    pub fn begin(&mut self, job_id: JobId) -> u64 {
        let generation = self.switch.supersede();
        self.session = Some(match self.session.take() {
            Some(previous) => MonitorSession::renew(previous, job_id, generation),
            None => MonitorSession::new(job_id, generation),
        });
        debug!("session {generation} begins");
        generation
    }

    /// Open a session for a freshly started run. The server truncates the
    /// job log when a run starts, so the cursor goes back to 0.
    fn begin_run(&mut self, job_id: JobId) -> u64 {
        let generation = self.begin(job_id);
        if let Some(session) = self.session.as_mut() {
            session.cursor.reset();
        }
        generation
    }

    /// Follow an existing job. A job that has never run is reported once
    /// and not polled.
    pub async fn watch(&mut self, job_id: JobId, presenter: &mut impl Presenter) -> SessionEnd {
        self.begin(job_id);
        if let Some(end) = self.tick(presenter).await.into_end() {
            return end;
        }
        if let Some(session) = &self.session
            && session.state == JobState::Available
        {
            info!("job {} has not been processed", session.job_id);
            presenter.settled(&TerminalView::from_session(session));
            return SessionEnd::Idle;
        }
        sleep(self.settings.interval).await;
        self.run(presenter).await
    }

    /// `POST` the job, then poll it. A rejected start is surfaced and no
    /// session is opened.
    pub async fn start_job(
        &mut self,
        job_id: JobId,
        req: &StartRequest,
        presenter: &mut impl Presenter,
    ) -> Result<SessionEnd, ApiError> {
        let record = match self.api.start(&job_id, req).await {
            Ok(record) => record,
            Err(err) => {
                error!("start of job {job_id} failed: {err}");
                presenter.failed(&job_id, &err);
                return Err(err);
            }
        };
        info!(
            "job {job_id} started (building={}, address={}, idioma={})",
            req.building, req.address, req.idioma
        );
        self.begin_run(job_id);
        self.seed(&record, presenter);
        sleep(self.settings.interval).await;
        Ok(self.run(presenter).await)
    }

    /// `PUT` the job to unlock it, then poll it again with the cursor it
    /// already had.
    pub async fn unlock_job(
        &mut self,
        job_id: JobId,
        presenter: &mut impl Presenter,
    ) -> Result<SessionEnd, ApiError> {
        let record = match self.api.unlock(&job_id).await {
            Ok(record) => record,
            Err(err) => {
                error!("unlock of job {job_id} failed: {err}");
                presenter.failed(&job_id, &err);
                return Err(err);
            }
        };
        info!("job {job_id} unlocked");
        self.begin(job_id);
        self.seed(&record, presenter);
        sleep(self.settings.interval).await;
        Ok(self.run(presenter).await)
    }

    /// Poll until the job settles, fails, or the session is superseded.
    /// The next tick is armed only after the previous response was applied.
    pub async fn run(&mut self, presenter: &mut impl Presenter) -> SessionEnd {
        loop {
            if let Some(end) = self.tick(presenter).await.into_end() {
                return end;
            }
            sleep(self.settings.interval).await;
        }
    }

    /// One fetch-and-apply step.
    pub async fn tick(&mut self, presenter: &mut impl Presenter) -> TickOutcome {
        let Some(session) = &self.session else {
            return TickOutcome::Superseded;
        };
        let generation = session.generation;
        if !self.switch.is_current(generation) {
            debug!("session {generation} superseded before its tick");
            return TickOutcome::Superseded;
        }
        let job_id = session.job_id.clone();
        let cursor = session.cursor.position();
        debug!("polling job {job_id} from line {cursor} (session {generation})");

        let result = self.api.status(&job_id, cursor).await;

        if !self.switch.is_current(generation) {
            debug!("discarding response for superseded session {generation}");
            return TickOutcome::Superseded;
        }
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Superseded;
        };
        session.ticks += 1;

        let record = match result {
            Ok(record) => record,
            Err(err) => {
                error!("status of job {job_id} failed: {err}");
                presenter.failed(&job_id, &err);
                return TickOutcome::Failed(err);
            }
        };

        let state = Self::apply(session, &record, presenter);
        if state.keeps_polling() {
            TickOutcome::Continue
        } else {
            presenter.settled(&TerminalView::from_session(session));
            TickOutcome::Settled(state)
        }
    }

    /// Apply the record an action returned, before the first poll.
    fn seed(&mut self, record: &StatusRecord, presenter: &mut impl Presenter) {
        if let Some(session) = self.session.as_mut() {
            Self::apply(session, record, presenter);
        }
    }

    fn apply(
        session: &mut MonitorSession,
        record: &StatusRecord,
        presenter: &mut impl Presenter,
    ) -> JobState {
        let applied = session.apply(record);
        if let Transition::Changed { from, to } = applied.transition {
            info!("job {}: {from} -> {to}", session.job_id);
        }
        let update = PollUpdate::from_applied(session, applied);
        presenter.update(&update);
        session.state
    }
}

impl TickOutcome {
    /// `None` while the session is still polling.
    pub fn into_end(self) -> Option<SessionEnd> {
        match self {
            TickOutcome::Continue => None,
            TickOutcome::Settled(state) => Some(SessionEnd::Settled(state)),
            TickOutcome::Failed(err) => Some(SessionEnd::Failed(err)),
            TickOutcome::Superseded => Some(SessionEnd::Superseded),
        }
    }
}

use std::fmt;

use chrono::{DateTime, Utc};

use super::affordance::Affordances;
use super::cursor::{LogCursor, Observation};
use super::report::ReportFields;
use super::state::{JobState, Transition};
use crate::api::StatusRecord;
use crate::error::CatwatchError;

/// Provinces whose default import language is Catalan.
const CATALAN_PROVINCES: &[&str] = &["03", "07", "08", "12", "17", "25", "43", "46"];
/// Provinces whose default import language is Galician.
const GALICIAN_PROVINCES: &[&str] = &["15", "27", "32", "36"];

/// Identifies one import job: a municipality and an optional sub-division.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId {
    municipality: String,
    division: Option<String>,
}

impl JobId {
    /// Validates the municipality code (five ASCII digits) and the division,
    /// an OSM relation id made of ASCII digits. An empty division is treated
    /// as no division.
    pub fn new(municipality: &str, division: Option<&str>) -> Result<Self, CatwatchError> {
        let municipality = municipality.trim();
        if municipality.len() != 5 || !municipality.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CatwatchError::InvalidMunicipality(municipality.to_string()));
        }
        let division = match division.map(str::trim) {
            None | Some("") => None,
            Some(d) if !d.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(CatwatchError::InvalidDivision(d.to_string()));
            }
            Some(d) => Some(d.to_string()),
        };
        Ok(Self {
            municipality: municipality.to_string(),
            division,
        })
    }

    pub fn municipality(&self) -> &str {
        &self.municipality
    }

    #[cfg(test)]
    pub fn division(&self) -> Option<&str> {
        self.division.as_deref()
    }

    pub fn province(&self) -> &str {
        &self.municipality[..2]
    }

    /// Path below `job/`, e.g. `28079/` or `28079/3456789`.
    pub fn path(&self) -> String {
        format!(
            "{}/{}",
            self.municipality,
            self.division.as_deref().unwrap_or("")
        )
    }

    /// Locale the import should use when the user does not pick one.
    pub fn default_language(&self) -> &'static str {
        let province = self.province();
        if CATALAN_PROVINCES.contains(&province) {
            "ca_ES"
        } else if GALICIAN_PROVINCES.contains(&province) {
            "gl_ES"
        } else {
            "es_ES"
        }
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.division {
            Some(division) => write!(f, "{}/{}", self.municipality, division),
            None => write!(f, "{}", self.municipality),
        }
    }
}

/// What applying one status record did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub transition: Transition,
    pub observation: Observation,
    pub affordances: Affordances,
}

/// Everything the client knows about the monitored job during one
/// polling session.
#[derive(Debug, Clone)]
pub struct MonitorSession {
    pub job_id: JobId,
    pub generation: u64,
    pub cursor: LogCursor,
    pub state: JobState,
    pub message: String,
    pub review_items: Vec<String>,
    pub report_lines: Vec<String>,
    pub report: ReportFields,
    pub ticks: u32,
    pub started_at: DateTime<Utc>,
}

impl MonitorSession {
    pub fn new(job_id: JobId, generation: u64) -> Self {
        Self {
            job_id,
            generation,
            cursor: LogCursor::new(),
            state: JobState::Available,
            message: String::new(),
            review_items: Vec::new(),
            report_lines: Vec::new(),
            report: ReportFields::default(),
            ticks: 0,
            started_at: Utc::now(),
        }
    }

    /// Continue monitoring under a new generation. The cursor survives only
    /// when the job is the same one.
    pub fn renew(previous: MonitorSession, job_id: JobId, generation: u64) -> Self {
        if previous.job_id == job_id {
            Self {
                generation,
                ticks: 0,
                started_at: Utc::now(),
                ..previous
            }
        } else {
            Self::new(job_id, generation)
        }
    }

    pub fn affordances(&self) -> Affordances {
        Affordances::for_state(self.state)
    }

    /// Apply a complete status record. The message and panels are replaced
    /// wholesale; the log only grows when `linea` advances.
    pub fn apply(&mut self, record: &StatusRecord) -> Applied {
        let observation = self.cursor.observe(record.linea, &record.log);
        let transition = Transition::between(self.state, record.estado);
        self.state = record.estado;
        self.message = record.mensaje.clone();
        self.review_items = record.revisar.clone();
        self.report_lines = record.informe.clone();
        self.report = record.report.clone();
        Applied {
            transition,
            observation,
            affordances: Affordances::for_state(self.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(estado: JobState, linea: u64, log: &[&str]) -> StatusRecord {
        StatusRecord {
            estado,
            mensaje: format!("{estado}"),
            cod_municipio: "28079".into(),
            linea,
            log: log.iter().map(|s| s.to_string()).collect(),
            revisar: Vec::new(),
            informe: Vec::new(),
            report: ReportFields::default(),
        }
    }

    #[test]
    fn job_id_paths() {
        let id = JobId::new("28079", None).unwrap();
        assert_eq!(id.path(), "28079/");
        assert_eq!(id.to_string(), "28079");
        assert_eq!(id.province(), "28");

        let id = JobId::new("08019", Some("3471245")).unwrap();
        assert_eq!(id.path(), "08019/3471245");
        assert_eq!(id.to_string(), "08019/3471245");
    }

    #[test]
    fn empty_division_is_none() {
        let id = JobId::new("28079", Some("  ")).unwrap();
        assert_eq!(id.division(), None);
        let id = JobId::new("28079", Some(" 3471245 ")).unwrap();
        assert_eq!(id.division(), Some("3471245"));
    }

    #[test]
    fn rejects_bad_codes() {
        assert!(matches!(
            JobId::new("2807", None),
            Err(CatwatchError::InvalidMunicipality(_))
        ));
        assert!(matches!(
            JobId::new("28O79", None),
            Err(CatwatchError::InvalidMunicipality(_))
        ));
        assert!(matches!(
            JobId::new("28079", Some("a/b")),
            Err(CatwatchError::InvalidDivision(_))
        ));
        for division in ["12#34", "12?x=1", "12 34", "12%2F3", "r12"] {
            assert!(
                matches!(
                    JobId::new("28079", Some(division)),
                    Err(CatwatchError::InvalidDivision(_))
                ),
                "{division}"
            );
        }
    }

    #[test]
    fn default_language_by_province() {
        assert_eq!(JobId::new("08019", None).unwrap().default_language(), "ca_ES");
        assert_eq!(JobId::new("46250", None).unwrap().default_language(), "ca_ES");
        assert_eq!(JobId::new("15030", None).unwrap().default_language(), "gl_ES");
        assert_eq!(JobId::new("28079", None).unwrap().default_language(), "es_ES");
    }

    #[test]
    fn apply_replaces_message_and_tracks_transition() {
        let mut session = MonitorSession::new(JobId::new("28079", None).unwrap(), 1);
        let applied = session.apply(&record(JobState::Running, 2, &["a", "b"]));
        assert_eq!(
            applied.transition,
            Transition::Changed {
                from: JobState::Available,
                to: JobState::Running
            }
        );
        assert_eq!(session.message, "RUNNING");
        assert_eq!(applied.affordances, Affordances::for_state(JobState::Running));

        let applied = session.apply(&record(JobState::Running, 2, &[]));
        assert_eq!(applied.transition, Transition::Unchanged(JobState::Running));
        assert_eq!(applied.observation, Observation::NoNewLines);
        assert_eq!(session.cursor.position(), 2);
    }

    #[test]
    fn renew_keeps_cursor_for_same_job() {
        let id = JobId::new("28079", None).unwrap();
        let mut session = MonitorSession::new(id.clone(), 1);
        session.apply(&record(JobState::Running, 5, &["x"]));

        let renewed = MonitorSession::renew(session, id, 2);
        assert_eq!(renewed.generation, 2);
        assert_eq!(renewed.cursor.position(), 5);
        assert_eq!(renewed.state, JobState::Running);
    }

    #[test]
    fn renew_resets_cursor_for_other_job() {
        let mut session = MonitorSession::new(JobId::new("28079", None).unwrap(), 1);
        session.apply(&record(JobState::Running, 5, &["x"]));

        let renewed = MonitorSession::renew(session, JobId::new("28080", None).unwrap(), 2);
        assert_eq!(renewed.cursor.position(), 0);
        assert_eq!(renewed.state, JobState::Available);
        assert!(renewed.message.is_empty());
    }
}

//! Public URLs of an import's results.

use crate::monitor::JobId;

/// JOSM remote-control endpoint on the user's machine.
const JOSM_IMPORT_URL: &str = "http://localhost:8111/import";

#[derive(Debug, Clone)]
pub struct ResultLinks {
    base_url: String,
}

impl ResultLinks {
    pub fn new(base_url: &str) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Self { base_url }
    }

    /// Folder with the generated task files.
    pub fn download(&self, job_id: &JobId) -> String {
        format!("{}results/{}/", self.base_url, job_id.municipality())
    }

    /// Street-name sheet to check while the job is in review.
    pub fn street_names(&self, job_id: &JobId) -> String {
        format!("{}highway_names.csv", self.download(job_id))
    }

    pub fn task(&self, job_id: &JobId, item: &str) -> String {
        format!("{}tasks/{item}", self.download(job_id))
    }

    /// Opens the task in a new JOSM layer.
    pub fn josm_import(&self, job_id: &JobId, item: &str) -> String {
        format!(
            "{JOSM_IMPORT_URL}?new_layer=true&url={}",
            self.task(job_id, item)
        )
    }
}

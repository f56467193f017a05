use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatwatchError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid municipality code '{0}': expected five digits")]
    InvalidMunicipality(String),

    #[error("Invalid division code '{0}'")]
    InvalidDivision(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_municipality_display() {
        let err = CatwatchError::InvalidMunicipality("280".into());
        assert_eq!(
            err.to_string(),
            "Invalid municipality code '280': expected five digits"
        );
    }

    #[test]
    fn config_display() {
        let err = CatwatchError::Config("poll_interval_ms must be greater than zero".into());
        assert_eq!(
            err.to_string(),
            "Config error: poll_interval_ms must be greater than zero"
        );
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sparse `report` map of a status record. Only field presence matters here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportFields(BTreeMap<String, serde_json::Value>);

impl ReportFields {
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn import_kind(&self) -> ImportKind {
        ImportKind::classify(self)
    }
}

/// What the import contains, judged by the dates present in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Buildings,
    Addresses,
    BuildingsAndAddresses,
}

impl ImportKind {
    pub fn classify(report: &ReportFields) -> Self {
        match (report.contains("building_date"), report.contains("address_date")) {
            (true, false) => ImportKind::Buildings,
            (false, true) => ImportKind::Addresses,
            _ => ImportKind::BuildingsAndAddresses,
        }
    }

    /// Label used in the Spanish publication template.
    pub fn label_es(self) -> &'static str {
        match self {
            ImportKind::Buildings => "edificios",
            ImportKind::Addresses => "direcciones",
            ImportKind::BuildingsAndAddresses => "edificios y direcciones",
        }
    }

    pub fn label_en(self) -> &'static str {
        match self {
            ImportKind::Buildings => "buildings",
            ImportKind::Addresses => "addresses",
            ImportKind::BuildingsAndAddresses => "buildings and addresses",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(json: &str) -> ReportFields {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn buildings_only() {
        let kind = report(r#"{"building_date": "2023-01-01"}"#).import_kind();
        assert_eq!(kind, ImportKind::Buildings);
        assert_eq!(kind.label_es(), "edificios");
        assert_eq!(kind.label_en(), "buildings");
    }

    #[test]
    fn addresses_only() {
        let kind = report(r#"{"address_date": "2023-01-01", "mun_name": "Madrid"}"#).import_kind();
        assert_eq!(kind, ImportKind::Addresses);
        assert_eq!(kind.label_es(), "direcciones");
    }

    #[test]
    fn both_or_neither_is_combined() {
        let both = report(r#"{"building_date": "x", "address_date": "y"}"#);
        assert_eq!(both.import_kind(), ImportKind::BuildingsAndAddresses);
        assert_eq!(
            ReportFields::default().import_kind(),
            ImportKind::BuildingsAndAddresses
        );
    }

    #[test]
    fn presence_counts_even_when_null() {
        let kind = report(r#"{"building_date": null}"#).import_kind();
        assert_eq!(kind, ImportKind::Buildings);
    }
}

//! Row → record mapping

use std::collections::HashMap;

use obras_common::db::{Measurements, Work};

use crate::coerce;
use crate::columns;
use crate::error::Result;
use crate::source::SourceRow;

/// Catalog lookup maps loaded after the catalog pass
#[derive(Debug, Clone, Default)]
pub struct CatalogIds {
    /// Project name → id
    pub projects: HashMap<String, String>,
    /// Crew name → id
    pub crews: HashMap<String, String>,
    /// Responsible email → id
    pub responsibles: HashMap<String, String>,
}

impl CatalogIds {
    fn lookup(map: &HashMap<String, String>, row: &SourceRow<'_>, column: &str) -> Option<String> {
        coerce::text(row.get(column)).and_then(|key| map.get(&key).cloned())
    }
}

/// External business key of a row; `None` when blank
pub fn external_key(row: &SourceRow<'_>) -> Option<String> {
    coerce::text(row.get(columns::EXTERNAL_ID))
}

/// Label for log lines: the work name, falling back to the key
pub fn display_name(row: &SourceRow<'_>, external_id: &str) -> String {
    coerce::text(row.get(columns::WORK_NAME)).unwrap_or_else(|| external_id.to_string())
}

/// A fact row: one work plus the evidence URLs to attach to it
#[derive(Debug, Clone, PartialEq)]
pub struct WorkRecord {
    pub work: Work,
    pub evidence_urls: Vec<String>,
}

impl WorkRecord {
    /// Map a source row onto a new work with a fresh id
    ///
    /// Fails only when a measurement column holds something that is not a
    /// number.
    pub fn from_row(row: &SourceRow<'_>, external_id: String, ids: &CatalogIds) -> Result<Self> {
        let measure = |column: &str| coerce::number(column, row.get(column));
        let text = |column: &str| coerce::text(row.get(column));

        let mut work = Work::new(external_id);
        work.project_id = CatalogIds::lookup(&ids.projects, row, columns::PROJECT);
        work.crew_id = CatalogIds::lookup(&ids.crews, row, columns::CREW);
        work.responsible_id = CatalogIds::lookup(&ids.responsibles, row, columns::RESPONSIBLE_EMAIL);
        work.phase = text(columns::PHASE);
        work.activity = text(columns::ACTIVITY);
        work.work_type = text(columns::WORK_TYPE);
        work.name = text(columns::WORK_NAME);
        work.status = text(columns::STATUS);
        work.start_date = coerce::date(row.get(columns::START_DATE));
        work.end_date = coerce::date(row.get(columns::END_DATE));
        work.coordinates = text(columns::COORDINATES);
        work.geometry = text(columns::GEOMETRY);
        work.measurements = Measurements {
            base_major_m: measure(columns::BASE_MAJOR)?,
            base_minor_m: measure(columns::BASE_MINOR)?,
            height_m: measure(columns::HEIGHT)?,
            length_m: measure(columns::LENGTH)?,
            silt_length_m: measure(columns::SILT_LENGTH)?,
            construction_volume_m3: measure(columns::CONSTRUCTION_VOLUME)?,
            storage_volume_m3: measure(columns::STORAGE_VOLUME)?,
            area_m2: measure(columns::AREA)?,
        };
        work.notes = text(columns::NOTES).unwrap_or_default();

        let evidence_urls = columns::EVIDENCE
            .iter()
            .filter_map(|column| text(*column))
            .collect();

        Ok(Self { work, evidence_urls })
    }
}

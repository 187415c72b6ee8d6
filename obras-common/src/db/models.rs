//! Database models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::uuid_utils;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crew {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Responsible {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Physical measurements of a work, all optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub base_major_m: Option<f64>,
    pub base_minor_m: Option<f64>,
    pub height_m: Option<f64>,
    pub length_m: Option<f64>,
    pub silt_length_m: Option<f64>,
    pub construction_volume_m3: Option<f64>,
    pub storage_volume_m3: Option<f64>,
    pub area_m2: Option<f64>,
}

/// A construction work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: String,
    /// Identifier assigned by the source spreadsheet
    pub external_id: String,
    pub project_id: Option<String>,
    pub crew_id: Option<String>,
    pub responsible_id: Option<String>,
    pub phase: Option<String>,
    pub activity: Option<String>,
    pub work_type: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub coordinates: Option<String>,
    pub geometry: Option<String>,
    pub measurements: Measurements,
    pub notes: String,
}

impl Work {
    /// Create an empty work with a freshly generated id
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            id: uuid_utils::generate_id(),
            external_id: external_id.into(),
            project_id: None,
            crew_id: None,
            responsible_id: None,
            phase: None,
            activity: None,
            work_type: None,
            name: None,
            status: None,
            start_date: None,
            end_date: None,
            coordinates: None,
            geometry: None,
            measurements: Measurements::default(),
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub id: String,
    pub work_id: String,
    pub url: String,
}

//! Source spreadsheet layout
//!
//! Header texts exactly as they appear in the works workbook, including the
//! workbook's own spelling.

/// Sheet read when none is given on the command line
pub const DEFAULT_SHEET: &str = "Hoja 1";

pub const PROJECT: &str = "Proyecto";
pub const CREW: &str = "Cuadrilla";
pub const RESPONSIBLE_NAME: &str = "Responsable de reporte";
pub const RESPONSIBLE_EMAIL: &str = "Correo reponsable de reporte";
pub const RESPONSIBLE_ROLE: &str = "Rol";

pub const EXTERNAL_ID: &str = "ID obra";
pub const PHASE: &str = "Fase";
pub const ACTIVITY: &str = "Actividad";
pub const WORK_TYPE: &str = "Tipo de Obra";
pub const WORK_NAME: &str = "Nombre de la obra";
pub const STATUS: &str = "Estado";
pub const START_DATE: &str = "Fecha de inicio";
pub const END_DATE: &str = "Fecha de finalización";
pub const COORDINATES: &str = "Coordenadas";
pub const GEOMETRY: &str = "Geometría para la gráfica de la obra";

pub const BASE_MAJOR: &str = "Base mayor (m)";
pub const BASE_MINOR: &str = "Base menor (m)";
pub const HEIGHT: &str = "Alto (m)";
pub const LENGTH: &str = "Largo (m)";
pub const SILT_LENGTH: &str = "Largo de azolve (m)";
pub const CONSTRUCTION_VOLUME: &str = "Volumen de construcción (m3)";
pub const STORAGE_VOLUME: &str = "Volumen de almacenamiento (m3)";
pub const AREA: &str = "área (m2)";

pub const NOTES: &str = "Observaciones";

/// Photographic evidence columns, checked in order
pub const EVIDENCE: [&str; 5] = [
    "Evidencia fotográfica 1",
    "Evidencia fotográfica 2",
    "Evidencia fotográfica 3",
    "Evidencia fotográfica 4",
    "Evidencia fotográfica 5",
];

/// Columns that must be present before anything is written
pub const REQUIRED: [&str; 3] = [PROJECT, CREW, EXTERNAL_ID];

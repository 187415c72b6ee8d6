//! Table Schema Definitions
//!
//! Single source of truth for the obras database schema. Each struct defines
//! the expected schema for one table.
//!
//! Catalog tables (`projects`, `crews`, `responsibles`) are keyed by a
//! business value (name or email). `works` is keyed by the source system's
//! identifier (`external_id`), and `evidence` hangs off `works`.

use crate::db::schema_sync::{ColumnDefinition, SchemaDrift, SchemaSync, TableSchema};
use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Projects catalog
pub struct ProjectsTableSchema;

impl TableSchema for ProjectsTableSchema {
    fn table_name() -> &'static str {
        "projects"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "TEXT").primary_key(),
            ColumnDefinition::new("name", "TEXT").not_null().unique(),
        ]
    }
}

/// Crews catalog
pub struct CrewsTableSchema;

impl TableSchema for CrewsTableSchema {
    fn table_name() -> &'static str {
        "crews"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "TEXT").primary_key(),
            ColumnDefinition::new("name", "TEXT").not_null().unique(),
        ]
    }
}

/// Responsible persons catalog, keyed by email
pub struct ResponsiblesTableSchema;

impl TableSchema for ResponsiblesTableSchema {
    fn table_name() -> &'static str {
        "responsibles"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "TEXT").primary_key(),
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("email", "TEXT").not_null().unique(),
            ColumnDefinition::new("role", "TEXT").not_null(),
        ]
    }
}

/// Construction works
pub struct WorksTableSchema;

impl TableSchema for WorksTableSchema {
    fn table_name() -> &'static str {
        "works"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "TEXT").primary_key(),
            // Dedup guard for re-imports
            ColumnDefinition::new("external_id", "TEXT").not_null().unique(),
            ColumnDefinition::new("project_id", "TEXT").references("projects", "id"),
            ColumnDefinition::new("crew_id", "TEXT").references("crews", "id"),
            ColumnDefinition::new("responsible_id", "TEXT").references("responsibles", "id"),
            ColumnDefinition::new("phase", "TEXT"),
            ColumnDefinition::new("activity", "TEXT"),
            ColumnDefinition::new("work_type", "TEXT"),
            ColumnDefinition::new("name", "TEXT"),
            ColumnDefinition::new("status", "TEXT"),
            ColumnDefinition::new("start_date", "DATE"),
            ColumnDefinition::new("end_date", "DATE"),
            ColumnDefinition::new("coordinates", "TEXT"),
            ColumnDefinition::new("geometry", "TEXT"),
            ColumnDefinition::new("base_major_m", "REAL"),
            ColumnDefinition::new("base_minor_m", "REAL"),
            ColumnDefinition::new("height_m", "REAL"),
            ColumnDefinition::new("length_m", "REAL"),
            ColumnDefinition::new("silt_length_m", "REAL"),
            ColumnDefinition::new("construction_volume_m3", "REAL"),
            ColumnDefinition::new("storage_volume_m3", "REAL"),
            ColumnDefinition::new("area_m2", "REAL"),
            ColumnDefinition::new("notes", "TEXT").not_null().default("''"),
        ]
    }
}

/// Photographic evidence attached to a work
pub struct EvidenceTableSchema;

impl TableSchema for EvidenceTableSchema {
    fn table_name() -> &'static str {
        "evidence"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "TEXT").primary_key(),
            ColumnDefinition::new("work_id", "TEXT")
                .not_null()
                .references("works", "id"),
            ColumnDefinition::new("url", "TEXT").not_null(),
        ]
    }
}

/// Create every table and check for drift
///
/// Tables are processed in foreign-key dependency order.
pub async fn sync_all_table_schemas(pool: &SqlitePool) -> Result<Vec<SchemaDrift>> {
    info!("=== Schema Synchronization ===");

    let mut drift = Vec::new();
    drift.extend(SchemaSync::sync_table::<ProjectsTableSchema>(pool).await?);
    drift.extend(SchemaSync::sync_table::<CrewsTableSchema>(pool).await?);
    drift.extend(SchemaSync::sync_table::<ResponsiblesTableSchema>(pool).await?);
    drift.extend(SchemaSync::sync_table::<WorksTableSchema>(pool).await?);
    drift.extend(SchemaSync::sync_table::<EvidenceTableSchema>(pool).await?);

    info!("=== Schema Synchronization Complete ({} drift item(s)) ===", drift.len());
    Ok(drift)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_keys_are_unique() {
        let projects = ProjectsTableSchema::expected_columns();
        assert!(projects.iter().any(|c| c.name == "name" && c.not_null && c.unique));

        let crews = CrewsTableSchema::expected_columns();
        assert!(crews.iter().any(|c| c.name == "name" && c.not_null && c.unique));

        let responsibles = ResponsiblesTableSchema::expected_columns();
        assert!(responsibles.iter().any(|c| c.name == "email" && c.not_null && c.unique));
        assert!(responsibles.iter().any(|c| c.name == "name" && c.not_null && !c.unique));
    }

    #[test]
    fn test_works_table_schema_definition() {
        let columns = WorksTableSchema::expected_columns();

        assert!(columns.iter().any(|c| c.name == "id" && c.primary_key));
        assert!(columns.iter().any(|c| c.name == "external_id" && c.not_null && c.unique));
        assert!(columns.iter().any(|c| c.name == "project_id"
            && c.references == Some(("projects".to_string(), "id".to_string()))));
        assert!(columns.iter().any(|c| c.name == "crew_id"
            && c.references == Some(("crews".to_string(), "id".to_string()))));
        assert!(columns.iter().any(|c| c.name == "responsible_id"
            && c.references == Some(("responsibles".to_string(), "id".to_string()))));

        let real_columns = columns.iter().filter(|c| c.sql_type == "REAL").count();
        assert_eq!(real_columns, 8);
    }

    #[test]
    fn test_evidence_references_works() {
        let sql = EvidenceTableSchema::create_table_sql();
        assert!(sql.contains("work_id TEXT NOT NULL REFERENCES works(id)"));
    }
}

//! Two-pass spreadsheet import
//!
//! **Catalog pass:** every distinct project, crew and responsible in the
//! sheet is ensured in one transaction, committed before any work is
//! written.
//!
//! **Fact pass:** one outer transaction for the whole sheet. Each row runs
//! inside its own savepoint, so an error rolls back that row's work and
//! evidence and nothing else. The outer transaction commits once at the end.

mod report;

pub use report::ImportReport;

use std::collections::HashSet;

use obras_common::db::catalogs::{self, NamedCatalog};
use obras_common::db::works;
use sqlx::{Acquire, Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{error, info, warn};

use crate::coerce;
use crate::columns;
use crate::error::Result;
use crate::record::{self, CatalogIds, WorkRecord};
use crate::source::{SourceRow, SourceTable};

/// Outcome of a single fact row
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowOutcome {
    Inserted { evidence: usize },
    Skipped,
}

/// Distinct catalog values found in a sheet, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogValues {
    pub projects: Vec<String>,
    pub crews: Vec<String>,
    /// (name, email, role); the first row mentioning an email wins
    pub responsibles: Vec<(String, String, String)>,
}

impl CatalogValues {
    /// Collect trimmed, non-blank catalog values from every row
    pub fn collect(table: &SourceTable) -> Self {
        let mut values = Self::default();
        let mut seen_projects = HashSet::new();
        let mut seen_crews = HashSet::new();
        let mut seen_emails = HashSet::new();

        for row in table.rows() {
            if let Some(project) = coerce::text(row.get(columns::PROJECT)) {
                if seen_projects.insert(project.clone()) {
                    values.projects.push(project);
                }
            }

            if let Some(crew) = coerce::text(row.get(columns::CREW)) {
                if seen_crews.insert(crew.clone()) {
                    values.crews.push(crew);
                }
            }

            if let Some(email) = coerce::text(row.get(columns::RESPONSIBLE_EMAIL)) {
                if seen_emails.insert(email.clone()) {
                    let name = coerce::text(row.get(columns::RESPONSIBLE_NAME)).unwrap_or_default();
                    let role = coerce::text(row.get(columns::RESPONSIBLE_ROLE)).unwrap_or_default();
                    values.responsibles.push((name, email, role));
                }
            }
        }

        values
    }
}

/// Spreadsheet importer bound to one database
pub struct Importer {
    pool: SqlitePool,
}

impl Importer {
    /// Create new importer with database pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run both passes over `table`
    ///
    /// Catalog or transaction failures abort the run; row failures are
    /// counted in the report.
    pub async fn run(&self, table: &SourceTable) -> Result<ImportReport> {
        table.require_columns(&columns::REQUIRED)?;

        let mut report = ImportReport {
            rows_read: table.len(),
            ..Default::default()
        };

        info!("Inserting catalogs (projects, crews, responsibles)...");
        self.load_catalogs(table, &mut report).await?;
        info!("✓ Catalogs ready: {}", report.catalog_summary());

        let ids = self.catalog_ids().await?;

        info!("Inserting works and evidence...");
        self.load_facts(table, &ids, &mut report).await?;

        report.total_works = works::count_works(&self.pool).await?;
        info!("✓ Import finished: {}", report);

        Ok(report)
    }

    /// Catalog pass, committed as one transaction
    async fn load_catalogs(&self, table: &SourceTable, report: &mut ImportReport) -> Result<()> {
        let values = CatalogValues::collect(table);
        let mut tx = self.pool.begin().await?;

        for name in &values.projects {
            if catalogs::ensure_project(&mut *tx, name).await? {
                report.projects_created += 1;
            }
        }

        for name in &values.crews {
            if catalogs::ensure_crew(&mut *tx, name).await? {
                report.crews_created += 1;
            }
        }

        for (name, email, role) in &values.responsibles {
            if catalogs::ensure_responsible(&mut *tx, name, email, role).await? {
                report.responsibles_created += 1;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Name/email → id maps for the fact pass
    async fn catalog_ids(&self) -> Result<CatalogIds> {
        Ok(CatalogIds {
            projects: catalogs::named_ids(&self.pool, NamedCatalog::Projects).await?,
            crews: catalogs::named_ids(&self.pool, NamedCatalog::Crews).await?,
            responsibles: catalogs::responsible_ids(&self.pool).await?,
        })
    }

    /// Fact pass: one savepoint per row inside a single transaction
    async fn load_facts(
        &self,
        table: &SourceTable,
        ids: &CatalogIds,
        report: &mut ImportReport,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for (index, row) in table.rows().enumerate() {
            // Sheet line number, header is line 1
            let line = index + 2;

            let Some(external_id) = record::external_key(&row) else {
                warn!("Row {}: blank '{}', row rejected", line, columns::EXTERNAL_ID);
                report.rows_rejected += 1;
                continue;
            };

            let label = record::display_name(&row, &external_id);

            match Self::import_row(&mut tx, &row, &external_id, ids).await {
                Ok(RowOutcome::Inserted { evidence }) => {
                    info!("✓ Inserted work {} ({} evidence)", label, evidence);
                    report.works_inserted += 1;
                    report.evidence_inserted += evidence;
                }
                Ok(RowOutcome::Skipped) => {
                    info!("Work already exists, skipped: {}", external_id);
                    report.works_skipped += 1;
                }
                Err(e) => {
                    error!("✗ Failed to insert work {} (row {}): {}", label, line, e);
                    report.rows_failed += 1;
                }
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Skip a known key, otherwise map the row and insert it in isolation
    async fn import_row(
        tx: &mut Transaction<'_, Sqlite>,
        row: &SourceRow<'_>,
        external_id: &str,
        ids: &CatalogIds,
    ) -> Result<RowOutcome> {
        if works::work_exists(&mut **tx, external_id).await? {
            return Ok(RowOutcome::Skipped);
        }

        let record = WorkRecord::from_row(row, external_id.to_string(), ids)?;
        Self::insert_isolated(tx, &record).await
    }

    /// Insert one fact row inside a savepoint of `tx`
    ///
    /// On error the savepoint is rolled back and the outer transaction stays
    /// usable for the following rows.
    async fn insert_isolated(
        tx: &mut Transaction<'_, Sqlite>,
        record: &WorkRecord,
    ) -> Result<RowOutcome> {
        let mut savepoint = Acquire::begin(&mut **tx).await?;

        match Self::insert_record(&mut savepoint, record).await {
            Ok(evidence) => {
                savepoint.commit().await?;
                Ok(RowOutcome::Inserted { evidence })
            }
            Err(e) => {
                savepoint.rollback().await?;
                Err(e)
            }
        }
    }

    async fn insert_record(conn: &mut SqliteConnection, record: &WorkRecord) -> Result<usize> {
        works::insert_work(&mut *conn, &record.work).await?;

        for url in &record.evidence_urls {
            works::insert_evidence(&mut *conn, &record.work.id, url).await?;
        }

        Ok(record.evidence_urls.len())
    }
}

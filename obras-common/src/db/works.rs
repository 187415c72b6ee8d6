//! Work and evidence persistence

use sqlx::{Executor, Row, Sqlite};

use crate::db::models::{Evidence, Measurements, Work};
use crate::uuid_utils;
use crate::Result;

/// Check whether a work with this external identifier is already stored
pub async fn work_exists<'e, E>(executor: E, external_id: &str) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM works WHERE external_id = ?)")
        .bind(external_id)
        .fetch_one(executor)
        .await?;

    Ok(exists)
}

/// Insert a new work
///
/// Fails with a unique violation when `external_id` is already present.
pub async fn insert_work<'e, E>(executor: E, work: &Work) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let m = &work.measurements;

    sqlx::query(
        r#"
        INSERT INTO works (
            id, external_id, project_id, crew_id, responsible_id,
            phase, activity, work_type, name, status,
            start_date, end_date, coordinates, geometry,
            base_major_m, base_minor_m, height_m, length_m, silt_length_m,
            construction_volume_m3, storage_volume_m3, area_m2,
            notes
        )
        VALUES (
            ?, ?, ?, ?, ?,
            ?, ?, ?, ?, ?,
            ?, ?, ?, ?,
            ?, ?, ?, ?, ?,
            ?, ?, ?,
            ?
        )
        "#,
    )
    .bind(&work.id)
    .bind(&work.external_id)
    .bind(&work.project_id)
    .bind(&work.crew_id)
    .bind(&work.responsible_id)
    .bind(&work.phase)
    .bind(&work.activity)
    .bind(&work.work_type)
    .bind(&work.name)
    .bind(&work.status)
    .bind(work.start_date)
    .bind(work.end_date)
    .bind(&work.coordinates)
    .bind(&work.geometry)
    .bind(m.base_major_m)
    .bind(m.base_minor_m)
    .bind(m.height_m)
    .bind(m.length_m)
    .bind(m.silt_length_m)
    .bind(m.construction_volume_m3)
    .bind(m.storage_volume_m3)
    .bind(m.area_m2)
    .bind(&work.notes)
    .execute(executor)
    .await?;

    Ok(())
}

/// Attach an evidence URL to a work, returning the new evidence id
pub async fn insert_evidence<'e, E>(executor: E, work_id: &str, url: &str) -> Result<String>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = uuid_utils::generate_id();

    sqlx::query("INSERT INTO evidence (id, work_id, url) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(work_id)
        .bind(url)
        .execute(executor)
        .await?;

    Ok(id)
}

/// Total number of stored works
pub async fn count_works<'e, E>(executor: E) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM works")
        .fetch_one(executor)
        .await?;
    Ok(count)
}

/// Load a work by its external identifier
pub async fn load_work_by_external_id<'e, E>(executor: E, external_id: &str) -> Result<Option<Work>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(
        r#"
        SELECT id, external_id, project_id, crew_id, responsible_id,
               phase, activity, work_type, name, status,
               start_date, end_date, coordinates, geometry,
               base_major_m, base_minor_m, height_m, length_m, silt_length_m,
               construction_volume_m3, storage_volume_m3, area_m2,
               notes
        FROM works
        WHERE external_id = ?
        "#,
    )
    .bind(external_id)
    .fetch_optional(executor)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    Ok(Some(Work {
        id: row.try_get("id")?,
        external_id: row.try_get("external_id")?,
        project_id: row.try_get("project_id")?,
        crew_id: row.try_get("crew_id")?,
        responsible_id: row.try_get("responsible_id")?,
        phase: row.try_get("phase")?,
        activity: row.try_get("activity")?,
        work_type: row.try_get("work_type")?,
        name: row.try_get("name")?,
        status: row.try_get("status")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        coordinates: row.try_get("coordinates")?,
        geometry: row.try_get("geometry")?,
        measurements: Measurements {
            base_major_m: row.try_get("base_major_m")?,
            base_minor_m: row.try_get("base_minor_m")?,
            height_m: row.try_get("height_m")?,
            length_m: row.try_get("length_m")?,
            silt_length_m: row.try_get("silt_length_m")?,
            construction_volume_m3: row.try_get("construction_volume_m3")?,
            storage_volume_m3: row.try_get("storage_volume_m3")?,
            area_m2: row.try_get("area_m2")?,
        },
        notes: row.try_get("notes")?,
    }))
}

/// Evidence attached to a work, in insertion order
pub async fn list_evidence_for<'e, E>(executor: E, work_id: &str) -> Result<Vec<Evidence>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<(String, String, String)> =
        sqlx::query_as("SELECT id, work_id, url FROM evidence WHERE work_id = ? ORDER BY rowid")
            .bind(work_id)
            .fetch_all(executor)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(id, work_id, url)| Evidence { id, work_id, url })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::catalogs::{ensure_project, named_ids, NamedCatalog};
    use crate::db::init::init_database;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_insert_and_load_work() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        ensure_project(&pool, "Cuenca Alta").await.unwrap();
        let projects = named_ids(&pool, NamedCatalog::Projects).await.unwrap();

        let mut work = Work::new("OB-001");
        work.project_id = Some(projects["Cuenca Alta"].clone());
        work.work_type = Some("Presa de piedra".to_string());
        work.name = Some("Presa 1".to_string());
        work.start_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        work.measurements.length_m = Some(12.5);
        work.notes = "sin observaciones".to_string();

        insert_work(&pool, &work).await.unwrap();

        assert!(work_exists(&pool, "OB-001").await.unwrap());
        assert!(!work_exists(&pool, "OB-002").await.unwrap());

        let loaded = load_work_by_external_id(&pool, "OB-001")
            .await
            .unwrap()
            .expect("work should be stored");
        assert_eq!(loaded, work);
        assert_eq!(count_works(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_external_id_rejected() {
        let pool = init_database("sqlite::memory:").await.unwrap();

        insert_work(&pool, &Work::new("7")).await.unwrap();
        let result = insert_work(&pool, &Work::new("7")).await;

        assert!(result.is_err());
        assert_eq!(count_works(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_evidence_attached_to_work() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        let work = Work::new("9");
        insert_work(&pool, &work).await.unwrap();

        insert_evidence(&pool, &work.id, "https://photos.example.org/a.jpg").await.unwrap();
        insert_evidence(&pool, &work.id, "https://photos.example.org/b.jpg").await.unwrap();

        let evidence = list_evidence_for(&pool, &work.id).await.unwrap();
        assert_eq!(evidence.len(), 2);
        assert_eq!(evidence[0].url, "https://photos.example.org/a.jpg");
        assert!(evidence.iter().all(|e| e.work_id == work.id));
    }
}

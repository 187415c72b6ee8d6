//! Grouped work counts
//!
//! Works are joined to their project (or crew), grouped by
//! (group name, work type) and counted. Rows come ordered by group name,
//! then count descending, then work type. Works without a project (or crew)
//! are left out of that grouping.

use serde::Serialize;
use sqlx::{Executor, Sqlite};

const BY_PROJECT_SQL: &str = r#"
    SELECT p.name, w.work_type, COUNT(w.id) AS total_works
    FROM works w
    JOIN projects p ON p.id = w.project_id
    GROUP BY p.name, w.work_type
    ORDER BY p.name ASC, total_works DESC, w.work_type ASC
"#;

const BY_CREW_SQL: &str = r#"
    SELECT c.name, w.work_type, COUNT(w.id) AS total_works
    FROM works w
    JOIN crews c ON c.id = w.crew_id
    GROUP BY c.name, w.work_type
    ORDER BY c.name ASC, total_works DESC, w.work_type ASC
"#;

/// Catalog the works are grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Project,
    Crew,
}

impl GroupBy {
    fn sql(self) -> &'static str {
        match self {
            GroupBy::Project => BY_PROJECT_SQL,
            GroupBy::Crew => BY_CREW_SQL,
        }
    }
}

/// One (group, work type) bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    /// Project or crew name
    pub group: String,
    /// `None` for works imported without a type
    pub work_type: Option<String>,
    pub total_works: i64,
}

/// Count works per (group, work type)
pub async fn works_by<'e, E>(executor: E, group_by: GroupBy) -> Result<Vec<SummaryRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<(String, Option<String>, i64)> = sqlx::query_as(group_by.sql())
        .fetch_all(executor)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(group, work_type, total_works)| SummaryRow {
            group,
            work_type,
            total_works,
        })
        .collect())
}

/// Works per project and work type
pub async fn works_by_project<'e, E>(executor: E) -> Result<Vec<SummaryRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    works_by(executor, GroupBy::Project).await
}

/// Works per crew and work type
pub async fn works_by_crew<'e, E>(executor: E) -> Result<Vec<SummaryRow>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    works_by(executor, GroupBy::Crew).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use obras_common::db::catalogs::{ensure_crew, ensure_project, named_ids, NamedCatalog};
    use obras_common::db::works::insert_work;
    use obras_common::db::{init_database, Work};
    use sqlx::SqlitePool;
    use std::collections::HashMap;

    /// (key, project, crew, work type)
    const WORKS: [(&str, Option<&str>, Option<&str>, Option<&str>); 7] = [
        ("1", Some("Norte"), Some("C1"), Some("Zanja")),
        ("2", Some("Norte"), Some("C1"), Some("Presa")),
        ("3", Some("Norte"), Some("C2"), Some("Presa")),
        ("4", Some("Sur"), Some("C2"), Some("Bordo")),
        ("5", Some("Sur"), None, Some("Zanja")),
        ("6", None, Some("C1"), Some("Zanja")),
        ("7", Some("Sur"), Some("C2"), None),
    ];

    async fn seeded_pool() -> SqlitePool {
        let pool = init_database("sqlite::memory:").await.unwrap();
        for name in ["Norte", "Sur"] {
            ensure_project(&pool, name).await.unwrap();
        }
        for name in ["C1", "C2"] {
            ensure_crew(&pool, name).await.unwrap();
        }

        let projects = named_ids(&pool, NamedCatalog::Projects).await.unwrap();
        let crews = named_ids(&pool, NamedCatalog::Crews).await.unwrap();

        for (key, project, crew, work_type) in WORKS {
            let mut work = Work::new(key);
            work.project_id = project.map(|p| projects[p].clone());
            work.crew_id = crew.map(|c| crews[c].clone());
            work.work_type = work_type.map(str::to_string);
            insert_work(&pool, &work).await.unwrap();
        }

        pool
    }

    fn bucket(group: &str, work_type: Option<&str>, total_works: i64) -> SummaryRow {
        SummaryRow {
            group: group.to_string(),
            work_type: work_type.map(str::to_string),
            total_works,
        }
    }

    #[tokio::test]
    async fn test_works_by_project_ordering() {
        let pool = seeded_pool().await;

        let rows = works_by_project(&pool).await.unwrap();

        assert_eq!(
            rows,
            vec![
                bucket("Norte", Some("Presa"), 2),
                bucket("Norte", Some("Zanja"), 1),
                bucket("Sur", None, 1),
                bucket("Sur", Some("Bordo"), 1),
                bucket("Sur", Some("Zanja"), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_works_by_crew_skips_works_without_crew() {
        let pool = seeded_pool().await;

        let rows = works_by_crew(&pool).await.unwrap();
        let total: i64 = rows.iter().map(|r| r.total_works).sum();

        // Work 5 has no crew
        assert_eq!(total, 6);
        assert_eq!(rows[0], bucket("C1", Some("Zanja"), 2));
    }

    #[tokio::test]
    async fn test_project_buckets_sum_to_project_totals() {
        let pool = seeded_pool().await;

        let mut summed: HashMap<String, i64> = HashMap::new();
        for row in works_by_project(&pool).await.unwrap() {
            *summed.entry(row.group).or_default() += row.total_works;
        }

        let totals: Vec<(String, i64)> = sqlx::query_as(
            "SELECT p.name, COUNT(*) FROM works w JOIN projects p ON p.id = w.project_id GROUP BY p.name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(totals.len(), summed.len());
        for (name, count) in totals {
            assert_eq!(summed[&name], count, "bucket sum for {}", name);
        }
    }

    #[tokio::test]
    async fn test_empty_database_yields_no_rows() {
        let pool = init_database("sqlite::memory:").await.unwrap();
        assert!(works_by(&pool, GroupBy::Project).await.unwrap().is_empty());
        assert!(works_by(&pool, GroupBy::Crew).await.unwrap().is_empty());
    }
}

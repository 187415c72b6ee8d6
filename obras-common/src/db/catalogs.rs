//! Catalog persistence (projects, crews, responsibles)
//!
//! Catalog rows are created on first sight and never updated. Every
//! function takes an explicit executor so callers decide the transaction.

use std::collections::HashMap;

use sqlx::{Executor, Sqlite};

use crate::db::models::{Crew, Project, Responsible};
use crate::uuid_utils;
use crate::Result;

/// Catalog table keyed by a unique `name` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedCatalog {
    Projects,
    Crews,
}

impl NamedCatalog {
    fn table(self) -> &'static str {
        match self {
            NamedCatalog::Projects => "projects",
            NamedCatalog::Crews => "crews",
        }
    }
}

/// Insert `name` into the catalog unless it is already present
///
/// Matching is exact and case-sensitive; callers trim beforehand.
/// Returns `true` when a new row was created.
pub async fn ensure_named<'e, E>(executor: E, catalog: NamedCatalog, name: &str) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "INSERT INTO {} (id, name) VALUES (?, ?) ON CONFLICT(name) DO NOTHING",
        catalog.table()
    );

    let result = sqlx::query(&sql)
        .bind(uuid_utils::generate_id())
        .bind(name)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Ensure a project exists
pub async fn ensure_project<'e, E>(executor: E, name: &str) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    ensure_named(executor, NamedCatalog::Projects, name).await
}

/// Ensure a crew exists
pub async fn ensure_crew<'e, E>(executor: E, name: &str) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    ensure_named(executor, NamedCatalog::Crews, name).await
}

/// Ensure a responsible person exists, keyed by email
///
/// An existing row keeps its original name and role.
pub async fn ensure_responsible<'e, E>(executor: E, name: &str, email: &str, role: &str) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO responsibles (id, name, email, role)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(email) DO NOTHING
        "#,
    )
    .bind(uuid_utils::generate_id())
    .bind(name)
    .bind(email)
    .bind(role)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Name → id map for a named catalog
pub async fn named_ids<'e, E>(executor: E, catalog: NamedCatalog) -> Result<HashMap<String, String>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT name, id FROM {}", catalog.table());
    let rows: Vec<(String, String)> = sqlx::query_as(&sql).fetch_all(executor).await?;
    Ok(rows.into_iter().collect())
}

/// Email → id map for responsibles
pub async fn responsible_ids<'e, E>(executor: E) -> Result<HashMap<String, String>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<(String, String)> = sqlx::query_as("SELECT email, id FROM responsibles")
        .fetch_all(executor)
        .await?;
    Ok(rows.into_iter().collect())
}

/// All projects ordered by name
pub async fn list_projects<'e, E>(executor: E) -> Result<Vec<Project>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<(String, String)> = sqlx::query_as("SELECT id, name FROM projects ORDER BY name")
        .fetch_all(executor)
        .await?;
    Ok(rows.into_iter().map(|(id, name)| Project { id, name }).collect())
}

/// All crews ordered by name
pub async fn list_crews<'e, E>(executor: E) -> Result<Vec<Crew>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<(String, String)> = sqlx::query_as("SELECT id, name FROM crews ORDER BY name")
        .fetch_all(executor)
        .await?;
    Ok(rows.into_iter().map(|(id, name)| Crew { id, name }).collect())
}

/// All responsibles ordered by email
pub async fn list_responsibles<'e, E>(executor: E) -> Result<Vec<Responsible>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<(String, String, String, String)> =
        sqlx::query_as("SELECT id, name, email, role FROM responsibles ORDER BY email")
            .fetch_all(executor)
            .await?;
    Ok(rows
        .into_iter()
        .map(|(id, name, email, role)| Responsible { id, name, email, role })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_database;

    #[tokio::test]
    async fn test_ensure_project_creates_once() {
        let pool = init_database("sqlite::memory:").await.unwrap();

        assert!(ensure_project(&pool, "Canal Norte").await.unwrap());
        assert!(!ensure_project(&pool, "Canal Norte").await.unwrap());
        // Case-sensitive
        assert!(ensure_project(&pool, "canal norte").await.unwrap());

        let projects = list_projects(&pool).await.unwrap();
        assert_eq!(projects.len(), 2);
    }

    #[tokio::test]
    async fn test_crews_and_projects_are_separate_catalogs() {
        let pool = init_database("sqlite::memory:").await.unwrap();

        assert!(ensure_project(&pool, "A").await.unwrap());
        assert!(ensure_crew(&pool, "A").await.unwrap());

        let projects = named_ids(&pool, NamedCatalog::Projects).await.unwrap();
        let crews = named_ids(&pool, NamedCatalog::Crews).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(crews.len(), 1);
        assert_ne!(projects["A"], crews["A"]);
    }

    #[tokio::test]
    async fn test_responsible_keeps_first_name_and_role() {
        let pool = init_database("sqlite::memory:").await.unwrap();

        assert!(ensure_responsible(&pool, "Ana", "ana@example.org", "Técnica").await.unwrap());
        assert!(!ensure_responsible(&pool, "Ana María", "ana@example.org", "Jefa").await.unwrap());

        let responsibles = list_responsibles(&pool).await.unwrap();
        assert_eq!(responsibles.len(), 1);
        assert_eq!(responsibles[0].name, "Ana");
        assert_eq!(responsibles[0].role, "Técnica");

        let ids = responsible_ids(&pool).await.unwrap();
        assert_eq!(ids["ana@example.org"], responsibles[0].id);
    }
}

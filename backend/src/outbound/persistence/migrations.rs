//! Embedded schema migrations.
//!
//! Migrations are compiled into the binary from `backend/migrations` and run
//! over a blocking `PgConnection` on the Tokio blocking pool, since
//! `diesel_migrations` has no async harness.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::RepositoryError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn run_blocking(database_url: &str) -> Result<usize, RepositoryError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| RepositoryError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| RepositoryError::query(format!("run migrations: {err}")))?;
    Ok(applied.len())
}

/// Apply every pending migration to the database at `database_url`.
///
/// Returns the number of migrations applied.
pub async fn run_migrations(database_url: &str) -> Result<usize, RepositoryError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_blocking(&url))
        .await
        .map_err(|err| RepositoryError::query(format!("migration task failed: {err}")))??;
    info!(applied, "database migrations applied");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    //! Foreign-key actions in the schema migration.

    use rstest::rstest;

    const SCHEMA: &str =
        include_str!("../../../migrations/2030-01-01-000000_create_bistro_schema/up.sql");

    fn references(target: &str) -> Vec<&'static str> {
        let needle = format!("REFERENCES {target} (id)");
        SCHEMA.lines().filter(|line| line.contains(&needle)).collect()
    }

    #[rstest]
    #[case("sections")]
    #[case("dining_tables")]
    fn restaurant_children_link_without_immediate_restrict(#[case] target: &str) {
        let lines = references(target);
        assert!(!lines.is_empty(), "no references to {target}");
        for line in lines {
            assert!(line.contains("ON DELETE NO ACTION"), "{line}");
        }
    }

    #[rstest]
    fn restaurant_children_cascade_from_restaurants() {
        let lines = references("restaurants");
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|line| line.contains("ON DELETE CASCADE")));
    }
}

//! Database migrations infrastructure

use sqlx::postgres::PgPool;

use crate::domain::DomainError;

/// PostgreSQL migrator tracking applied versions in a `_migrations` table
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                success BOOLEAN NOT NULL DEFAULT TRUE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    /// Runs a single migration
    pub async fn run_migration(&self, migration: &Migration) -> Result<(), DomainError> {
        self.ensure_migrations_table().await?;

        // Check if already applied
        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
                .bind(migration.version)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::storage(format!("Failed to check migration status: {}", e))
                })?;

        if applied {
            return Ok(());
        }

        // Run the migration
        sqlx::query(&migration.up)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        // Record the migration
        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        Ok(())
    }
}

/// Represents a database migration
///
/// This crate only migrates forward; there is no revert path.
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version
    pub version: i64,
    /// Human-readable description
    pub description: String,
    /// SQL to run when applying the migration
    pub up: String,
}

impl Migration {
    pub fn new(version: i64, description: impl Into<String>, up: impl Into<String>) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
        }
    }
}

/// The access-control schema, in dependency order.
///
/// Foreign keys deliberately carry no ON DELETE CASCADE: the deletion
/// pipeline removes dependents explicitly in the correct order, so the
/// cascade semantics stay application-enforced and deterministic.
pub fn schema_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create organizations table",
            r#"
            CREATE TABLE IF NOT EXISTS organizations (
                id VARCHAR(128) PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                description TEXT NOT NULL DEFAULT ''
            );
            "#,
        ),
        Migration::new(
            2,
            "Create users table",
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                org_id VARCHAR(128) NOT NULL REFERENCES organizations(id)
            );
            CREATE INDEX IF NOT EXISTS idx_users_org_id ON users(org_id);
            "#,
        ),
        Migration::new(
            3,
            "Create teams table",
            r#"
            CREATE TABLE IF NOT EXISTS teams (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                org_id VARCHAR(128) NOT NULL REFERENCES organizations(id)
            );
            CREATE INDEX IF NOT EXISTS idx_teams_org_id ON teams(org_id);
            "#,
        ),
        Migration::new(
            4,
            "Create policies table",
            r#"
            CREATE TABLE IF NOT EXISTS policies (
                id BIGSERIAL PRIMARY KEY,
                version VARCHAR(20) NOT NULL,
                name VARCHAR(64) NOT NULL,
                org_id VARCHAR(128) NOT NULL REFERENCES organizations(id),
                statements JSONB NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_policies_org_id ON policies(org_id);
            "#,
        ),
        Migration::new(
            5,
            "Create team_members table",
            r#"
            CREATE TABLE IF NOT EXISTS team_members (
                team_id BIGINT NOT NULL REFERENCES teams(id),
                user_id BIGINT NOT NULL REFERENCES users(id),
                PRIMARY KEY (team_id, user_id)
            );
            "#,
        ),
        Migration::new(
            6,
            "Create user_policies table",
            r#"
            CREATE TABLE IF NOT EXISTS user_policies (
                user_id BIGINT NOT NULL REFERENCES users(id),
                policy_id BIGINT NOT NULL REFERENCES policies(id),
                PRIMARY KEY (user_id, policy_id)
            );
            "#,
        ),
        Migration::new(
            7,
            "Create team_policies table",
            r#"
            CREATE TABLE IF NOT EXISTS team_policies (
                team_id BIGINT NOT NULL REFERENCES teams(id),
                policy_id BIGINT NOT NULL REFERENCES policies(id),
                PRIMARY KEY (team_id, policy_id)
            );
            "#,
        ),
    ]
}

/// Runs all pending schema migrations
pub async fn run_schema_migrations(pool: &PgPool) -> Result<(), DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());

    for migration in schema_migrations() {
        migrator.run_migration(&migration).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_creation() {
        let migration = Migration::new(1, "Test migration", "CREATE TABLE test");

        assert_eq!(migration.version, 1);
        assert_eq!(migration.description, "Test migration");
        assert_eq!(migration.up, "CREATE TABLE test");
    }

    #[test]
    fn test_schema_migrations_order() {
        let migrations = schema_migrations();

        assert!(!migrations.is_empty());

        for i in 1..migrations.len() {
            assert!(
                migrations[i].version > migrations[i - 1].version,
                "Migrations should be in ascending order"
            );
        }
    }

    #[test]
    fn test_schema_covers_all_tables() {
        let migrations = schema_migrations();
        let combined: String = migrations.iter().map(|m| m.up.as_str()).collect();

        for table in [
            "organizations",
            "users",
            "teams",
            "policies",
            "team_members",
            "user_policies",
            "team_policies",
        ] {
            assert!(combined.contains(table), "missing table {}", table);
        }
    }

    #[test]
    fn test_schema_has_no_cascade_rules() {
        for migration in schema_migrations() {
            assert!(!migration.up.to_uppercase().contains("ON DELETE CASCADE"));
        }
    }
}

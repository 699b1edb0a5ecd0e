use anyhow::Context;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
    PgPool,
};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Config;
use crate::schema::{SchemaDescriptor, NOTES_SCHEMA};

#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let database_url = config
            .database_url
            .as_deref()
            .context("DATABASE_URL is not set")?;

        let mut connect_options = PgConnectOptions::from_str(database_url)?;
        if config.deployment_mode.requires_tls() {
            connect_options = connect_options.ssl_mode(PgSslMode::Require);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .connect_with(connect_options)
            .await
            .context("Failed to connect to database")?;

        Ok(Database { pool })
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        self.apply_schema(&NOTES_SCHEMA).await
    }

    /// Replays every step of `schema`. Each step runs in its own transaction
    /// and the first failure aborts the whole run.
    pub async fn apply_schema(&self, schema: &SchemaDescriptor) -> anyhow::Result<()> {
        for migration in schema.migrations {
            tracing::info!(
                "Running migration {} ({}) on {}",
                migration.version,
                migration.name,
                schema.table
            );

            let mut tx = self.pool.begin().await?;
            for statement in migration.statements() {
                sqlx::query(&statement)
                    .execute(&mut *tx)
                    .await
                    .with_context(|| {
                        format!(
                            "Migration {} ({}) failed on statement: {}",
                            migration.version, migration.name, statement
                        )
                    })?;
            }
            tx.commit().await?;
        }

        tracing::info!(
            "Schema for {} is at version {}",
            schema.table,
            schema.version()
        );
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

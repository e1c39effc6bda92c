use crate::config::DatabaseConfig;
use crate::errors::ServerError;
use crate::queries::{parse_user, Queries};
use crate::store::UserStore;
use async_trait::async_trait;
use roster_core::models::User;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub struct ServerDatabase {
    pub pool: PgPool,
}

impl ServerDatabase {
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Open the pool and make sure the `users` table exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, ServerError> {
        let db = Self::new(
            &config.url,
            config.max_connections,
            Duration::from_secs(config.acquire_timeout_secs),
        )
        .await?;
        db.ensure_schema().await?;

        tracing::info!(
            max_connections = config.max_connections,
            "Database ready"
        );
        Ok(db)
    }

    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(Queries::CREATE_USERS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for ServerDatabase {
    async fn insert_user(&self, user: &User) -> Result<(), ServerError> {
        sqlx::query(Queries::INSERT_USER)
            .bind(&user.username)
            .bind(&user.email)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, ServerError> {
        let rows = sqlx::query(Queries::LIST_USERS)
            .fetch_all(&self.pool)
            .await?;

        let users = rows
            .iter()
            .map(parse_user)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }
}

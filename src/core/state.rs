//! Server State

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::models::User;
use crate::db::{DbService, repository::user};
use crate::services::ImageStore;
use crate::utils::AppError;

/// Shared application state - one instance cloned into every handler
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | Immutable configuration |
/// | pool | SqlitePool | SQLite connection pool |
/// | jwt_service | Arc<JwtService> | Token issuance/validation |
/// | images | ImageStore | Recipe image persistence |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub images: ImageStore,
}

impl ServerState {
    /// Open the database, run migrations, seed the bootstrap superuser
    /// and assemble the shared state
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db = DbService::new(&config.database_path).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let images = ImageStore::new(config.work_dir.clone());

        let state = Self {
            config: config.clone(),
            pool: db.pool,
            jwt_service,
            images,
        };

        state.bootstrap_superuser().await?;

        Ok(state)
    }

    /// Create the configured superuser if it does not exist yet
    async fn bootstrap_superuser(&self) -> Result<(), AppError> {
        let (Some(email), Some(password)) =
            (&self.config.admin_email, &self.config.admin_password)
        else {
            return Ok(());
        };

        let email = email.to_lowercase();
        if user::find_by_email(&self.pool, &email)
            .await
            .map_err(AppError::from)?
            .is_some()
        {
            return Ok(());
        }

        let hash = User::hash_password(password)
            .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;
        user::create_superuser(&self.pool, &email, &hash)
            .await
            .map_err(AppError::from)?;
        tracing::info!(email = %email, "Bootstrap superuser created");
        Ok(())
    }
}

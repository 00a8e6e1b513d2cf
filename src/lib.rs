//! Account Service
//!
//! User account management over two stores:
//! - A record store (in-memory or PostgreSQL) holding user documents
//! - An artifact store holding one free-text file per user
//!
//! Passwords are hashed with Argon2id; login issues an opaque token.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::{AccountServiceTrait, AppState};
use infrastructure::{
    artifact::FileArtifactStore,
    storage::{connect_pool, PostgresConfig, StorageType},
    user::{AccountService, Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, TokenIssuer},
};
use tracing::info;

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_backend = StorageType::from_str(&config.storage.backend).ok_or_else(|| {
        anyhow::anyhow!("Unknown storage backend: {}", config.storage.backend)
    })?;

    info!("Storage backend: {:?}", storage_backend);

    let artifacts = Arc::new(FileArtifactStore::open(&config.artifacts.directory).await?);
    info!("Artifact directory: {}", artifacts.root().display());

    let hasher = Arc::new(Argon2Hasher::with_params(
        config.security.argon2_memory_kib,
        config.security.argon2_iterations,
        config.security.argon2_parallelism,
    )?);
    let tokens = TokenIssuer::new();

    let account_service: Arc<dyn AccountServiceTrait> = match storage_backend {
        StorageType::InMemory => {
            info!("Using in-memory record store");
            Arc::new(AccountService::new(
                Arc::new(InMemoryUserRepository::new()),
                artifacts,
                hasher,
                tokens,
            ))
        }
        StorageType::Postgres => {
            let repository = create_postgres_repository(config).await?;
            Arc::new(AccountService::new(
                Arc::new(repository),
                artifacts,
                hasher,
                tokens,
            ))
        }
    };

    Ok(AppState::new(account_service, config.request.timeout()))
}

/// Connect to PostgreSQL and make sure the users table exists
pub async fn create_postgres_repository(
    config: &AppConfig,
) -> anyhow::Result<PostgresUserRepository> {
    let database_url = config.storage.resolve_database_url().ok_or_else(|| {
        anyhow::anyhow!("storage.database_url or DATABASE_URL is required for postgres")
    })?;

    info!("Connecting to PostgreSQL...");
    let pool = connect_pool(
        &PostgresConfig::new(database_url)
            .with_max_connections(config.storage.max_connections)
            .with_connect_timeout(config.storage.connect_timeout_secs),
    )
    .await?;
    info!("PostgreSQL connection established");

    let repository = PostgresUserRepository::new(pool);
    repository.ensure_table().await?;

    Ok(repository)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.artifacts.directory = dir.path().join("users").display().to_string();
        config.security.argon2_memory_kib = 1024;
        config.security.argon2_iterations = 1;

        let state = create_app_state_with_config(&config).await.unwrap();

        assert!(dir.path().join("users").is_dir());
        assert_eq!(state.request_timeout, config.request.timeout());
    }

    #[tokio::test]
    async fn test_login_tokens_ignore_length_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let mut config: AppConfig = ::config::Config::builder()
            .set_override("security.token_length", 0)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        config.artifacts.directory = dir.path().display().to_string();
        config.security.argon2_memory_kib = 1024;
        config.security.argon2_iterations = 1;

        let state = create_app_state_with_config(&config).await.unwrap();
        let ctx = domain::RequestContext::with_timeout(config.request.timeout());

        let id = state
            .account_service
            .create_user(&ctx, r#"{"name":"Ann","password":"pw"}"#)
            .await
            .unwrap();
        let token = state
            .account_service
            .login(&ctx, &id.to_string(), "pw")
            .await
            .unwrap();

        assert_eq!(token.len(), 32);
    }

    #[tokio::test]
    async fn test_unknown_backend_is_rejected() {
        let mut config = AppConfig::default();
        config.storage.backend = "mongo".to_string();

        assert!(create_app_state_with_config(&config).await.is_err());
    }
}

use deadpool_postgres::{
    BuildError, Manager, ManagerConfig, Pool, PoolError, RecyclingMethod, Runtime,
};
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::{NoTls, config::SslMode};

use super::embedded::migrations;
use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("invalid database connection string: {0}")]
    InvalidDsn(#[source] tokio_postgres::Error),

    #[error("failed to set up TLS for database connections: {0}")]
    Tls(#[from] native_tls::Error),

    #[error("failed to build connection pool: {0}")]
    Build(#[from] BuildError),

    #[error("failed to acquire database connection: {0}")]
    Pool(#[from] PoolError),

    #[error("failed to migrate database: {0}")]
    Migration(#[from] refinery::Error),
}

/// Builds the process-wide connection pool. Connections are opened lazily, on
/// first checkout.
pub fn connect(cfg: &Config) -> Result<Pool, ConnectError> {
    let pg_config: tokio_postgres::Config = cfg
        .database_url
        .parse()
        .map_err(ConnectError::InvalidDsn)?;

    tracing::info!(
        "Configuring database pool for '{}' (sslmode {:?}, max size {}, timeout {:?})",
        pg_config.get_dbname().unwrap_or("<default>"),
        pg_config.get_ssl_mode(),
        cfg.pool_max_size,
        cfg.pool_timeout,
    );

    let manager_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };

    let manager = match pg_config.get_ssl_mode() {
        SslMode::Disable => Manager::from_config(pg_config, NoTls, manager_config),
        _ => {
            let connector = native_tls::TlsConnector::builder().build()?;
            Manager::from_config(pg_config, MakeTlsConnector::new(connector), manager_config)
        }
    };

    let pool = Pool::builder(manager)
        .max_size(cfg.pool_max_size)
        .wait_timeout(Some(cfg.pool_timeout))
        .create_timeout(Some(cfg.pool_timeout))
        .runtime(Runtime::Tokio1)
        .build()?;

    Ok(pool)
}

pub async fn migrate(pool: &Pool) -> Result<(), ConnectError> {
    let mut client = pool.get().await?;
    let migrations_report = migrations::runner().run_async(&mut **client).await?;

    for migration in migrations_report.applied_migrations() {
        tracing::info!(
            "Migration Applied -  Name: {}, Version: {}",
            migration.name(),
            migration.version()
        );
    }

    tracing::info!("DB migrations finished!");

    Ok(())
}

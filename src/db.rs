// todoweb/src/db.rs
use std::sync::Arc;

use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{error, info};
use rocket::fairing::AdHoc;

use crate::config::Storage;
use crate::store::{MemoryRepository, PostgresRepository, SharedRepository};

// an R2D2 connection pool
pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Initialize the database pool. `build` checks out a first connection, so an
/// unreachable server fails here rather than on the first request.
pub fn init_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().build(manager)?;
    Ok(pool)
}

pub fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("failed to run migrations: {}", e))?;
    for version in applied {
        info!("applied migration {}", version);
    }
    Ok(())
}

/// Builds the repository selected by `storage`.
pub fn connect(storage: &Storage) -> anyhow::Result<SharedRepository> {
    match storage {
        Storage::Memory => Ok(Arc::new(MemoryRepository::new())),
        Storage::Postgres { url } => {
            let pool = init_pool(url)?;
            run_migrations(&pool)?;
            Ok(Arc::new(PostgresRepository::new(pool)))
        }
    }
}

// Fairing attaching the repository to Rocket's managed state. Failing to
// connect aborts ignition, and with it the launch.
pub fn stage(storage: Storage) -> AdHoc {
    AdHoc::try_on_ignite("Task Repository", |rocket| async move {
        let label = storage.label();
        let connected = rocket::tokio::task::spawn_blocking(move || connect(&storage)).await;
        match connected {
            Ok(Ok(repository)) => {
                info!("{} storage is ready", label);
                Ok(rocket.manage(repository))
            }
            Ok(Err(e)) => {
                error!("error connecting to {} storage: {:#}", label, e);
                Err(rocket)
            }
            Err(e) => {
                error!("storage initialisation task failed: {}", e);
                Err(rocket)
            }
        }
    })
}

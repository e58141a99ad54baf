use std::sync::Arc;

use redis::aio::ConnectionManager;

use crate::{
    catalog::{Catalog, LoadError},
    config::Config,
    database::init_redis,
};

/// Shared, read-only application state. The catalog is built exactly once
/// here, before the server binds its listener; nothing mutates it afterwards.
/// A future catalog reload would build a new `AppState` and swap the `Arc`,
/// never write into this one.
pub struct AppState {
    pub catalog: Catalog,
    pub config: Config,
    pub redis_connection: ConnectionManager,
}

impl AppState {
    pub async fn new() -> Result<Arc<Self>, LoadError> {
        let config = Config::load();

        let catalog = Catalog::load(&config.catalog_path)?;
        let redis_connection = init_redis(&config.redis_url).await;

        Ok(Arc::new(Self {
            catalog,
            config,
            redis_connection,
        }))
    }
}

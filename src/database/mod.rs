pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod query;
pub mod store;

use std::sync::Arc;

use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemorySchoolStore;
pub use models::{NewSchool, School};
pub use postgres::PgSchoolStore;
pub use query::{FacetCount, Facets, SchoolQuery};
pub use store::SchoolStore;

/// Open the configured backend and make sure its schema exists
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn SchoolStore>, DatabaseError> {
    let store: Arc<dyn SchoolStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemorySchoolStore::new()),
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(config).await?;
            Arc::new(PgSchoolStore::new(pool))
        }
    };
    store.ensure_schema().await?;
    info!("Using {} school store", store.backend());
    Ok(store)
}

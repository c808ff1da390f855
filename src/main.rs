use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use shopdesk_api::config::ApiConfig;
use shopdesk_core::store::AppointmentStore;
use shopdesk_db::{
    InMemoryAppointmentStore, PgAppointmentStore, create_pool, schema::initialize_database,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    shopdesk_api::init_tracing(config.log_level)?;

    let store: Arc<dyn AppointmentStore> = match &config.database_url {
        Some(database_url) => {
            let db_pool = create_pool(database_url).await?;
            initialize_database(&db_pool).await?;
            info!("Using PostgreSQL appointment store");
            Arc::new(PgAppointmentStore::new(db_pool))
        }
        None => {
            warn!("DATABASE_URL is not set, appointments will be kept in memory only");
            Arc::new(InMemoryAppointmentStore::new())
        }
    };

    // Start API server
    shopdesk_api::start_server(config, store).await?;

    Ok(())
}

use casfos_api::setup;
use casfos_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load .env for local development before reading configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Initialize the application (tracing, database, storage, services, routes)
    let (_state, router) = setup::initialize_app(config.clone()).await?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}

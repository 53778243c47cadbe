//! users-service binary

use users_service::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    init_tracing(&config)?;

    tracing::info!(
        base_path = %config.api.normalized_base_path(),
        "Starting users service"
    );

    let state = AppState::new(config.clone());
    let app = router(state);

    Server::new(config).serve(app).await?;

    Ok(())
}

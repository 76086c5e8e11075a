use recipe_server::{Config, Server, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, work dir, logging)
    setup_environment()?;

    tracing::info!("Recipe server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. HTTP server (state is initialized inside run)
    let server = Server::new(config);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

use anyhow::Context;
use connections::{AppState, Config, logging, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let config = Config::from_env()?;
    let app_state = AppState::open(&config)
        .await
        .with_context(|| format!("opening data files in {}", config.data_dir.display()))?;

    let app = router(app_state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    brewtab_observability::init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| {
        tracing::warn!("BIND_ADDR not set; defaulting to 0.0.0.0:8080");
        "0.0.0.0:8080".to_string()
    });

    let services = Arc::new(brewtab_api::app::services::build_services());
    let app = brewtab_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

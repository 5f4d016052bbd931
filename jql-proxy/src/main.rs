use jql_proxy::config::ProxyConfig;
use jql_proxy::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ProxyConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("jql-proxy", "info", config.otlp_endpoint.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    if config.common.is_production() {
        // The platform imports the application through `jql_proxy::hosted::HostedApp`.
        tracing::info!(
            environment = %config.common.environment,
            "Hosted mode: direct port listening is disabled"
        );
        return Ok(());
    }

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await?;

    Ok(())
}

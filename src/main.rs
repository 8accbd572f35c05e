use anyhow::Result;
use forecast_widget::{WidgetConfig, WidgetService};
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forecast_widget=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = WidgetConfig::from_env()?;
    tracing::info!(
        "Starting forecast widget server (endpoint: {}, theme: {:?}, slots: {:?})",
        config.endpoint,
        config.theme,
        config.slot_policy
    );

    let widget = WidgetService::new(config)?;
    let server = widget.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

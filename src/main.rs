//src/main.rs

use elettrogest::{AppConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logger: RUST_LOG manda; sem ele, nível info.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = AppConfig::from_env()?;
    let app_state = AppState::new(&config).await?;

    if config.seed_on_start {
        app_state.seed().await?;
    }

    let summary = app_state.dashboard_service.get_summary().await?;
    tracing::info!(
        prodotti = summary.product_count,
        preventivi_attivi = summary.active_quotes,
        fornitori = summary.supplier_count,
        valore_magazzino = %summary.warehouse_value_display,
        "🚀 Magazzino pronto"
    );

    Ok(())
}

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medreport_api_rest::{AppState, router};
use medreport_core::CoreConfig;

/// Main entry point for the MedReport application
///
/// Resolves configuration once, then serves the REST API (landing, form, report and
/// Swagger UI) backed by the file record store.
///
/// # Environment Variables
/// - `MEDREPORT_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `MEDREPORT_DATA_DIR`: Directory for submitted records (default: "medreport_data")
/// - `MEDREPORT_STORAGE_KEY`: Key the form writes and the report reads (default: "patientData")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medreport=info".parse()?)
                .add_directive("medreport_core=info".parse()?)
                .add_directive("medreport_api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("MEDREPORT_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = Arc::new(CoreConfig::from_env_values(
        std::env::var("MEDREPORT_DATA_DIR").ok(),
        std::env::var("MEDREPORT_STORAGE_KEY").ok(),
    )?);

    tracing::info!("++ Starting MedReport REST on {}", rest_addr);
    tracing::info!(
        "++ Records stored in {} under key {}",
        cfg.data_dir().display(),
        cfg.storage_key()
    );

    let store = Arc::new(cfg.file_store());
    let app = router(AppState::new(cfg, store));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

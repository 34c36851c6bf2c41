#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use axum::{routing::post, Extension, Router};
    use fondant_mixer::{config::AppConfig, db, logger, state::AppState};
    use tower::ServiceBuilder;
    use tower_http::trace::TraceLayer;

    // Load env vars
    let config = AppConfig::from_env().context("invalid configuration")?;
    logger::init_logger(config.log_format);

    // Initialize database
    let db = db::create_pool(&config.database_url)
        .await
        .with_context(|| format!("failed to open {}", config.database_url))?;
    db::run_migrations(&db)
        .await
        .context("failed to create calibration table")?;

    let state = AppState { db };

    // Server functions are registered by #[server] and dispatched by name
    let app = Router::new()
        .route("/api/{*fn_name}", post(leptos_axum::handle_server_fns))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(state)),
        );

    let listener = tokio::net::TcpListener::bind(config.site_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.site_addr))?;
    tracing::info!(addr = %config.site_addr, "listening");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // Server functions only run with the ssr feature
}

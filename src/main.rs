use anyhow::{Context, Result};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod definition;
mod quiz;
mod registry;
mod settings;

use crate::registry::Registry;
use crate::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::from_env()?;
    let registry = Arc::new(Registry::default());

    match definition::import_directory(&registry, &settings.quiz_dir) {
        Ok(ids) if !ids.is_empty() => {
            info!("Imported {} quizzes from {:?}", ids.len(), settings.quiz_dir)
        }
        Ok(_) => (),
        Err(e) => warn!("Could not import quizzes: {:#}", e),
    }

    let app = api::router(registry)
        .fallback_service(ServeDir::new(&settings.static_dir))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(settings.address)
        .await
        .with_context(|| format!("Could not bind {}", settings.address))?;
    info!("Listening on http://{}", settings.address);
    axum::serve(listener, app).await?;
    Ok(())
}

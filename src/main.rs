//! ADA Portal - church web portal for the African Assembly of God

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ada_portal::{
    api::{self, AppState},
    backend::{
        HttpAuthApi, HttpBackend, HttpFaqsApi, HttpHistoryApi, HttpPrayersApi, HttpUpdatesApi,
        HttpUsersApi,
    },
    config::Config,
    provider::{EventsProvider, GeoIpClient, LocationsProvider},
    services::{LoginAttempts, ModerationService, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ada_portal=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ADA portal...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!(backend = %config.backend.base_url, "Configuration loaded");

    // Backend clients (one shared HTTP wrapper)
    let http = HttpBackend::new(&config.backend)?;
    let auth = Arc::new(HttpAuthApi::new(http.clone()));
    let updates = Arc::new(HttpUpdatesApi::new(http.clone()));
    let faqs = Arc::new(HttpFaqsApi::new(http.clone()));
    let history = Arc::new(HttpHistoryApi::new(http.clone()));
    let prayers = Arc::new(HttpPrayersApi::new(http.clone()));
    let users = Arc::new(HttpUsersApi::new(http));

    // External providers
    let events_provider = Arc::new(EventsProvider::new(&config.provider)?);
    let locations_provider = Arc::new(LocationsProvider::new(&config.provider)?);
    let geoip = Arc::new(GeoIpClient::new(&config.geoip)?);
    tracing::info!(provider = %config.provider.base_url, "Providers initialized");

    // Session store and workflow services
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        config.session.idle_timeout_seconds,
    )));
    let login_attempts = Arc::new(LoginAttempts::new());
    let moderation = Arc::new(ModerationService::new(
        updates.clone(),
        Duration::from_secs(config.session.poll_interval_seconds),
    ));

    // Templates
    let tera = Arc::new(tera::Tera::new(&config.server.templates)?);
    tracing::info!(glob = %config.server.templates, "Templates loaded");

    let state = AppState {
        auth,
        updates,
        faqs,
        history,
        prayers,
        users,
        moderation,
        sessions: sessions.clone(),
        login_attempts: login_attempts.clone(),
        events_provider,
        locations_provider,
        geoip,
        tera,
    };

    // Periodic sweep of idle sessions and stale login attempts.
    {
        let sessions = sessions.clone();
        let login_attempts = login_attempts.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;
                sessions.cleanup().await;
                login_attempts.cleanup().await;
            }
        });
    }

    // Build router
    let app = api::build_router(state, &config.server.cors_origin, &config.server.static_dir);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

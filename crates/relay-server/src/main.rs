//! Alertmanager to GitLab issue relay.
//!
//! Listens for Alertmanager webhooks and files one GitLab issue per distinct
//! alert title, commenting on (or skipping) issues that are already open.

use std::sync::Arc;

use alert_templates::TemplateSet;
use gitlab_client::{GitLabClient, GitLabConfig};
use relay_server::{AppState, Config, Ingestor};
use tracing::info;
use tracing_subscriber::EnvFilter;
use upsert_engine::EngineConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Load configuration; anything missing stops us here
    let config = Config::from_env()?;

    // LOG_LEVEL was validated with the config
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(?config, "Starting alert relay");
    if config.default_project.is_none() {
        info!(
            label = %config.project_label,
            "No GITLAB_PROJECT_ID set; alerts must carry a project label"
        );
    }

    // Tracker client
    let gitlab = GitLabClient::new(
        GitLabConfig::new(&config.gitlab_api_url, &config.gitlab_token)
            .with_timeout(config.request_timeout),
    )?;

    // Templates are parsed once; a broken file is fatal
    let templates = TemplateSet::from_dir(&config.template_dir)?;

    let engine_config = EngineConfig {
        comment_on_existing: config.comment_on_existing,
        default_project: config.default_project.clone(),
    };
    let ingestor = Ingestor::new(
        Arc::new(gitlab),
        engine_config,
        templates,
        config.grouping,
        config.project_label.clone(),
    );

    // Build router
    let app = relay_server::app(AppState::new(ingestor));

    // Start server
    info!(addr = %config.addr, "Alert relay listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

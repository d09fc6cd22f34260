use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use helpdesk::config::AppConfig;
use helpdesk::db;
use helpdesk::handlers;
use helpdesk::services::ai::openai::OpenAiProvider;
use helpdesk::services::ai::rules::RulesProvider;
use helpdesk::services::ai::{Classifier, LlmProvider};
use helpdesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let llm: Box<dyn LlmProvider> = match config.llm_provider.as_str() {
        "rules" => {
            tracing::info!("using built-in rules classifier");
            Box::new(RulesProvider)
        }
        "openai" => {
            anyhow::ensure!(
                !config.openai_api_key.is_empty(),
                "OPENAI_API_KEY must be set when LLM_PROVIDER=openai"
            );
            tracing::info!(
                "using OpenAI-compatible classifier (model: {}, url: {}, timeout: {}s)",
                config.llm_model,
                config.llm_api_url,
                config.llm_timeout_secs
            );
            Box::new(OpenAiProvider::new(
                config.openai_api_key.clone(),
                config.llm_api_url.clone(),
                config.llm_model.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )?)
        }
        other => anyhow::bail!("unknown LLM_PROVIDER {other:?}, expected \"openai\" or \"rules\""),
    };

    let cors = match &config.cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
        None => CorsLayer::permissive(),
    };

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        classifier: Classifier::new(llm),
    });

    let app = handlers::routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

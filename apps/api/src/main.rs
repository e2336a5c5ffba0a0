mod assessment;
mod config;
mod db;
mod errors;
mod identity;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::catalog::CareerCatalog;
use crate::assessment::narrative::{DisabledNarrator, LlmNarrator, NarrativeGenerator};
use crate::assessment::questions::QuestionBank;
use crate::assessment::service::AssessmentService;
use crate::assessment::store::{AssessmentStore, MemoryAssessmentStore, PgAssessmentStore};
use crate::config::Config;
use crate::db::create_pool;
use crate::identity::{IdentityResolver, PgSessionResolver, StaticTokenResolver};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Reference data, loaded once and shared read-only
    let catalog = Arc::new(CareerCatalog::builtin());
    let questions = QuestionBank::builtin();
    info!(
        "Loaded {} careers and {} assessment questions",
        catalog.len(),
        questions.len()
    );

    // Persistence + identity: Postgres when configured, in-process otherwise
    let (store, identity): (Arc<dyn AssessmentStore>, Arc<dyn IdentityResolver>) =
        match &config.database_url {
            Some(url) => {
                let db = create_pool(url).await?;
                (
                    Arc::new(PgAssessmentStore::new(db.clone(), questions)),
                    Arc::new(PgSessionResolver(db)),
                )
            }
            None => {
                warn!("DATABASE_URL not set; using in-memory store and DEV_BEARER_TOKENS");
                (
                    Arc::new(MemoryAssessmentStore::new(questions)),
                    Arc::new(StaticTokenResolver::new(config.dev_bearer_tokens.clone())),
                )
            }
        };

    // Narrative enrichment is optional; without a key every profile uses templates
    let narrator: Arc<dyn NarrativeGenerator> = match &config.llm_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!(
                "LLM client initialized (model: {}, timeout: {}ms)",
                llm_client::MODEL,
                config.narrative_timeout.as_millis()
            );
            Arc::new(LlmNarrator(llm))
        }
        None => {
            info!("LLM_API_KEY not set; narrative enrichment disabled");
            Arc::new(DisabledNarrator)
        }
    };

    let state = AppState {
        service: AssessmentService::new(
            catalog,
            store,
            narrator,
            config.narrative_timeout,
            config.default_top_n,
        ),
        identity,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

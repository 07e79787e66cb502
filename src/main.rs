//! Form actions server
//!
//! Runs the custom-action webhook that drives slot-filling forms, plus the
//! responses API used to render templates.
//!
//! ## Usage
//!
//! ```bash
//! FORM_ACTIONS__SERVER__PORT=5055 cargo run
//!
//! curl -X POST http://localhost:5055/webhook \
//!   -H "Content-Type: application/json" \
//!   -d '{"next_action": "open_incident_form", "tracker": {"slots": {}}}'
//!
//! curl -X POST http://localhost:5055/api/v1/responses/workshop \
//!   -H "Content-Type: application/json" \
//!   -d '{"template": "utter_greet"}'
//! ```

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use form_actions::adapters::forms::load_form_definitions;
use form_actions::adapters::http::build_router;
use form_actions::adapters::storage::{InMemoryDocumentStore, JsonFileDocumentStore};
use form_actions::application::{GenerateResponseHandler, ResponsesService, RunActionHandler};
use form_actions::config::{AppConfig, FormsConfig, StorageBackend, StorageConfig};
use form_actions::domain::action::ActionRegistry;
use form_actions::domain::form::FormEngine;
use form_actions::domain::forms::{DeclarativeForm, OpenIncidentForm};
use form_actions::ports::DocumentStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_validated()?;

    init_tracing(&config);

    let store = open_store(&config.storage).await?;
    let responses = Arc::new(
        ResponsesService::init(store, &config.responses.collection, &config.responses.bot_id)
            .await?,
    );
    let registry = Arc::new(build_registry(&config.forms).await?);

    let app = build_router(
        Arc::new(RunActionHandler::new(registry.clone(), responses.clone())),
        Arc::new(GenerateResponseHandler::new(responses)),
        &config.server,
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Form actions server listening on http://{}", addr);
    info!("Registered actions: {:?}", registry.action_names());

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn open_store(
    config: &StorageConfig,
) -> Result<Arc<dyn DocumentStore>, Box<dyn std::error::Error>> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StorageBackend::File => {
            let store = JsonFileDocumentStore::open(&config.state_folder, &config.db_name).await?;
            info!("Storing documents under {}", store.root().display());
            Arc::new(store)
        }
        StorageBackend::Memory => Arc::new(InMemoryDocumentStore::new(&config.db_name)),
    };
    info!("Using '{}' document store", store.name());
    Ok(store)
}

async fn build_registry(config: &FormsConfig) -> Result<ActionRegistry, Box<dyn std::error::Error>> {
    let mut registry = ActionRegistry::new();
    registry.register(
        FormEngine::new(OpenIncidentForm::new())
            .with_ask_template_prefix(&config.ask_template_prefix),
    )?;

    if let Some(dir) = &config.definitions_dir {
        for definition in load_form_definitions(dir).await? {
            registry.register(
                FormEngine::new(DeclarativeForm::new(definition))
                    .with_ask_template_prefix(&config.ask_template_prefix),
            )?;
        }
    }

    Ok(registry)
}

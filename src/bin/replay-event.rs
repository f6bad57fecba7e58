//! # Lifecycle event replay
//!
//! Runs one of the custom-resource handlers locally against a recorded
//! CloudFormation event, printing the result the orchestrator would receive.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin replay-event -- glossary events/create-glossary.json
//! cargo run --bin replay-event -- form events/delete-form.json --in-memory
//! ```
//!
//! Handler kinds are `form`, `glossary` and `glossary-term`. Without
//! `--in-memory` the event is sent to DataZone using the same environment
//! configuration as the deployed handlers.
//!
//! ## Output
//!
//! ```text
//! {
//!   "status": "SUCCESS",
//!   "PhysicalResourceId": "5s0zoijp4pk1lj",
//!   "Data": {
//!     "GlossaryId": "5s0zoijp4pk1lj"
//!   }
//! }
//! ```

use datazone_resources::config::{HandlerConfig, init_logging};
use datazone_resources::runtime::invoke;
use datazone_resources::{
    CatalogClient, CustomResourceHandler, DataZoneCatalog, FormHandler, GlossaryHandler,
    GlossaryTermHandler, HandlerResult, InMemoryCatalog, LifecycleEvent, LifecycleResult,
};
use std::env;
use std::fs;
use std::process;

#[derive(Debug, Clone, Copy)]
enum HandlerKind {
    Form,
    Glossary,
    GlossaryTerm,
}

impl HandlerKind {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "form" => Some(HandlerKind::Form),
            "glossary" => Some(HandlerKind::Glossary),
            "glossary-term" => Some(HandlerKind::GlossaryTerm),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <form|glossary|glossary-term> <event.json> [--in-memory]",
            args[0]
        );
        process::exit(1);
    }

    let Some(kind) = HandlerKind::parse(&args[1]) else {
        eprintln!("Unknown handler kind '{}'", args[1]);
        process::exit(1);
    };

    let payload = match fs::read_to_string(&args[2]) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("Cannot read {}: {}", args[2], e);
            process::exit(1);
        }
    };

    let event = match LifecycleEvent::from_json(&payload) {
        Ok(event) => event,
        Err(e) => {
            eprintln!("Invalid event in {}: {}", args[2], e);
            process::exit(1);
        }
    };

    let config = HandlerConfig::from_env();
    let in_memory = args.iter().skip(3).any(|arg| arg == "--in-memory");

    let result = if in_memory {
        replay(kind, InMemoryCatalog::new(), &event, &config).await
    } else {
        let sdk_config = config.sdk_config().await;
        let catalog = DataZoneCatalog::from_conf(&sdk_config, &config);
        replay(kind, catalog, &event, &config).await
    };

    match result.and_then(|outcome| Ok(serde_json::to_string_pretty(&outcome)?)) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("❌ {} failed: {}", event.request_type, e);
            process::exit(1);
        }
    }
}

async fn replay<C: CatalogClient>(
    kind: HandlerKind,
    catalog: C,
    event: &LifecycleEvent,
    config: &HandlerConfig,
) -> HandlerResult<LifecycleResult> {
    match kind {
        HandlerKind::Form => run(FormHandler::new(catalog), event, config).await,
        HandlerKind::Glossary => run(GlossaryHandler::new(catalog), event, config).await,
        HandlerKind::GlossaryTerm => run(GlossaryTermHandler::new(catalog), event, config).await,
    }
}

async fn run<H: CustomResourceHandler>(
    handler: H,
    event: &LifecycleEvent,
    config: &HandlerConfig,
) -> HandlerResult<LifecycleResult> {
    invoke(&handler, event, config).await
}

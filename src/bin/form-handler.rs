//! Lambda entry point for the Form custom resource.

use datazone_resources::config::{HandlerConfig, init_logging};
use datazone_resources::runtime::run_handler;
use datazone_resources::{DataZoneCatalog, FormHandler};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    init_logging();

    let config = HandlerConfig::from_env();
    let sdk_config = config.sdk_config().await;
    let catalog = DataZoneCatalog::from_conf(&sdk_config, &config);

    run_handler(FormHandler::new(catalog), config).await
}

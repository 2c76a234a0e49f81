use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{run, service_fn, Error, Request};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use users_api_shared::config::Config;
use users_api_shared::store::DynamoUserStore;
use users_api_shared::AppState;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    // Refuse to start without a table to talk to
    let config = Config::from_env()?;

    // Initialize AWS clients once at startup
    let aws_config = aws_config::load_from_env().await;
    let store = DynamoUserStore::new(DynamoClient::new(&aws_config), config.table_name.clone());
    tracing::info!("Users Lambda starting, table: {}", store.table_name());

    let state = AppState::new(config, Arc::new(store));

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}

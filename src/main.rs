//! Service binary: wire the stores, the aggregator client and the HTTP
//! server from configuration.

use anyhow::Result;
use shipgate::config::ServiceConfig;
use shipgate::core::auth::{Principal, StaticTokenAuthProvider};
use shipgate::dispatch::{Dispatcher, Repositories};
use shipgate::notify::InMemoryNotificationSink;
use shipgate::server::{self, AppState};
use shipgate::shipping::ShiprocketClient;
use shipgate::storage::{
    InMemoryCredentialStore, InMemoryCustomerStore, InMemoryOrderStore, InMemoryTrackingStore,
    InMemoryVendorStore,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            ServiceConfig::from_yaml_file(&path)?
        }
        None => ServiceConfig::default(),
    };

    let repos = Repositories {
        orders: Arc::new(InMemoryOrderStore::new()),
        vendors: Arc::new(InMemoryVendorStore::new()),
        customers: Arc::new(InMemoryCustomerStore::new()),
        credentials: Arc::new(InMemoryCredentialStore::new()),
        tracking: Arc::new(InMemoryTrackingStore::new()),
    };

    let shipping = Arc::new(ShiprocketClient::new(&config.shipping)?);
    let notifier = Arc::new(InMemoryNotificationSink::new());
    let dispatcher = Arc::new(Dispatcher::new(
        repos,
        shipping,
        notifier,
        config.shipping.clone(),
    ));

    let mut auth = StaticTokenAuthProvider::new();
    for entry in &config.auth_tokens {
        auth = auth.with_token(
            entry.token.clone(),
            Principal {
                user_id: entry.user_id,
                role: entry.role,
            },
        );
    }

    let state = AppState {
        dispatcher,
        auth: Arc::new(auth),
    };

    server::serve(state, &config.listen_addr).await
}

pub mod config;
pub mod error;
pub mod handler;
pub mod request;
pub mod response;
pub mod route;
pub mod store;
pub mod types;

use std::sync::Arc;

use config::Config;
use handler::UsersHandler;
use store::UserStore;

/// Shared application state, built once per Lambda process
pub struct AppState {
    pub config: Config,
    pub handler: UsersHandler,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn UserStore>) -> Arc<Self> {
        Arc::new(Self {
            config,
            handler: UsersHandler::new(store),
        })
    }
}

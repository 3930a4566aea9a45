use std::sync::{Arc, Mutex};

use crate::api::ApiClient;
use crate::config::ConsoleConfig;
use crate::screen::Screen;

pub type SharedState = Arc<ConsoleState>;

/// Everything the console shares across cycles: the configuration, the one
/// HTTP client, and the screen. No payload ever outlives its render.
pub struct ConsoleState {
    pub config: ConsoleConfig,
    pub api: ApiClient,
    pub screen: Mutex<Screen>,
}

impl ConsoleState {
    pub fn new(config: ConsoleConfig) -> Self {
        let api = ApiClient::new(&config.base_url);
        Self {
            config,
            api,
            screen: Mutex::new(Screen::new()),
        }
    }
}

use std::sync::Mutex;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::forms::DraftStore;
use crate::services::connectivity::ConnectivityHandle;

pub struct AppState {
    pub config: AppConfig,
    pub api: ApiClient,
    pub connectivity: ConnectivityHandle,
    /// In-progress assistant wizards, keyed by draft id.
    pub drafts: Mutex<DraftStore>,
}

impl AppState {
    pub fn new(config: AppConfig, api: ApiClient, connectivity: ConnectivityHandle) -> Self {
        Self {
            config,
            api,
            connectivity,
            drafts: Mutex::new(DraftStore::default()),
        }
    }
}

use std::sync::Arc;

use splashanno_core::ServerConfig;
use splashanno_core::pipeline::Pipeline;
use splashanno_core::store::DocumentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub pipeline: Arc<Pipeline>,
    /// Check written documents against the filter mode's expected shape
    pub validate_writes: bool,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        AppState {
            store: Arc::new(DocumentStore::new(config.data_file.clone())),
            pipeline: Arc::new(Pipeline::new(config.filter_mode, config.image_prefix.clone())),
            validate_writes: config.validate_writes,
        }
    }
}

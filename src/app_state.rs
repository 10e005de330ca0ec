use crate::config::Config;
use crate::pipeline::Pipeline;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            pipeline: Pipeline::from_config(config),
        }
    }
}

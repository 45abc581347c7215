use std::sync::Arc;

use crate::application::agent::SurfaceGenerator;

/// Name reported by the health endpoint.
pub const AGENT_NAME: &str = "a2ui-content";

#[derive(Clone)]
pub struct ApiState {
    pub generator: Arc<dyn SurfaceGenerator>,
}

impl ApiState {
    pub fn new(generator: Arc<dyn SurfaceGenerator>) -> Self {
        Self { generator }
    }
}

use std::sync::Arc;

use crate::classify::ClassifierClient;
use crate::config::Config;
use crate::error::Result;
use crate::processing::DocumentExtractor;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub extractor: Arc<DocumentExtractor>,
    pub classifier: ClassifierClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let extractor = DocumentExtractor::new(&config.processing);
        let classifier = ClassifierClient::new(&config.classifier)?;

        Ok(Self {
            config: Arc::new(config),
            extractor: Arc::new(extractor),
            classifier,
        })
    }
}

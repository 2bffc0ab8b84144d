//! Application state for the RFQ API

use anyhow::Result;
use rfq_core::RfqConfig;
use rfq_store::RfqService;

pub struct AppState {
    pub service: RfqService,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(service: RfqService, max_upload_bytes: usize) -> Self {
        Self {
            service,
            max_upload_bytes,
        }
    }

    pub async fn from_config(config: &RfqConfig) -> Result<Self> {
        let service = RfqService::from_config(config).await?;
        Ok(Self::new(service, config.server.max_upload_bytes))
    }
}

//! Shared state of the mock data server
//!
//! A `MockServerHost` holds everything the request handlers need: the product
//! service, the service metadata document, the root URI the routes are mounted
//! under, and the configured response delay. It is cheap to clone and is used
//! directly as axum router state.

use crate::config::MockServerConfig;
use crate::core::service::ProductService;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct MockServerHost {
    /// Product rows served under `Products`
    pub service: Arc<dyn ProductService>,

    /// The `$metadata` document
    pub metadata: Arc<str>,

    /// Service root with a trailing slash, e.g. `/sap/opu/odata/sap/PRODUCT_SRV/`
    pub root_uri: String,

    /// Settings the server was started with
    pub config: Arc<MockServerConfig>,
}

impl MockServerHost {
    pub fn new(
        service: Arc<dyn ProductService>,
        metadata: impl Into<Arc<str>>,
        root_uri: impl Into<String>,
        config: MockServerConfig,
    ) -> Self {
        Self {
            service,
            metadata: metadata.into(),
            root_uri: root_uri.into(),
            config: Arc::new(config),
        }
    }

    /// Wait before answering a request
    ///
    /// `requested` is the request's `serverDelay` parameter; a configured
    /// delay takes precedence over it.
    pub async fn delay(&self, requested: Option<u64>) {
        let ms = self.config.effective_delay_ms(requested);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

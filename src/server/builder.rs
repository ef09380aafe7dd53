//! MockServerBuilder for starting the mock data service

use super::host::MockServerHost;
use super::router::build_router;
use crate::config::{Manifest, MockServerConfig};
use crate::core::error::ConfigError;
use crate::core::service::ProductService;
use crate::storage::{InMemoryProductService, fixtures, generate_products, load_products};
use anyhow::Result;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Rows served when `Products.json` is missing
pub const GENERATED_ROWS: usize = 100;

const DEFAULT_METADATA_URI: &str = "localService/metadata.xml";

/// Builder for the mock data server
///
/// # Example
///
/// ```ignore
/// let config = MockServerConfig::load_or_default("config/mockserver.yaml")?;
/// MockServerBuilder::new(config).serve().await?;
/// ```
pub struct MockServerBuilder {
    config: MockServerConfig,
    service: Option<Arc<dyn ProductService>>,
}

impl MockServerBuilder {
    pub fn new(config: MockServerConfig) -> Self {
        Self {
            config,
            service: None,
        }
    }

    /// Serve rows from `service` instead of the fixture directory
    pub fn with_product_service(mut self, service: impl ProductService + 'static) -> Self {
        self.service = Some(Arc::new(service));
        self
    }

    /// Read the manifest, metadata and fixtures into a host
    ///
    /// A manifest that cannot be loaded aborts startup.
    pub fn build_host(mut self) -> Result<MockServerHost> {
        let manifest_path = self.config.manifest_path();
        let manifest = Manifest::from_json_file(&manifest_path).inspect_err(|e| {
            tracing::error!(
                path = %manifest_path.display(),
                error = %e,
                "Failed to load application manifest"
            );
        })?;

        let main_service = manifest.main_service()?;
        let root_uri = main_service.root_uri();
        let metadata_uri = main_service
            .settings
            .local_uri
            .as_deref()
            .unwrap_or(DEFAULT_METADATA_URI);
        let metadata = load_metadata(&self.config.app_path.join(metadata_uri))?;

        let service: Arc<dyn ProductService> = match self.service.take() {
            Some(service) => service,
            None => Arc::new(self.seed_service()?),
        };

        Ok(MockServerHost::new(service, metadata, root_uri, self.config))
    }

    /// Build the router for the mock service
    pub fn build(self) -> Result<Router> {
        let host = self.build_host()?;
        tracing::info!(root_uri = %host.root_uri, "Running the app with mock data");
        Ok(build_router(host))
    }

    /// Serve the mock service with graceful shutdown
    ///
    /// Binds to the configured address and stops on SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Mock server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Mock server shutdown complete");
        Ok(())
    }

    fn seed_service(&self) -> Result<InMemoryProductService, ConfigError> {
        let dir = self.config.mockdata_path();
        if let Some(rows) = load_products(&dir)? {
            tracing::debug!(rows = rows.len(), dir = %dir.display(), "loaded mock data");
            return Ok(InMemoryProductService::with_products(rows));
        }

        let path = fixtures::products_fixture_path(&dir);
        if !self.config.generate_missing_mock_data {
            return Err(ConfigError::FixtureLoad {
                path: path.display().to_string(),
                message: "file not found".to_string(),
            });
        }
        tracing::warn!(
            path = %path.display(),
            rows = GENERATED_ROWS,
            "no mock data file, generating rows"
        );
        Ok(InMemoryProductService::with_products(generate_products(GENERATED_ROWS)))
    }
}

fn load_metadata(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::MetadataLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::product::Product;
    use std::fs;

    const MANIFEST: &str = r#"{
        "sap.app": {
            "dataSources": {
                "mainService": {
                    "uri": "/odata/PRODUCT_SRV",
                    "settings": { "localUri": "localService/metadata.xml" }
                }
            }
        }
    }"#;

    fn app_dir(with_fixture: bool) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("manifest.json"), MANIFEST).unwrap();
        let local = dir.path().join("localService");
        fs::create_dir_all(local.join("mockdata")).unwrap();
        fs::write(local.join("metadata.xml"), "<edmx:Edmx/>").unwrap();
        if with_fixture {
            fs::write(
                local.join("mockdata/Products.json"),
                r#"[{"ID": 1, "Name": "Milk 2%"}]"#,
            )
            .unwrap();
        }
        dir
    }

    fn config(dir: &tempfile::TempDir) -> MockServerConfig {
        MockServerConfig {
            app_path: dir.path().to_path_buf(),
            delay_ms: Some(0),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_build_host_reads_manifest_and_fixtures() {
        let dir = app_dir(true);
        let host = MockServerBuilder::new(config(&dir)).build_host().unwrap();

        assert_eq!(host.root_uri, "/odata/PRODUCT_SRV/");
        assert_eq!(&*host.metadata, "<edmx:Edmx/>");
        assert_eq!(host.service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_fixture_generates_rows() {
        let dir = app_dir(false);
        let host = MockServerBuilder::new(config(&dir)).build_host().unwrap();
        assert_eq!(host.service.list().await.unwrap().len(), GENERATED_ROWS);
    }

    #[test]
    fn test_missing_fixture_without_generation_fails() {
        let dir = app_dir(false);
        let config = MockServerConfig {
            generate_missing_mock_data: false,
            ..config(&dir)
        };
        let err = MockServerBuilder::new(config).build_host().err().unwrap();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::FixtureLoad { .. })
        ));
    }

    #[test]
    fn test_missing_manifest_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = MockServerBuilder::new(config(&dir)).build_host().err().unwrap();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ManifestLoad { .. })
        ));
    }

    #[test]
    fn test_missing_metadata_fails() {
        let dir = app_dir(true);
        fs::remove_file(dir.path().join("localService/metadata.xml")).unwrap();
        let err = MockServerBuilder::new(config(&dir)).build_host().err().unwrap();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MetadataLoad { .. })
        ));
    }

    #[tokio::test]
    async fn test_relative_service_uri_is_mounted_absolute() {
        let dir = app_dir(true);
        fs::write(
            dir.path().join("manifest.json"),
            MANIFEST.replace("/odata/PRODUCT_SRV", "sap/opu/odata/sap/PRODUCT_SRV/"),
        )
        .unwrap();

        let app = MockServerBuilder::new(config(&dir)).build().unwrap();
        let server = axum_test::TestServer::new(app).unwrap();
        server
            .get("/sap/opu/odata/sap/PRODUCT_SRV/Products(1)")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_custom_service_skips_fixtures() {
        let dir = app_dir(false);
        let config = MockServerConfig {
            generate_missing_mock_data: false,
            ..config(&dir)
        };
        let host = MockServerBuilder::new(config)
            .with_product_service(InMemoryProductService::with_products([Product::new(9, "Tea")]))
            .build_host()
            .unwrap();
        assert!(host.service.get(9).await.unwrap().is_some());
    }
}

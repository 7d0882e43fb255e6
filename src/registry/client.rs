//! HTTP registry client

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::{DeclaredDependencies, Registry};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Registry returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed registry response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Timeouts applied to every registry request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryOptions {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Body of `GET {base}/{package}/latest`; everything but `dependencies` is ignored
#[derive(Debug, Deserialize)]
struct LatestRelease {
    #[serde(default)]
    dependencies: Option<DeclaredDependencies>,
}

/// Registry client speaking the npm-style `/{package}/latest` API
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRegistry {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RegistryError> {
        Self::with_options(base_url, RegistryOptions::default())
    }

    pub fn with_options(
        base_url: impl Into<String>,
        options: RegistryOptions,
    ) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .connect_timeout(options.connect_timeout)
            .timeout(options.request_timeout)
            .build()
            .map_err(RegistryError::Client)?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the latest release document for `package`
    pub fn package_url(&self, package: &str) -> String {
        format!("{}/{}/latest", self.base_url.trim_end_matches('/'), package)
    }

    /// Performs one lookup, surfacing every failure
    pub async fn try_declared_dependencies(
        &self,
        package: &str,
    ) -> Result<DeclaredDependencies, RegistryError> {
        let url = self.package_url(package);
        debug!(%url, "fetching package metadata");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| RegistryError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| RegistryError::Transport {
                url: url.clone(),
                source,
            })?;

        let release: LatestRelease =
            serde_json::from_slice(&body).map_err(|source| RegistryError::Parse { url, source })?;

        Ok(release.dependencies.unwrap_or_default())
    }
}

impl Registry for HttpRegistry {
    async fn declared_dependencies(&self, package: &str) -> DeclaredDependencies {
        match self.try_declared_dependencies(package).await {
            Ok(dependencies) => dependencies,
            Err(err) => {
                warn!(package, error = %err, "dependency lookup failed, treating package as a leaf");
                DeclaredDependencies::new()
            }
        }
    }
}

use crate::config::CloudConfig;
use crate::errors::{CloudError, Result};
use crate::utils::log_utils::Logger;
use aws_config::SdkConfig;
use aws_config::retry::RetryConfig;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use std::future::Future;
use std::time::Duration;

/// Region, runtime and per-call timeout shared by every sub-client.
///
/// The session never changes after construction; the blocking API drives
/// each request on its runtime and cancels it once `call_timeout` elapses.
pub struct Session {
    region: String,
    call_timeout: Duration,
    runtime: tokio::runtime::Runtime,
}

impl Session {
    pub fn new(region: impl Into<String>, call_timeout: Duration) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| CloudError::Runtime(format!("Failed to create runtime: {}", e)))?;
        Ok(Self {
            region: region.into(),
            call_timeout,
            runtime,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// Load the shared AWS configuration for this session's region
    pub fn load_sdk_config(&self, config: &CloudConfig) -> SdkConfig {
        let logger = Logger::new(config.verbose);
        logger.debug(&format!("Region: {}", self.region));
        if let Some(endpoint) = &config.endpoint_url {
            logger.debug(&format!("Endpoint: {}", endpoint));
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint.clone());
        }

        if let Some(creds) = &config.credentials {
            logger.debug(&format!("Using static credentials {:?}", creds));
            loader = loader.credentials_provider(Credentials::new(
                creds.access_key_id.clone(),
                creds.secret_access_key.clone(),
                creds.session_token.clone(),
                None, // No expiry
                "CloudClientStaticCredentials",
            ));
        }

        self.runtime.block_on(loader.load())
    }

    /// Drive `request` to completion, failing with a timeout error if it
    /// has not finished within the session's call timeout.
    pub fn call<T, F>(&self, operation: &'static str, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let after = self.call_timeout;
        self.runtime.block_on(async move {
            match tokio::time::timeout(after, request).await {
                Ok(result) => result,
                Err(_elapsed) => Err(CloudError::Timeout { operation, after }),
            }
        })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("region", &self.region)
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}

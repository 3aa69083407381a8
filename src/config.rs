use crate::errors::{CloudError, Result};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// Static access keys, used instead of the SDK's default credential chain
#[derive(Clone)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field(
                "access_key_id",
                &format!("{}****", self.access_key_id.chars().take(4).collect::<String>()),
            )
            .field("secret_access_key", &"[redacted]")
            .field("session_token", &self.session_token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl StaticCredentials {
    /// Read access keys from files, one value per file
    pub fn from_files(access_key_id_path: &Path, secret_access_key_path: &Path) -> Result<Self> {
        Ok(Self {
            access_key_id: read_value_from_file(access_key_id_path)?,
            secret_access_key: read_value_from_file(secret_access_key_path)?,
            session_token: None,
        })
    }
}

/// Everything fixed at client construction
#[derive(Debug, Clone)]
pub struct CloudConfig {
    pub region: String,
    /// Overrides the service endpoints, e.g. for a local emulator
    pub endpoint_url: Option<String>,
    pub credentials: Option<StaticCredentials>,
    pub call_timeout: Duration,
    /// Attempts the SDK makes per request; 1 disables SDK retries
    pub max_attempts: u32,
    pub verbose: u8,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            credentials: None,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            verbose: 0,
        }
    }
}

impl CloudConfig {
    pub fn for_region(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(CloudError::Config("region must not be empty".to_string()));
        }
        if self.call_timeout.is_zero() {
            return Err(CloudError::Config("call timeout must be non-zero".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(CloudError::Config("max attempts must be at least 1".to_string()));
        }
        if let Some(url) = &self.endpoint_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CloudError::Config(format!(
                    "endpoint url must start with http:// or https://, got '{}'",
                    url
                )));
            }
        }
        Ok(())
    }
}

/// Helper function to read a single trimmed value from a file
pub fn read_value_from_file(file_path: &Path) -> Result<String> {
    let value = fs::read_to_string(file_path).map_err(|e| CloudError::io(file_path, e))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(CloudError::Config(format!(
            "{} is empty",
            file_path.display()
        )));
    }
    Ok(value.to_string())
}

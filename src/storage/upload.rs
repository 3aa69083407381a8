use crate::errors::{CloudError, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
pub const CONTENT_DISPOSITION: &str = "attachment";

/// A local file to upload, and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub local_path: PathBuf,
    /// Bucket name or a colon-qualified identifier such as an ARN
    pub container_name: String,
    pub object_key: String,
    pub content_type: String,
}

impl UploadRequest {
    pub fn new(
        local_path: impl Into<PathBuf>,
        container_name: impl Into<String>,
        object_key: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            local_path: local_path.into(),
            container_name: container_name.into(),
            object_key: object_key.into(),
            content_type: content_type.into(),
        }
    }

    /// Read the whole file and build the object store request.
    ///
    /// The file handle is dropped before this returns, on success or error.
    pub fn into_put_request(self) -> Result<PutObjectRequest> {
        let body = read_whole_file(&self.local_path)?;
        Ok(PutObjectRequest {
            bucket: normalize_bucket_name(&self.container_name).to_string(),
            key: self.object_key,
            content_type: self.content_type,
            body,
        })
    }
}

/// Object store upload as sent: private, `attachment`, AES256-encrypted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectRequest {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl PutObjectRequest {
    pub fn content_length(&self) -> i64 {
        self.body.len() as i64
    }
}

/// Keep only what follows the last colon, so `arn:aws:s3:::my-bucket`
/// becomes `my-bucket`. Names without a colon pass through.
pub fn normalize_bucket_name(container_name: &str) -> &str {
    match container_name.rsplit_once(':') {
        Some((_, bucket)) => bucket,
        None => container_name,
    }
}

fn read_whole_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| CloudError::io(path, e))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .map_err(|e| CloudError::io(path, e))?;
    Ok(buffer)
}

use crate::errors::{CloudError, Result};
use crate::interfaces::ObjectStore;
use crate::storage::upload::{CONTENT_DISPOSITION, PutObjectRequest};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{ObjectCannedAcl, ServerSideEncryption};

/// [`ObjectStore`] backed by AWS S3
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Path-style addressing is needed for custom endpoints such as local
    /// emulators, which rarely resolve bucket subdomains.
    pub fn new(sdk_config: &SdkConfig, force_path_style: bool) -> Self {
        let config = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(force_path_style)
            .build();
        Self::from_client(Client::from_conf(config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, request: PutObjectRequest) -> Result<()> {
        let content_length = request.content_length();

        self.client
            .put_object()
            .bucket(request.bucket)
            .key(request.key)
            .acl(ObjectCannedAcl::Private)
            .content_length(content_length)
            .content_type(request.content_type)
            .content_disposition(CONTENT_DISPOSITION)
            .server_side_encryption(ServerSideEncryption::Aes256)
            .body(ByteStream::from(request.body))
            .send()
            .await
            .map_err(|e| CloudError::provider("PutObject", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_credential_types::Credentials;
    use aws_sdk_s3::config::{BehaviorVersion, Region};
    use aws_smithy_runtime::client::http::test_util::capture_request;

    #[tokio::test]
    async fn put_object_sends_private_encrypted_attachment() {
        let (http_client, captured) = capture_request(None);
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
            .force_path_style(true)
            .http_client(http_client)
            .build();
        let store = S3ObjectStore::from_client(Client::from_conf(config));

        store
            .put_object(PutObjectRequest {
                bucket: "my-bucket".to_string(),
                key: "reports/q1.csv".to_string(),
                content_type: "text/csv".to_string(),
                body: b"q1,10\n".to_vec(),
            })
            .await
            .expect("put object");

        let sent = captured.expect_request();
        assert_eq!(sent.method(), "PUT");
        assert!(
            sent.uri().contains("/my-bucket/reports/q1.csv"),
            "unexpected uri {}",
            sent.uri()
        );
        let headers = sent.headers();
        assert_eq!(headers.get("x-amz-acl"), Some("private"));
        assert_eq!(headers.get("content-type"), Some("text/csv"));
        assert_eq!(headers.get("content-disposition"), Some("attachment"));
        assert_eq!(headers.get("x-amz-server-side-encryption"), Some("AES256"));
    }
}

use crate::errors::Result;
use crate::queue::MessageAttributes;
use crate::secrets::{SecretBundle, SecretPayload};
use crate::storage::{PutObjectRequest, UploadRequest};
use async_trait::async_trait;
use mockall::automock;
use std::collections::BTreeMap;

/// Secrets store capability (AWS Secrets Manager in production)
#[automock]
#[async_trait]
pub trait SecretsStore: Send + Sync {
    /// Fetch the payload of `secret_id` at the given version stage
    async fn get_secret_value(&self, secret_id: &str, version_stage: &str)
    -> Result<SecretPayload>;
}

/// Message queue capability (AWS SQS in production)
#[automock]
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// `None` when the provider answered without a URL
    async fn get_queue_url(&self, queue_name: &str) -> Result<Option<String>>;

    /// `None` when the provider accepted the call without a message id
    async fn send_message(
        &self,
        queue_url: &str,
        body: &str,
        attributes: &BTreeMap<String, String>,
    ) -> Result<Option<String>>;
}

/// Object store capability (AWS S3 in production)
#[automock]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, request: PutObjectRequest) -> Result<()>;
}

/// Destination for decoded secrets, usually the process environment
#[automock]
pub trait EnvironmentWriter {
    fn set_var(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Blocking operations exposed by [`crate::CloudClient`].
///
/// Writing into the process environment is left out: it is `unsafe` and
/// lives on [`crate::CloudClient::apply_secrets_to_environment`].
#[automock]
pub trait CloudOperations: Send + Sync {
    fn fetch_secret_bundle(&self, secret_name: &str) -> Result<SecretBundle>;

    fn fetch_secret_bundle_at_stage(
        &self,
        secret_name: &str,
        version_stage: &str,
    ) -> Result<SecretBundle>;

    fn fetch_secret_field(&self, secret_name: &str, field_name: &str) -> Result<String>;

    /// The decoded secret as the mapping to inject, leaving the caller to
    /// decide where it goes
    fn secret_environment(&self, secret_name: &str) -> Result<SecretBundle>;

    fn resolve_queue_url(&self, queue_name: &str) -> Result<String>;

    fn enqueue_message(&self, payload: &str, queue_url: &str) -> Result<String>;

    fn enqueue_message_with_attributes(
        &self,
        payload: &str,
        queue_url: &str,
        attributes: &MessageAttributes,
    ) -> Result<String>;

    fn upload_object(&self, request: &UploadRequest) -> Result<()>;
}

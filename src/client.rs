use crate::config::CloudConfig;
use crate::errors::{CloudError, Result};
use crate::interfaces::{CloudOperations, EnvironmentWriter, MessageQueue, ObjectStore, SecretsStore};
use crate::queue::{MessageAttributes, SqsQueue};
use crate::secrets::{
    CURRENT_VERSION_STAGE, ProcessEnvironment, SecretBundle, SecretsManagerStore, apply_bundle,
};
use crate::session::Session;
use crate::storage::{S3ObjectStore, UploadRequest};
use crate::utils::log_utils::Logger;
use std::collections::BTreeMap;

/// Secrets, queue and object store access bound to one session
pub struct CloudClient {
    session: Session,
    secrets: Box<dyn SecretsStore>,
    queue: Box<dyn MessageQueue>,
    storage: Box<dyn ObjectStore>,
    logger: Logger,
}

impl CloudClient {
    /// Build a session and the AWS-backed sub-clients for `config.region`
    pub fn connect(config: &CloudConfig) -> Result<Self> {
        config.validate()?;
        let session = Session::new(config.region.clone(), config.call_timeout)?;
        let sdk_config = session.load_sdk_config(config);

        let secrets = SecretsManagerStore::new(&sdk_config);
        let queue = SqsQueue::new(&sdk_config);
        let storage = S3ObjectStore::new(&sdk_config, config.endpoint_url.is_some());

        Ok(Self::from_parts(
            session,
            Box::new(secrets),
            Box::new(queue),
            Box::new(storage),
        )
        .with_logger(Logger::new(config.verbose)))
    }

    /// Shortcut for [`CloudClient::connect`] with defaults for everything but the region
    pub fn for_region(region: &str) -> Result<Self> {
        Self::connect(&CloudConfig::for_region(region))
    }

    /// Assemble a client from an existing session and sub-clients
    pub fn from_parts(
        session: Session,
        secrets: Box<dyn SecretsStore>,
        queue: Box<dyn MessageQueue>,
        storage: Box<dyn ObjectStore>,
    ) -> Self {
        Self {
            session,
            secrets,
            queue,
            storage,
            logger: Logger::default(),
        }
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Fetch a secret and write each entry through `writer`
    pub fn apply_secrets_with(
        &self,
        secret_name: &str,
        writer: &mut dyn EnvironmentWriter,
    ) -> Result<()> {
        let bundle = self.secret_environment(secret_name)?;
        apply_bundle(&bundle, writer)?;
        self.logger.info(&format!(
            "Applied {} variables from secret '{}'",
            bundle.len(),
            secret_name
        ));
        Ok(())
    }

    /// Fetch a secret and set each entry in the process environment.
    ///
    /// # Safety
    ///
    /// Same contract as [`ProcessEnvironment::new`]: no other thread may read
    /// or write the environment except through `std::env` until this returns.
    /// The fetch runs on this client's runtime, which only touches the
    /// environment while the request is in flight, before any variable is set.
    pub unsafe fn apply_secrets_to_environment(&self, secret_name: &str) -> Result<()> {
        // SAFETY: forwarded from this function's contract.
        let mut env = unsafe { ProcessEnvironment::new() };
        self.apply_secrets_with(secret_name, &mut env)
    }

    fn send(
        &self,
        payload: &str,
        queue_url: &str,
        attributes: &BTreeMap<String, String>,
    ) -> Result<String> {
        self.logger.debug(&format!(
            "Sending message to {} with {} attributes",
            queue_url,
            attributes.len()
        ));
        let message_id = self.session.call(
            "SendMessage",
            self.queue.send_message(queue_url, payload, attributes),
        )?;
        message_id.ok_or_else(|| CloudError::MessageNotSent {
            payload: payload.to_string(),
        })
    }
}

impl CloudOperations for CloudClient {
    fn fetch_secret_bundle(&self, secret_name: &str) -> Result<SecretBundle> {
        self.fetch_secret_bundle_at_stage(secret_name, CURRENT_VERSION_STAGE)
    }

    fn fetch_secret_bundle_at_stage(
        &self,
        secret_name: &str,
        version_stage: &str,
    ) -> Result<SecretBundle> {
        self.logger.debug(&format!(
            "Fetching secret '{}' ({})",
            secret_name, version_stage
        ));
        let payload = self.session.call(
            "GetSecretValue",
            self.secrets.get_secret_value(secret_name, version_stage),
        )?;
        let bundle = SecretBundle::decode(&payload)?;
        self.logger.debug(&format!(
            "Secret '{}' decoded into {} entries",
            secret_name,
            bundle.len()
        ));
        Ok(bundle)
    }

    fn fetch_secret_field(&self, secret_name: &str, field_name: &str) -> Result<String> {
        Ok(self.fetch_secret_bundle(secret_name)?.field(field_name))
    }

    fn secret_environment(&self, secret_name: &str) -> Result<SecretBundle> {
        self.fetch_secret_bundle(secret_name)
    }

    fn resolve_queue_url(&self, queue_name: &str) -> Result<String> {
        self.logger
            .debug(&format!("Resolving URL for queue '{}'", queue_name));
        self.session
            .call("GetQueueUrl", self.queue.get_queue_url(queue_name))?
            .filter(|url| !url.is_empty())
            .ok_or_else(|| CloudError::MissingQueueUrl(queue_name.to_string()))
    }

    fn enqueue_message(&self, payload: &str, queue_url: &str) -> Result<String> {
        self.send(payload, queue_url, &BTreeMap::new())
    }

    fn enqueue_message_with_attributes(
        &self,
        payload: &str,
        queue_url: &str,
        attributes: &MessageAttributes,
    ) -> Result<String> {
        self.send(payload, queue_url, &attributes.to_string_map())
    }

    fn upload_object(&self, request: &UploadRequest) -> Result<()> {
        let put = request.clone().into_put_request()?;
        self.logger.debug(&format!(
            "Uploading {} ({} bytes) to s3://{}/{}",
            request.local_path.display(),
            put.body.len(),
            put.bucket,
            put.key
        ));
        self.session
            .call("PutObject", self.storage.put_object(put))
    }
}

impl std::fmt::Debug for CloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

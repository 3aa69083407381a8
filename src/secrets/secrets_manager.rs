use crate::errors::{CloudError, Result};
use crate::interfaces::SecretsStore;
use crate::secrets::SecretPayload;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_secretsmanager::Client;

/// [`SecretsStore`] backed by AWS Secrets Manager
#[derive(Clone, Debug)]
pub struct SecretsManagerStore {
    client: Client,
}

impl SecretsManagerStore {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(Client::new(sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretsStore for SecretsManagerStore {
    async fn get_secret_value(
        &self,
        secret_id: &str,
        version_stage: &str,
    ) -> Result<SecretPayload> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .version_stage(version_stage)
            .send()
            .await
            .map_err(|e| CloudError::provider("GetSecretValue", e))?;

        SecretPayload::from_fields(
            secret_id,
            output.secret_string(),
            output.secret_binary().map(|blob| blob.as_ref()),
        )
    }
}

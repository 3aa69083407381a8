use crate::errors::{CloudError, Result};
use crate::interfaces::MessageQueue;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sqs::Client;
use aws_sdk_sqs::types::MessageAttributeValue;
use std::collections::{BTreeMap, HashMap};

/// [`MessageQueue`] backed by AWS SQS
#[derive(Clone, Debug)]
pub struct SqsQueue {
    client: Client,
}

impl SqsQueue {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(Client::new(sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

/// Convert attributes to SQS `String` attribute values
pub fn to_sqs_attributes(
    attributes: &BTreeMap<String, String>,
) -> Result<HashMap<String, MessageAttributeValue>> {
    attributes
        .iter()
        .map(|(key, value)| {
            let attr = MessageAttributeValue::builder()
                .data_type("String")
                .string_value(value)
                .build()
                .map_err(|e| CloudError::provider("SendMessage", e))?;
            Ok((key.clone(), attr))
        })
        .collect()
}

#[async_trait]
impl MessageQueue for SqsQueue {
    async fn get_queue_url(&self, queue_name: &str) -> Result<Option<String>> {
        let output = self
            .client
            .get_queue_url()
            .queue_name(queue_name)
            .send()
            .await
            .map_err(|e| CloudError::provider("GetQueueUrl", e))?;

        Ok(output.queue_url().map(str::to_string))
    }

    async fn send_message(
        &self,
        queue_url: &str,
        body: &str,
        attributes: &BTreeMap<String, String>,
    ) -> Result<Option<String>> {
        let message_attributes = if attributes.is_empty() {
            None
        } else {
            Some(to_sqs_attributes(attributes)?)
        };

        let output = self
            .client
            .send_message()
            .queue_url(queue_url)
            .message_body(body)
            .set_message_attributes(message_attributes)
            .send()
            .await
            .map_err(|e| CloudError::provider("SendMessage", e))?;

        Ok(output.message_id().map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_become_string_typed_values() {
        let attrs = BTreeMap::from([("tenant".to_string(), "42".to_string())]);
        let converted = to_sqs_attributes(&attrs).expect("convert");
        let value = &converted["tenant"];
        assert_eq!(value.data_type(), "String");
        assert_eq!(value.string_value(), Some("42"));
    }
}

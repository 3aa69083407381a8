use crate::errors::{CloudError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Wire payload of a secret version: exactly one of the two provider fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretPayload {
    /// `SecretString`, a JSON object
    Text(String),
    /// `SecretBinary`, base64 text of a JSON object
    Binary(Vec<u8>),
}

impl SecretPayload {
    /// Build a payload from the two optional response fields, rejecting
    /// responses that populate both or neither.
    pub fn from_fields(secret: &str, text: Option<&str>, binary: Option<&[u8]>) -> Result<Self> {
        match (text, binary) {
            (Some(text), None) => Ok(SecretPayload::Text(text.to_string())),
            (None, Some(binary)) => Ok(SecretPayload::Binary(binary.to_vec())),
            (Some(_), Some(_)) => Err(CloudError::MalformedSecretPayload {
                secret: secret.to_string(),
                reason: "both string and binary payloads are present".to_string(),
            }),
            (None, None) => Err(CloudError::MalformedSecretPayload {
                secret: secret.to_string(),
                reason: "neither a string nor a binary payload is present".to_string(),
            }),
        }
    }
}

/// Decoded key/value configuration fetched from the secrets store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretBundle(BTreeMap<String, String>);

impl SecretBundle {
    /// Decode a payload into a bundle.
    ///
    /// String payloads are parsed as a JSON object of string values. Binary
    /// payloads are base64-decoded first. Any decode failure is returned.
    pub fn decode(payload: &SecretPayload) -> Result<Self> {
        let entries: BTreeMap<String, String> = match payload {
            SecretPayload::Text(text) => serde_json::from_str(text)?,
            SecretPayload::Binary(encoded) => {
                let decoded = STANDARD.decode(encoded)?;
                serde_json::from_slice(&decoded)?
            }
        };
        Ok(Self(entries))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `key`, or the empty string when the key is absent
    pub fn field(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in sorted key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for SecretBundle {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self(entries)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SecretBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a SecretBundle {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_payload() {
        let payload = SecretPayload::Text(r#"{"A":"1","B":"2"}"#.to_string());
        let bundle = SecretBundle::decode(&payload).expect("decode");
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.get("A"), Some("1"));
        assert_eq!(bundle.get("B"), Some("2"));
    }

    #[test]
    fn decodes_base64_binary_payload() {
        let encoded = STANDARD.encode(r#"{"X":"y"}"#);
        let payload = SecretPayload::Binary(encoded.into_bytes());
        let bundle = SecretBundle::decode(&payload).expect("decode");
        assert_eq!(bundle, SecretBundle::from_iter([("X", "y")]));
    }

    #[test]
    fn invalid_base64_is_an_error() {
        let payload = SecretPayload::Binary(b"not base64 !!".to_vec());
        let err = SecretBundle::decode(&payload).expect_err("bad base64");
        assert!(matches!(err, CloudError::Base64(_)));
    }

    #[test]
    fn non_object_json_is_an_error() {
        let payload = SecretPayload::Text("plain-password".to_string());
        assert!(matches!(
            SecretBundle::decode(&payload),
            Err(CloudError::Json(_))
        ));

        let payload = SecretPayload::Text(r#"{"PORT":5432}"#.to_string());
        assert!(matches!(
            SecretBundle::decode(&payload),
            Err(CloudError::Json(_))
        ));
    }

    #[test]
    fn missing_field_is_empty_string() {
        let bundle = SecretBundle::from_iter([("user", "admin")]);
        assert_eq!(bundle.field("user"), "admin");
        assert_eq!(bundle.field("password"), "");
    }

    #[test]
    fn payload_requires_exactly_one_field() {
        assert_eq!(
            SecretPayload::from_fields("s", Some("{}"), None).expect("text"),
            SecretPayload::Text("{}".to_string())
        );
        assert_eq!(
            SecretPayload::from_fields("s", None, Some(b"e30=")).expect("binary"),
            SecretPayload::Binary(b"e30=".to_vec())
        );
        assert!(matches!(
            SecretPayload::from_fields("s", Some("{}"), Some(b"e30=")),
            Err(CloudError::MalformedSecretPayload { .. })
        ));
        assert!(matches!(
            SecretPayload::from_fields("s", None, None),
            Err(CloudError::MalformedSecretPayload { .. })
        ));
    }
}

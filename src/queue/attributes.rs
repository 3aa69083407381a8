use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Scalar attached to a queue message; sent as a string attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Boolean(b) => write!(f, "{}", b),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(x) => write!(f, "{}", x),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(i64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

/// Message attributes keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageAttributes(BTreeMap<String, AttributeValue>);

impl MessageAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String form of every attribute, as transmitted
    pub fn to_string_map(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for MessageAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parse a `key=value` command line attribute.
///
/// Values that look like booleans or numbers keep that type.
pub fn parse_attribute(raw: &str) -> Result<(String, AttributeValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("attribute '{}' must look like key=value", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("attribute '{}' has an empty key", raw));
    }

    let value = if let Ok(b) = value.parse::<bool>() {
        AttributeValue::Boolean(b)
    } else if let Ok(i) = value.parse::<i64>() {
        AttributeValue::Integer(i)
    } else if let Some(x) = value.parse::<f64>().ok().filter(|x| x.is_finite()) {
        AttributeValue::Float(x)
    } else {
        AttributeValue::Text(value.to_string())
    };
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_render_as_plain_strings() {
        let attrs = MessageAttributes::from_iter([
            ("retries", AttributeValue::from(3_i64)),
            ("ratio", AttributeValue::from(0.5_f64)),
            ("urgent", AttributeValue::from(true)),
            ("source", AttributeValue::from("billing")),
        ]);
        let map = attrs.to_string_map();
        assert_eq!(map["retries"], "3");
        assert_eq!(map["ratio"], "0.5");
        assert_eq!(map["urgent"], "true");
        assert_eq!(map["source"], "billing");
    }

    #[test]
    fn parses_typed_command_line_attributes() {
        assert_eq!(
            parse_attribute("count=12"),
            Ok(("count".to_string(), AttributeValue::Integer(12)))
        );
        assert_eq!(
            parse_attribute("flag=false"),
            Ok(("flag".to_string(), AttributeValue::Boolean(false)))
        );
        assert_eq!(
            parse_attribute("name=a=b"),
            Ok(("name".to_string(), AttributeValue::Text("a=b".to_string())))
        );
        assert_eq!(
            parse_attribute("label=NaN"),
            Ok(("label".to_string(), AttributeValue::Text("NaN".to_string())))
        );
        assert!(parse_attribute("novalue").is_err());
        assert!(parse_attribute("=x").is_err());
    }
}

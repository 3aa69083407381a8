pub mod attributes;
pub mod sqs;

pub use attributes::{AttributeValue, MessageAttributes, parse_attribute};
pub use sqs::SqsQueue;

use crate::config::{CloudConfig, DEFAULT_REGION, StaticCredentials};
use crate::errors::Result;
use crate::queue::{AttributeValue, parse_attribute};
use crate::secrets::CURRENT_VERSION_STAGE;
use crate::storage::DEFAULT_CONTENT_TYPE;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

pub fn args_checks() -> Args {
    Args::parse()
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// AWS region, fixed for every call
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// Override the service endpoint (e.g. http://localhost:4566); S3 switches to path-style
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// File holding the access key id; needs --secret-access-key-filepath
    #[arg(long, value_parser = check_readable_file, requires = "secret_access_key_filepath")]
    pub access_key_id_filepath: Option<PathBuf>,

    /// File holding the secret access key; needs --access-key-id-filepath
    #[arg(long, value_parser = check_readable_file, requires = "access_key_id_filepath")]
    pub secret_access_key_filepath: Option<PathBuf>,

    /// Seconds before each request is cancelled
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Attempts the SDK makes per request (1 = no retries)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Print extra stuff (use -v -v for even more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print a secret's key/value bundle as JSON
    SecretGet {
        name: String,
        /// Version stage to read
        #[arg(long, default_value = CURRENT_VERSION_STAGE)]
        stage: String,
    },
    /// Print one field of a secret (empty when missing)
    SecretField { name: String, field: String },
    /// Print a secret as environment assignments
    SecretEnv {
        name: String,
        /// Also set the variables in this process
        #[arg(long)]
        apply: bool,
        /// Print `export KEY='value'` lines for a shell to eval
        #[arg(long)]
        export: bool,
    },
    /// Print the URL of a queue
    QueueUrl { name: String },
    /// Send a message and print its id
    QueueSend {
        queue_url: String,
        payload: String,
        /// Message attribute as key=value; repeatable
        #[arg(short, long = "attribute", value_parser = parse_attribute)]
        attributes: Vec<(String, AttributeValue)>,
    },
    /// Upload a local file
    Upload {
        #[arg(value_parser = check_readable_file)]
        path: PathBuf,
        /// Bucket name or ARN
        bucket: String,
        key: String,
        #[arg(long, default_value = DEFAULT_CONTENT_TYPE)]
        content_type: String,
    },
}

impl Args {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.region.trim().is_empty() {
            return Err("--region must not be empty".to_string());
        }
        if let Command::SecretEnv {
            apply: true,
            export: true,
            ..
        } = self.command
        {
            return Err("--apply and --export cannot be combined".to_string());
        }
        if let Command::Upload { key, .. } = &self.command {
            if key.is_empty() {
                return Err("object key must not be empty".to_string());
            }
        }
        Ok(())
    }

    /// Client configuration described by these arguments
    pub fn to_cloud_config(&self) -> Result<CloudConfig> {
        let credentials = match (
            &self.access_key_id_filepath,
            &self.secret_access_key_filepath,
        ) {
            (Some(id_path), Some(secret_path)) => {
                Some(StaticCredentials::from_files(id_path, secret_path)?)
            }
            _ => None,
        };

        let config = CloudConfig {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            credentials,
            call_timeout: Duration::from_secs(self.timeout_secs),
            max_attempts: self.max_attempts,
            verbose: self.verbose,
        };
        config.validate()?;
        Ok(config)
    }
}

fn check_readable_file(file: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(file);
    if path.is_file() && File::open(&path).is_ok() {
        Ok(path)
    } else {
        Err(format!(
            "The file '{}' does not exist or is not readable.",
            file
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_to_us_east_1_and_ten_seconds() {
        let args = Args::parse_from(["cloud-client", "queue-url", "jobs"]);
        let config = args.to_cloud_config().expect("config");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.call_timeout, Duration::from_secs(10));
        assert_eq!(config.max_attempts, 1);
        assert!(config.credentials.is_none());
    }

    #[test]
    fn parses_repeated_attributes() {
        let args = Args::parse_from([
            "cloud-client",
            "queue-send",
            "https://sqs.us-east-1.amazonaws.com/123/jobs",
            "{\"id\":1}",
            "-a",
            "tenant=acme",
            "--attribute",
            "priority=3",
        ]);
        match args.command {
            Command::QueueSend { attributes, .. } => {
                assert_eq!(
                    attributes,
                    vec![
                        ("tenant".to_string(), AttributeValue::Text("acme".to_string())),
                        ("priority".to_string(), AttributeValue::Integer(3)),
                    ]
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn credential_files_must_come_in_pairs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let id = dir.path().join("id.txt");
        fs::write(&id, "AKIAEXAMPLE").expect("write");
        let id_arg = id.to_string_lossy().to_string();

        let result = Args::try_parse_from([
            "cloud-client",
            "--access-key-id-filepath",
            id_arg.as_str(),
            "queue-url",
            "jobs",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn reads_static_credentials_from_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let id = dir.path().join("id.txt");
        let secret = dir.path().join("secret.txt");
        fs::write(&id, "AKIAEXAMPLE\n").expect("write id");
        fs::write(&secret, "shh\n").expect("write secret");
        let id_arg = id.to_string_lossy().to_string();
        let secret_arg = secret.to_string_lossy().to_string();

        let args = Args::parse_from([
            "cloud-client",
            "--access-key-id-filepath",
            id_arg.as_str(),
            "--secret-access-key-filepath",
            secret_arg.as_str(),
            "secret-get",
            "app/config",
        ]);
        let creds = args
            .to_cloud_config()
            .expect("config")
            .credentials
            .expect("credentials");
        assert_eq!(creds.access_key_id, "AKIAEXAMPLE");
        assert_eq!(creds.secret_access_key, "shh");
    }

    #[test]
    fn rejects_apply_with_export() {
        let args = Args::parse_from(["cloud-client", "secret-env", "app", "--apply", "--export"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let result = Args::try_parse_from(["cloud-client", "--timeout-secs", "0", "queue-url", "q"]);
        assert!(result.is_err());
    }
}

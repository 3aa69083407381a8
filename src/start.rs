use crate::args::{Args, Command};
use crate::client::CloudClient;
use crate::interfaces::{CloudOperations, EnvironmentWriter};
use crate::queue::MessageAttributes;
use crate::secrets::{apply_bundle, render_env_lines};
use crate::storage::UploadRequest;
use crate::utils::log_utils::Logger;
use anyhow::Context;
use std::io::Write;

/// Connect with the configuration in `args` and run its command.
///
/// `secret-env --apply` writes through `env`.
pub fn run_app(args: &Args, env: &mut dyn EnvironmentWriter) -> anyhow::Result<()> {
    let config = args
        .to_cloud_config()
        .context("invalid client configuration")?;
    let client = CloudClient::connect(&config).context("failed to create cloud client")?;
    let stdout = std::io::stdout();
    run_command(&client, args, &mut stdout.lock(), env)
}

/// Run one command against `client`, writing results to `out`.
///
/// Only results go to `out`; diagnostics go through the [`Logger`] to stderr.
pub fn run_command(
    client: &dyn CloudOperations,
    args: &Args,
    out: &mut dyn Write,
    env: &mut dyn EnvironmentWriter,
) -> anyhow::Result<()> {
    let logger = Logger::new(args.verbose);

    match &args.command {
        Command::SecretGet { name, stage } => {
            let bundle = client
                .fetch_secret_bundle_at_stage(name, stage)
                .with_context(|| format!("failed to fetch secret '{}'", name))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&bundle)?)?;
        }
        Command::SecretField { name, field } => {
            let value = client
                .fetch_secret_field(name, field)
                .with_context(|| format!("failed to fetch secret '{}'", name))?;
            if value.is_empty() {
                logger.info(&format!("Field '{}' not present in secret '{}'", field, name));
            }
            writeln!(out, "{}", value)?;
        }
        Command::SecretEnv {
            name,
            apply,
            export,
        } => {
            let bundle = client
                .secret_environment(name)
                .with_context(|| format!("failed to fetch secret '{}'", name))?;
            for line in render_env_lines(&bundle, *export) {
                writeln!(out, "{}", line)?;
            }
            if *apply {
                apply_bundle(&bundle, env)
                    .context("failed to apply secret to environment")?;
                logger.info(&format!("Applied {} variables", bundle.len()));
            }
        }
        Command::QueueUrl { name } => {
            let url = client
                .resolve_queue_url(name)
                .with_context(|| format!("failed to resolve queue '{}'", name))?;
            writeln!(out, "{}", url)?;
        }
        Command::QueueSend {
            queue_url,
            payload,
            attributes,
        } => {
            let message_id = if attributes.is_empty() {
                client.enqueue_message(payload, queue_url)
            } else {
                let attributes: MessageAttributes = attributes.iter().cloned().collect();
                client.enqueue_message_with_attributes(payload, queue_url, &attributes)
            }
            .with_context(|| format!("failed to send message to {}", queue_url))?;
            writeln!(out, "{}", message_id)?;
        }
        Command::Upload {
            path,
            bucket,
            key,
            content_type,
        } => {
            let request = UploadRequest::new(path, bucket.as_str(), key.as_str(), content_type.as_str());
            client
                .upload_object(&request)
                .with_context(|| format!("failed to upload {}", path.display()))?;
            writeln!(out, "Uploaded {} to {}", path.display(), key)?;
        }
    }

    Ok(())
}

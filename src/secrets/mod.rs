pub mod bundle;
pub mod environment;
pub mod secrets_manager;

pub use bundle::{SecretBundle, SecretPayload};
pub use environment::{ProcessEnvironment, apply_bundle, render_env_lines};
pub use secrets_manager::SecretsManagerStore;

/// Version stage of the secret's current version
pub const CURRENT_VERSION_STAGE: &str = "AWSCURRENT";

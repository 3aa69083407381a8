pub mod args;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod queue;
pub mod secrets;
pub mod session;
pub mod start;
pub mod storage;
pub mod utils {
    pub mod log_utils;
}

pub use args::Args;
pub use client::CloudClient;
pub use config::CloudConfig;
pub use errors::{CloudError, Result};
pub use interfaces::CloudOperations;
pub use start::run_app;

use crate::errors::{CloudError, Result};
use crate::interfaces::EnvironmentWriter;
use crate::secrets::SecretBundle;

/// Writes into the current process environment.
///
/// Only obtainable through [`ProcessEnvironment::new`], whose contract makes
/// every later `set_var` sound. Prefer
/// [`crate::CloudOperations::secret_environment`] plus a writer of your own
/// when other threads may be running.
#[derive(Debug)]
pub struct ProcessEnvironment {
    _private: (),
}

impl ProcessEnvironment {
    /// # Safety
    ///
    /// For as long as the returned writer is used, no other thread may read
    /// or write the process environment except through `std::env`. This
    /// includes requests in flight on any [`crate::CloudClient`], since the
    /// AWS SDK can read credentials and region settings from the
    /// environment on its runtime threads.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl EnvironmentWriter for ProcessEnvironment {
    fn set_var(&mut self, key: &str, value: &str) -> Result<()> {
        check_env_pair(key, value)?;
        // SAFETY: upheld by the caller of `ProcessEnvironment::new`.
        unsafe { std::env::set_var(key, value) };
        Ok(())
    }
}

/// Reject pairs `std::env::set_var` would panic on
pub fn check_env_pair(key: &str, value: &str) -> Result<()> {
    let reason = if key.is_empty() {
        Some("name is empty")
    } else if key.contains('=') {
        Some("name contains '='")
    } else if key.contains('\0') {
        Some("name contains a NUL byte")
    } else if value.contains('\0') {
        Some("value contains a NUL byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CloudError::Environment {
            key: key.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Set every bundle entry through `writer`, in sorted key order.
///
/// Stops at the first failure and returns it; entries written before the
/// failure are left in place. Writing to the process environment needs a
/// [`ProcessEnvironment`], whose constructor carries the threading contract.
pub fn apply_bundle(bundle: &SecretBundle, writer: &mut dyn EnvironmentWriter) -> Result<()> {
    for (key, value) in bundle {
        writer.set_var(key, value)?;
    }
    Ok(())
}

/// Render the bundle as `KEY=value` lines, or as shell `export` lines
pub fn render_env_lines(bundle: &SecretBundle, export: bool) -> Vec<String> {
    bundle
        .iter()
        .map(|(key, value)| {
            if export {
                format!("export {}='{}'", key, value.replace('\'', r"'\''"))
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect()
}

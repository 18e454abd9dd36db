use std::process::Command;

use anyhow::Context;

use crate::error::Result;

/// Where the remote URL for the current repository comes from. Injectable
/// so the operations can be exercised without a git checkout.
pub trait ConfigSource {
    /// Value of `remote.origin.url`, or an empty string when unset.
    fn remote_origin_url(&self) -> Result<String>;
}

/// Reads configuration by asking the git binary itself.
pub struct GitConfig;

impl ConfigSource for GitConfig {
    fn remote_origin_url(&self) -> Result<String> {
        let output = Command::new("git")
            .args(["config", "remote.origin.url"])
            .output()
            .context("running git config")?;

        // Nonzero exit means the key is unset or this is not a repository;
        // the lookup key is simply blank and the store lookup will miss.
        if !output.status.success() {
            return Ok(String::new());
        }

        let value = String::from_utf8(output.stdout).context("reading git config output")?;
        Ok(value.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Fixed remote URL for tests.
#[cfg(test)]
pub(crate) struct FakeConfig(pub(crate) String);

#[cfg(test)]
impl ConfigSource for FakeConfig {
    fn remote_origin_url(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

//! Loading, overriding and validating `SuiteConfig`

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::SuiteConfig;

/// File name looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "redfish-validate.toml";

const REDACTED: &str = "********";

/// Values supplied on the command line; `None` keeps the file/default value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ipmi_host: Option<String>,
    pub ipmi_port: Option<u16>,
    pub strict_power: bool,
}

impl SuiteConfig {
    /// Parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: SuiteConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from an explicit path, or from the first discovered
    /// file, or fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match discover_config_file() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using discovered config file");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(base_url) = &overrides.base_url {
            self.redfish.base_url = base_url.clone();
        }
        if let Some(username) = &overrides.username {
            self.redfish.username = username.clone();
            self.ipmi.username = username.clone();
        }
        if let Some(password) = &overrides.password {
            self.redfish.password = password.clone();
            self.ipmi.password = password.clone();
        }
        if let Some(host) = &overrides.ipmi_host {
            self.ipmi.host = host.clone();
        }
        if let Some(port) = overrides.ipmi_port {
            self.ipmi.port = port;
        }
        if overrides.strict_power {
            self.power.strict = true;
        }
    }

    /// Reject configurations that cannot produce a meaningful run
    pub fn validate(&self) -> Result<()> {
        let base_url = self.redfish.base_url.trim();
        if base_url.is_empty() {
            bail!("redfish.base_url must not be empty");
        }
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            bail!("redfish.base_url must start with http:// or https://, got '{base_url}'");
        }
        if self.redfish.username.is_empty() {
            bail!("redfish.username must not be empty");
        }
        if self.redfish.system_id.is_empty() || self.redfish.system_id.contains('/') {
            bail!(
                "redfish.system_id must be a single path segment, got '{}'",
                self.redfish.system_id
            );
        }
        if self.redfish.request_timeout_secs == 0 {
            bail!("redfish.request_timeout_secs must be greater than zero");
        }
        if self.ipmi.timeout_secs == 0 {
            bail!("ipmi.timeout_secs must be greater than zero");
        }
        if self.power.poll_interval_secs == 0 {
            bail!("power.poll_interval_secs must be greater than zero");
        }
        if self.power.poll_interval_secs > self.power.poll_deadline_secs {
            bail!(
                "power.poll_interval_secs ({}) exceeds power.poll_deadline_secs ({})",
                self.power.poll_interval_secs,
                self.power.poll_deadline_secs
            );
        }
        if self.thermal.min_celsius >= self.thermal.max_celsius {
            bail!(
                "thermal.min_celsius ({}) must be below thermal.max_celsius ({})",
                self.thermal.min_celsius,
                self.thermal.max_celsius
            );
        }
        if self.thermal.cross_check_tolerance < 0.0 {
            bail!("thermal.cross_check_tolerance must not be negative");
        }
        Ok(())
    }

    /// Copy of the configuration safe to print
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.redfish.password.is_empty() {
            copy.redfish.password = REDACTED.to_string();
        }
        if !copy.ipmi.password.is_empty() {
            copy.ipmi.password = REDACTED.to_string();
        }
        copy
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }
}

/// Look for a config file in the working directory, then the user config dir
pub fn discover_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("redfish-validate").join("config.toml");
    user.is_file().then_some(user)
}

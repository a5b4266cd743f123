use anyhow::Result;

use crate::config::SuiteConfig;

/// Print the effective configuration as TOML with passwords redacted
pub fn execute(config: &SuiteConfig) -> Result<()> {
    let rendered = config.redacted().to_toml()?;
    print!("{rendered}");
    Ok(())
}

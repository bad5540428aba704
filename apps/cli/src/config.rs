//! CLI configuration loading and merging.

use anyhow::Context;
use auditor_core::{AuditorConfig, ClientOptions};
use std::path::Path;

/// Load and merge CLI configuration.
///
/// Configuration precedence:
/// 1. CLI arguments (`--base-url`, `--api-key`)
/// 2. Environment variables
/// 3. Explicit `--config` file, or else local `./.auditorrc` over global
///    `~/.auditor/config.toml`
/// 4. Defaults
pub fn load_config(
    config_path: Option<&Path>,
    base_url: Option<String>,
    api_key: Option<String>,
) -> anyhow::Result<AuditorConfig> {
    let mut config = match config_path {
        Some(path) => AuditorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AuditorConfig::discover_and_load(),
    };

    config.merge_env();
    config.merge(&AuditorConfig { base_url, api_key, ..AuditorConfig::default() });
    Ok(config)
}

/// Resolve transport options from merged configuration.
pub fn client_options(config: &AuditorConfig) -> anyhow::Result<ClientOptions> {
    Ok(config.client_options()?)
}

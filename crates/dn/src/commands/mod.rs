//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod expand;
pub(crate) mod resolve;
pub(crate) mod tree;

use std::path::PathBuf;

use clap::Args;
use dn_config::{CliSettings, Config};
use dn_nav::PrefixPolicy;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use expand::ExpandArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use tree::TreeArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Navigation declarations file (overrides config).
    #[arg(short, long, env = "DOCNAV_DECLARATIONS")]
    declarations: Option<PathBuf>,

    /// Prefix selection rule: declaration-order or longest-match (overrides config).
    #[arg(long)]
    prefix_policy: Option<PrefixPolicy>,

    /// Enable verbose output (debug logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            declarations: self.declarations.clone(),
            prefix_policy: self.prefix_policy,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            config = ?config.config_path,
            declarations = %config.navigation_resolved.declarations.display(),
            prefix_policy = %config.navigation_resolved.prefix_policy,
            "Configuration loaded"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_config_applies_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("docnav.toml");
        std::fs::write(
            &config_path,
            r#"
[navigation]
declarations = "site.toml"
prefix_policy = "declaration-order"
"#,
        )
        .unwrap();
        let args = CommonArgs {
            config: Some(config_path.clone()),
            declarations: None,
            prefix_policy: Some(PrefixPolicy::LongestMatch),
            verbose: false,
        };

        let config = args.load_config().unwrap();

        assert_eq!(config.config_path, Some(config_path));
        assert_eq!(
            config.navigation_resolved.declarations,
            dir.path().join("site.toml")
        );
        assert_eq!(
            config.navigation_resolved.prefix_policy,
            PrefixPolicy::LongestMatch
        );
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = CommonArgs {
            config: Some(dir.path().join("missing.toml")),
            declarations: None,
            prefix_policy: None,
            verbose: false,
        };

        let result = args.load_config();

        assert!(matches!(
            result,
            Err(CliError::Config(dn_config::ConfigError::NotFound(_)))
        ));
    }
}

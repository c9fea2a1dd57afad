use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".testfix.toml";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub results_dir: Option<String>,
    pub search_dir: Option<String>,
    pub mount_root: Option<String>,
    pub fix_limit: Option<usize>,
    pub skipped_limit: Option<usize>,
    pub error_preview: Option<usize>,
    pub fail_on_failures: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub results_dir: PathBuf,
    pub search_dir: PathBuf,
    pub mount_root: String,
    pub fix_limit: usize,
    pub skipped_limit: usize,
    pub error_preview: usize,
    pub fail_on_failures: bool,
}

impl Config {
    /// Load the config file (explicit `--config` path or the default file if present)
    /// and apply CLI overrides on top.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file_config = match cli.config {
            Some(ref path) => {
                let config_path = Path::new(path);
                if !config_path.exists() {
                    return Err(Error::ConfigNotFound(config_path.to_path_buf()));
                }
                parse_config(&std::fs::read_to_string(config_path)?)?
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    parse_config(&std::fs::read_to_string(default_path)?)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        let config = merge(file_config, cli);
        if config.fix_limit == 0 {
            return Err(Error::ConfigValidation(
                "fix_limit must be > 0".to_string(),
            ));
        }
        Ok(config)
    }
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(limit) = config.fix_limit
        && limit == 0
    {
        return Err(Error::ConfigValidation(
            "fix_limit must be > 0".to_string(),
        ));
    }
    if let Some(preview) = config.error_preview
        && preview == 0
    {
        return Err(Error::ConfigValidation(
            "error_preview must be > 0".to_string(),
        ));
    }
    if let Some(ref root) = config.mount_root
        && root.trim().is_empty()
    {
        return Err(Error::ConfigValidation(
            "mount_root must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn merge(file: ConfigFile, cli: &Cli) -> Config {
    let results_dir = cli
        .results_dir
        .clone()
        .or(file.results_dir)
        .unwrap_or_else(|| "test/test-results".to_string());
    // The locator falls back to wherever results land unless told otherwise.
    let search_dir = file.search_dir.unwrap_or_else(|| results_dir.clone());

    Config {
        results_dir: PathBuf::from(results_dir),
        search_dir: PathBuf::from(search_dir),
        mount_root: file.mount_root.unwrap_or_else(|| "/mnt".to_string()),
        fix_limit: cli.fix_limit.or(file.fix_limit).unwrap_or(2),
        skipped_limit: file.skipped_limit.unwrap_or(10),
        error_preview: file.error_preview.unwrap_or(80),
        fail_on_failures: !cli.no_fail && file.fail_on_failures.unwrap_or(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_parse_valid_config() {
        let toml = r#"
results_dir = "out"
search_dir = "/srv/reports"
mount_root = "/media"
fix_limit = 5
skipped_limit = 3
error_preview = 120
fail_on_failures = false
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.results_dir.as_deref(), Some("out"));
        assert_eq!(config.search_dir.as_deref(), Some("/srv/reports"));
        assert_eq!(config.fix_limit, Some(5));
        assert_eq!(config.fail_on_failures, Some(false));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_parse_zero_fix_limit() {
        let err = parse_config("fix_limit = 0").unwrap_err();
        assert!(err.to_string().contains("fix_limit must be > 0"));
    }

    #[test]
    fn test_parse_zero_error_preview() {
        let err = parse_config("error_preview = 0").unwrap_err();
        assert!(err.to_string().contains("error_preview must be > 0"));
    }

    #[test]
    fn test_parse_blank_mount_root() {
        let err = parse_config(r#"mount_root = "  ""#).unwrap_err();
        assert!(err.to_string().contains("mount_root must not be empty"));
    }

    #[test]
    fn test_parse_unknown_field() {
        let err = parse_config(r#"bogus = "value""#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let file = ConfigFile {
            results_dir: Some("file-out".to_string()),
            fix_limit: Some(7),
            skipped_limit: Some(4),
            fail_on_failures: Some(true),
            ..Default::default()
        };
        let cli = Cli::parse_from([
            "testfix",
            "--results-dir",
            "cli-out",
            "--fix-limit",
            "1",
            "--no-fail",
        ]);
        let config = merge(file, &cli);
        assert_eq!(config.results_dir, PathBuf::from("cli-out")); // CLI wins
        assert_eq!(config.fix_limit, 1); // CLI wins
        assert!(!config.fail_on_failures); // CLI wins
        assert_eq!(config.skipped_limit, 4); // file value kept
    }

    #[test]
    fn test_defaults_applied() {
        let config = merge(ConfigFile::default(), &Cli::parse_from(["testfix"]));
        assert_eq!(config.results_dir, PathBuf::from("test/test-results"));
        assert_eq!(config.search_dir, config.results_dir);
        assert_eq!(config.mount_root, "/mnt");
        assert_eq!(config.fix_limit, 2);
        assert_eq!(config.skipped_limit, 10);
        assert_eq!(config.error_preview, 80);
        assert!(config.fail_on_failures);
    }

    #[test]
    fn test_search_dir_follows_results_dir_override() {
        let cli = Cli::parse_from(["testfix", "--results-dir", "elsewhere"]);
        let config = merge(ConfigFile::default(), &cli);
        assert_eq!(config.search_dir, PathBuf::from("elsewhere"));
    }

    #[test]
    fn test_explicit_config_missing() {
        let cli = Cli::parse_from(["testfix", "--config", "/nonexistent/testfix.toml"]);
        let err = Config::load(&cli).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn test_explicit_config_loaded() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tf.toml");
        std::fs::write(&path, "fix_limit = 4\nmount_root = \"/media\"\n").unwrap();
        let cli = Cli::parse_from(["testfix", "--config", path.to_str().unwrap()]);
        let config = Config::load(&cli).unwrap();
        assert_eq!(config.fix_limit, 4);
        assert_eq!(config.mount_root, "/media");
    }

    #[test]
    fn test_cli_zero_fix_limit_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tf.toml");
        std::fs::write(&path, "").unwrap();
        let cli = Cli::parse_from([
            "testfix",
            "--config",
            path.to_str().unwrap(),
            "--fix-limit",
            "0",
        ]);
        let err = Config::load(&cli).unwrap_err();
        assert!(err.to_string().contains("fix_limit must be > 0"));
    }
}

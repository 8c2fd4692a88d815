//! Configuration loading and discovery for `cgrid.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::GridConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "cgrid.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse cgrid.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override export directory
    pub out: Option<PathBuf>,
    /// Override export scale factor
    pub scale: Option<u8>,
    /// Override export format
    pub format: Option<String>,
    /// Override clipboard backend
    pub clipboard: Option<String>,
}

/// Find cgrid.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for cgrid.toml
/// 2. Check XDG_CONFIG_HOME/colorgrid/cgrid.toml (or ~/.config/colorgrid/cgrid.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find cgrid.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("colorgrid").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find cgrid.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// If a path is provided, loads from that file (which must exist). Otherwise
/// uses `find_config()`; when nothing is found the defaults are returned.
pub fn load_config(path: Option<&Path>) -> Result<GridConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!("Loading config from {}", p.display());
            load_config_file(&p)
        }
        None => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
            Ok(GridConfig::default())
        }
    }
}

/// Load configuration from a specific file path.
///
/// A relative `export.out` is resolved against the file's directory.
fn load_config_file(path: &Path) -> Result<GridConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: GridConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    if let Some(root) = config_root(path) {
        config.export.out = resolve_path(root, &config.export.out);
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The merged result
/// is validated again so a bad override is reported like a bad config value.
pub fn merge_cli_overrides(
    config: &mut GridConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(ref out) = overrides.out {
        config.export.out = out.clone();
    }
    if let Some(scale) = overrides.scale {
        config.export.scale = scale;
    }
    if let Some(ref format) = overrides.format {
        config.export.format = format.clone();
    }
    if let Some(ref backend) = overrides.clipboard {
        config.clipboard.backend = backend.clone();
    }

    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors))
    }
}

/// Directory containing a config file.
pub fn config_root(config_path: &Path) -> Option<&Path> {
    config_path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Resolve a path relative to the config root.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"");

        let subdir = temp.path().join("a").join("b");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_config_from(temp.path().to_path_buf()), None);
    }

    #[test]
    #[serial]
    fn test_find_xdg_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let dir = temp.path().join("colorgrid");
        fs::create_dir_all(&dir).expect("should create xdg dir");
        let config_path = write_config(&dir, b"");

        let previous = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", temp.path());
        let found = find_xdg_config();
        match previous {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br##"
[[palette]]
code = "GY"
name = "Gray"
color = "#808080"

[export]
scale = 3
out = "exports"
"##,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.palette.len(), 1);
        assert_eq!(config.export.scale, 3);
        assert_eq!(config.export.out, temp.path().join("exports"));
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
[[presets]]
name = "Short"
code = "RD_RD_RD"
"#,
        );

        match load_config(Some(&config_path)) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("Short"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = GridConfig::default();
        let overrides = CliOverrides {
            out: Some(PathBuf::from("dist")),
            scale: Some(2),
            format: Some("jpg".to_string()),
            clipboard: Some("osc52".to_string()),
        };

        merge_cli_overrides(&mut config, &overrides).expect("overrides are valid");
        assert_eq!(config.export.out, PathBuf::from("dist"));
        assert_eq!(config.export.scale, 2);
        assert_eq!(config.export.format, "jpg");
        assert_eq!(config.clipboard.backend, "osc52");
    }

    #[test]
    fn test_merge_cli_overrides_rejects_bad_format() {
        let mut config = GridConfig::default();
        let overrides = CliOverrides {
            format: Some("bmp".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            merge_cli_overrides(&mut config, &overrides),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/project");
        assert_eq!(resolve_path(root, Path::new("/other")), PathBuf::from("/other"));
        assert_eq!(resolve_path(root, Path::new("out")), PathBuf::from("/project/out"));
    }

    #[test]
    fn test_config_root() {
        assert_eq!(config_root(Path::new("/project/cgrid.toml")), Some(Path::new("/project")));
        assert_eq!(config_root(Path::new("cgrid.toml")), None);
    }
}

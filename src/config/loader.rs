use std::fs;
use std::path::{Path, PathBuf};

use super::core::FlopmapConfig;
use crate::errors::{FlopmapError, Result};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".flopmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse a configuration from TOML text
pub fn parse_config(contents: &str) -> std::result::Result<FlopmapConfig, String> {
    toml::from_str::<FlopmapConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Load a configuration file the user named explicitly. Any failure is an error.
pub fn load_config_from_path(path: &Path) -> Result<FlopmapConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        FlopmapError::config(
            format!("Failed to read {}: {}", path.display(), e),
            Some(path.to_path_buf()),
        )
    })?;
    let config = parse_config(&contents)
        .map_err(|message| FlopmapError::config(message, Some(path.to_path_buf())))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Generate `start` and its ancestors, at most `max_depth` directories
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.flopmap.toml`.
///
/// A discovered file that cannot be read or parsed is skipped with a warning.
pub fn discover_config(start: PathBuf) -> Option<(PathBuf, FlopmapConfig)> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
        .find_map(|path| match load_config_from_path(&path) {
            Ok(config) => Some((path, config)),
            Err(e) => {
                tracing::warn!("{}. Using defaults.", e);
                None
            }
        })
}

/// Load the configuration: the explicit path if given, otherwise the nearest
/// discovered file, otherwise defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<FlopmapConfig> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!("Failed to get current directory: {}. Using default config.", e);
            return Ok(FlopmapConfig::default());
        }
    };

    Ok(discover_config(current)
        .map(|(_, config)| config)
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            FlopmapConfig::default()
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::output::OutputFormat;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(indoc! {r#"
            [model]
            seq_len = 1024
            num_heads = 16

            [output]
            format = "json"
            color = "never"

            [chart]
            enabled = false
            svg_path = "out.svg"
        "#})
        .unwrap();

        let model = config.model.unwrap();
        assert_eq!(model.seq_len, Some(1024));
        assert_eq!(model.hidden_dim, None);
        assert_eq!(config.output_format(), OutputFormat::Json);
        let chart = config.chart();
        assert!(!chart.enabled);
        assert_eq!(chart.svg_path, Some(PathBuf::from("out.svg")));
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let err = parse_config("[output]\nformat = \"yaml\"\n").unwrap_err();
        assert!(err.contains(".flopmap.toml"));
    }

    #[test]
    fn test_explicit_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, FlopmapError::Config { .. }));
        assert_eq!(err.path(), Some(&path));
    }

    #[test]
    fn test_discover_config_in_ancestor() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[model]\nseq_len = 64\n").unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let (path, config) = discover_config(nested).unwrap();
        assert_eq!(path, dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(config.model.unwrap().seq_len, Some(64));
    }

    #[test]
    fn test_discover_skips_invalid_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[model\n").unwrap();
        assert!(discover_config(dir.path().to_path_buf())
            .map(|(p, _)| p != dir.path().join(CONFIG_FILE_NAME))
            .unwrap_or(true));
    }

    #[test]
    fn test_directory_ancestors_bounded() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }
}

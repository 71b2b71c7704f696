//! Configuration loader for hdfeos-coords.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! `HDFEOS_*` environment variables (a `.env` file is honored), then
//! command-line flags. The YAML file supports `${VAR}` and
//! `${VAR:-default}` substitution.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grid_processor::GridProcessorConfig;
use serde::{Deserialize, Serialize};

/// Default list of input files, one path per line.
pub const DEFAULT_FILE_LIST: &str = "fileList.txt";

/// Settings for one run of the tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordsConfig {
    /// Text file listing the metadata files to process.
    pub file_list: PathBuf,

    /// Where to write the JSON report, if anywhere.
    pub report: Option<PathBuf>,

    /// Grid selection, literal policy and parallelism.
    #[serde(flatten)]
    pub processor: GridProcessorConfig,
}

impl Default for CoordsConfig {
    fn default() -> Self {
        Self {
            file_list: PathBuf::from(DEFAULT_FILE_LIST),
            report: None,
            processor: GridProcessorConfig::default(),
        }
    }
}

impl CoordsConfig {
    /// Defaults overlaid with the YAML file at `path` (if any) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => load_config_file(path)?,
            None => Self::default(),
        };
        config.processor.apply_env();
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.file_list.as_os_str().is_empty(),
            "file_list cannot be empty"
        );
        self.processor
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid processor configuration: {}", e))?;
        Ok(())
    }
}

/// Load and parse a YAML configuration file with environment variable substitution.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<CoordsConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;

    let expanded = expand_env_vars(&content)?;

    // An empty document deserializes to unit, not to a map.
    if expanded.trim().is_empty() {
        return Ok(CoordsConfig::default());
    }

    serde_yaml::from_str(&expanded)
        .with_context(|| format!("Failed to parse config YAML from {:?}", path.as_ref()))
}

/// Expand `${VAR}` and `${VAR:-default}` references.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .with_context(|| format!("Unclosed variable substitution: ${{{}", after))?;

        result.push_str(&resolve_var_expr(&after[..end])?);
        rest = &after[end + 1..];
    }
    result.push_str(rest);

    Ok(result)
}

fn resolve_var_expr(expr: &str) -> Result<String> {
    match expr.split_once(":-") {
        Some((name, default)) => match std::env::var(name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        },
        None => std::env::var(expr.trim())
            .with_context(|| format!("Environment variable {} not set", expr)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdfeos_parser::LiteralPolicy;
    use std::io::Write;

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("HDFEOS_COORDS_TEST_DIR", "/data/maiac");
        let result = expand_env_vars("file_list: ${HDFEOS_COORDS_TEST_DIR}/files.txt").unwrap();
        assert_eq!(result, "file_list: /data/maiac/files.txt");
    }

    #[test]
    fn test_expand_env_vars_with_default() {
        std::env::remove_var("HDFEOS_COORDS_UNSET");
        let result = expand_env_vars("grid_name: ${HDFEOS_COORDS_UNSET:-GRID_2}").unwrap();
        assert_eq!(result, "grid_name: GRID_2");
    }

    #[test]
    fn test_expand_env_vars_errors() {
        std::env::remove_var("HDFEOS_COORDS_REQUIRED");
        assert!(expand_env_vars("${HDFEOS_COORDS_REQUIRED}").is_err());
        assert!(expand_env_vars("grid_name: ${OPEN").is_err());
    }

    #[test]
    fn test_load_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "file_list: inputs.txt\nreport: out/report.json\ngrid_name: GRID_2\nliteral_policy: ignore\nparallel: false"
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.file_list, PathBuf::from("inputs.txt"));
        assert_eq!(config.report, Some(PathBuf::from("out/report.json")));
        assert_eq!(config.processor.grid_name, "GRID_2");
        assert_eq!(config.processor.literal_policy, LiteralPolicy::Ignore);
        assert!(!config.processor.parallel);
        assert_eq!(config.processor.grid_occurrence, 0);
    }

    #[test]
    fn test_load_partial_and_empty_yaml() {
        let mut partial = tempfile::NamedTempFile::new().unwrap();
        writeln!(partial, "grid_occurrence: 1").unwrap();
        let config = load_config_file(partial.path()).unwrap();
        assert_eq!(config.file_list, PathBuf::from(DEFAULT_FILE_LIST));
        assert_eq!(config.processor.grid_occurrence, 1);
        assert_eq!(config.processor.grid_name, "GRID_1");

        let empty = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(load_config_file(empty.path()).unwrap(), CoordsConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "literal_policy: maybe").unwrap();
        assert!(load_config_file(file.path()).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(CoordsConfig::default().validate().is_ok());

        let mut config = CoordsConfig::default();
        config.processor.grid_name = String::new();
        assert!(config.validate().is_err());
    }
}

// vendor-summary-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::{ConfigOverrides, Engine, SummaryConfig};
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["vendor_summary.yaml", "vendor_summary.yml"];

/// Layering: defaults <- YAML file <- environment. CLI flags are applied by the caller.
#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<SummaryConfig, InfrastructureError> {
    let mut config = match find_main_config(project_dir) {
        Some(path) => {
            info!(path = ?path, "Loading configuration");
            let content = fs::read_to_string(&path)?;
            parse_config(&content)?
        }
        None => {
            info!("No configuration file found, using defaults");
            SummaryConfig::default()
        }
    };

    let overrides = env_overrides(|key| std::env::var(key).ok())?;
    config.apply(&overrides);

    validate_config(&config)?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<SummaryConfig, InfrastructureError> {
    // An empty file deserializes to `null`; treat it as "all defaults".
    if content.trim().is_empty() {
        return Ok(SummaryConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

pub fn validate_config(config: &SummaryConfig) -> Result<(), InfrastructureError> {
    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))
}

fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

/// Reads `VENDOR_SUMMARY_*` overrides through `lookup` so tests need not touch the process env.
pub fn env_overrides<F>(lookup: F) -> Result<ConfigOverrides, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let engine = match lookup("VENDOR_SUMMARY_ENGINE") {
        Some(raw) => Some(
            raw.parse::<Engine>()
                .map_err(InfrastructureError::ConfigError)?,
        ),
        None => None,
    };

    let overrides = ConfigOverrides {
        engine,
        database: lookup("VENDOR_SUMMARY_DATABASE"),
        output_table: lookup("VENDOR_SUMMARY_OUTPUT_TABLE"),
        log_path: lookup("VENDOR_SUMMARY_LOG_PATH"),
    };
    if overrides != ConfigOverrides::default() {
        info!(?overrides, "Applying environment overrides");
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::summary::ZeroDenominatorPolicy;
    use anyhow::Result;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = load_project_config(dir.path())?;
        assert_eq!(config.output_table, "vendor_sales_summary");
        Ok(())
    }

    #[test]
    fn test_yaml_file_is_loaded() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("vendor_summary.yaml"),
            "engine: duckdb\n\
             database: warehouse.duckdb\n\
             zero-denominator: \"null\"\n\
             relations:\n  sales: sales_2024\n",
        )?;
        let config = load_project_config(dir.path())?;
        assert_eq!(config.engine, Engine::DuckDB);
        assert_eq!(config.database, "warehouse.duckdb");
        assert_eq!(config.zero_denominator, ZeroDenominatorPolicy::Null);
        assert_eq!(config.relations.sales, "sales_2024");
        assert_eq!(config.relations.purchases, "purchases");
        Ok(())
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let res = parse_config("engine: [oops");
        assert!(matches!(res, Err(InfrastructureError::YamlError(_))));
    }

    #[test]
    fn test_invalid_identifier_fails_validation() -> Result<()> {
        let config = parse_config("output-table: \"bad name\"")?;
        assert!(matches!(
            validate_config(&config),
            Err(InfrastructureError::ConfigError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_env_overrides() -> Result<()> {
        let env: HashMap<&str, &str> = HashMap::from([
            ("VENDOR_SUMMARY_ENGINE", "duckdb"),
            ("VENDOR_SUMMARY_OUTPUT_TABLE", "summary_v2"),
        ]);
        let overrides = env_overrides(|k| env.get(k).map(|v| v.to_string()))?;
        assert_eq!(overrides.engine, Some(Engine::DuckDB));
        assert_eq!(overrides.output_table.as_deref(), Some("summary_v2"));
        assert_eq!(overrides.database, None);
        Ok(())
    }

    #[test]
    fn test_bad_engine_override() {
        let res = env_overrides(|k| (k == "VENDOR_SUMMARY_ENGINE").then(|| "oracle".to_string()));
        assert!(matches!(res, Err(InfrastructureError::ConfigError(_))));
    }
}

// src/domain/project/configuration.rs

use crate::domain::compiler::identifier_re;
use crate::domain::summary::ZeroDenominatorPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use validator::Validate;

pub const IN_MEMORY: &str = ":memory:";

/// Store engine backing the run.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Sqlite,
    DuckDB,
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Engine::Sqlite),
            "duckdb" => Ok(Engine::DuckDB),
            other => Err(format!(
                "unknown engine '{}' (expected 'sqlite' or 'duckdb')",
                other
            )),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Sqlite => write!(f, "sqlite"),
            Engine::DuckDB => write!(f, "duckdb"),
        }
    }
}

/// Names of the four input relations as they exist in the store.
#[derive(Debug, Deserialize, Serialize, Clone, Validate, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct RelationNames {
    #[serde(default = "default_purchases")]
    #[validate(regex(
        path = *identifier_re(),
        code = "identifier",
        message = "Must be a plain SQL identifier"
    ))]
    pub purchases: String,

    #[serde(default = "default_purchase_prices")]
    #[validate(regex(
        path = *identifier_re(),
        code = "identifier",
        message = "Must be a plain SQL identifier"
    ))]
    pub purchase_prices: String,

    #[serde(default = "default_sales")]
    #[validate(regex(
        path = *identifier_re(),
        code = "identifier",
        message = "Must be a plain SQL identifier"
    ))]
    pub sales: String,

    #[serde(default = "default_vendor_invoice")]
    #[validate(regex(
        path = *identifier_re(),
        code = "identifier",
        message = "Must be a plain SQL identifier"
    ))]
    pub vendor_invoice: String,
}

impl Default for RelationNames {
    fn default() -> Self {
        Self {
            purchases: default_purchases(),
            purchase_prices: default_purchase_prices(),
            sales: default_sales(),
            vendor_invoice: default_vendor_invoice(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SummaryConfig {
    #[serde(default)]
    pub engine: Engine,

    #[serde(default = "default_database")]
    #[validate(length(min = 1, message = "Database path cannot be empty"))]
    pub database: String,

    #[serde(default = "default_output_table")]
    #[validate(regex(
        path = *identifier_re(),
        code = "identifier",
        message = "Must be a plain SQL identifier"
    ))]
    pub output_table: String,

    #[serde(default = "default_log_path")]
    #[validate(length(min = 1, message = "Log path cannot be empty"))]
    pub log_path: String,

    #[serde(default = "default_target_path")]
    pub target_path: String,

    #[serde(default)]
    pub zero_denominator: ZeroDenominatorPolicy,

    #[serde(default)]
    #[validate(nested)]
    pub relations: RelationNames,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            database: default_database(),
            output_table: default_output_table(),
            log_path: default_log_path(),
            target_path: default_target_path(),
            zero_denominator: ZeroDenominatorPolicy::default(),
            relations: RelationNames::default(),
        }
    }
}

impl SummaryConfig {
    /// Database location as handed to the adapter. `:memory:` passes through untouched.
    pub fn database_location(&self, project_dir: &Path) -> String {
        if self.database == IN_MEMORY {
            return self.database.clone();
        }
        project_dir.join(&self.database).to_string_lossy().into_owned()
    }

    pub fn log_file(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.log_path)
    }

    pub fn target_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.target_path)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(engine) = overrides.engine {
            self.engine = engine;
        }
        if let Some(database) = &overrides.database {
            self.database = database.clone();
        }
        if let Some(table) = &overrides.output_table {
            self.output_table = table.clone();
        }
        if let Some(log_path) = &overrides.log_path {
            self.log_path = log_path.clone();
        }
    }
}

/// Highest-precedence layer: values coming from the environment or the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub engine: Option<Engine>,
    pub database: Option<String>,
    pub output_table: Option<String>,
    pub log_path: Option<String>,
}

fn default_purchases() -> String {
    "purchases".to_string()
}
fn default_purchase_prices() -> String {
    "purchase_prices".to_string()
}
fn default_sales() -> String {
    "sales".to_string()
}
fn default_vendor_invoice() -> String {
    "vendor_invoice".to_string()
}
fn default_database() -> String {
    "inventory.db".to_string()
}
fn default_output_table() -> String {
    "vendor_sales_summary".to_string()
}
fn default_log_path() -> String {
    "logs/get_vendor_summary.log".to_string()
}
fn default_target_path() -> String {
    "target".to_string()
}

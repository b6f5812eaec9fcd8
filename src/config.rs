//! Settings for opening a [`TableStore`] outside of code.
//!
//! Values come from the process environment, after an optional `.env` file
//! in the working directory has been loaded into it.
//!
//! - `TABLESTORE_PATH`: the backing file (required)
//! - `TABLESTORE_COLUMNS`: comma separated columns used when the file has
//! to be created (optional)

use std::env;
use std::path::PathBuf;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::persistence::{TableResult, TableStore};

pub const PATH_VAR: &str = "TABLESTORE_PATH";
pub const COLUMNS_VAR: &str = "TABLESTORE_COLUMNS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("does not exist: environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },

    #[error("could not load .env: {0}")]
    DotEnv(#[from] dotenvy::Error),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StoreConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub initial_columns: Vec<String>,
}

impl StoreConfig {
    pub fn from_env() -> Result<StoreConfig, ConfigError> {
        //! Build the configuration from the environment.
        //!
        //! A missing `.env` file is not an error.

        match dotenvy::dotenv() {
            Ok(file) => debug!("loaded environment from {}", file.display()),
            Err(error) if error.not_found() => {}
            Err(error) => return Err(error.into()),
        }

        let path = match env::var(PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
            Ok(_) | Err(env::VarError::NotPresent) => {
                return Err(ConfigError::MissingVar(PATH_VAR));
            }
            Err(error) => {
                return Err(ConfigError::InvalidVar {
                    var: PATH_VAR,
                    reason: error.to_string(),
                });
            }
        };

        let initial_columns = env::var(COLUMNS_VAR)
            .map(|columns| parse_columns(&columns))
            .unwrap_or_default();

        Ok(StoreConfig {
            path,
            initial_columns,
        })
    }

    pub fn open(&self) -> TableResult<TableStore> {
        TableStore::open(&self.path, self.initial_columns.iter().cloned())
    }
}

fn parse_columns(columns: &str) -> Vec<String> {
    columns
        .split(',')
        .map(str::trim)
        .filter(|column| !column.is_empty())
        .map(String::from)
        .collect()
}

//! Conversion options and converter configuration from environment variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use ingredient_density::{DensityDataError, DensityTable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingredient_parser::RecipeParser;
use crate::recipe::RecipeConverter;

/// Environment variable naming an extra density file.
pub const DENSITIES_ENV_VAR: &str = "RECIPE_CONVERTER_DENSITIES";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Built-in density data is invalid: {0}")]
    BuiltinDensities(#[source] DensityDataError),

    #[error("Failed to read density file {}: {source}", .path.display())]
    ReadDensityFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid density file {}: {source}", .path.display())]
    DensityData {
        path: PathBuf,
        #[source]
        source: DensityDataError,
    },
}

/// Which measurement system to convert into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    ToMetric,
    ToUs,
}

/// Per-run conversion options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    pub direction: Direction,
    /// Log every line decision at info level instead of debug.
    pub verbose: bool,
}

impl ConvertOptions {
    pub fn to_us() -> Self {
        Self {
            direction: Direction::ToUs,
            verbose: false,
        }
    }
}

/// Where the converter's data comes from.
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    /// Extra density JSON layered over the built-in table.
    pub density_file: Option<PathBuf>,
    /// If false, a missing `density_file` is silently skipped.
    pub require_density_file: bool,
}

impl ConverterConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `RECIPE_CONVERTER_DENSITIES`: extra density file (must exist if set).
    ///   Otherwise `~/.recipe-converter/densities.json` is used when present.
    pub fn from_env() -> Self {
        match env::var(DENSITIES_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::with_density_file(path),
            _ => Self {
                density_file: Self::default_density_file(),
                require_density_file: false,
            },
        }
    }

    /// Use an explicit density file, which must exist.
    pub fn with_density_file(path: impl Into<PathBuf>) -> Self {
        Self {
            density_file: Some(path.into()),
            require_density_file: true,
        }
    }

    /// Get the default density file: ~/.recipe-converter/densities.json
    pub fn default_density_file() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".recipe-converter").join("densities.json"))
    }

    /// Build a converter with the built-in densities plus the configured file.
    pub fn build_converter(&self) -> Result<RecipeConverter, ConfigError> {
        let mut densities = DensityTable::builtin().map_err(ConfigError::BuiltinDensities)?;

        if let Some(path) = &self.density_file {
            if self.require_density_file || path.exists() {
                load_density_file(&mut densities, path)?;
            }
        }

        Ok(RecipeConverter::new(RecipeParser::new(), densities))
    }
}

fn load_density_file(densities: &mut DensityTable, path: &Path) -> Result<(), ConfigError> {
    let json = fs::read_to_string(path).map_err(|source| ConfigError::ReadDensityFile {
        path: path.to_path_buf(),
        source,
    })?;
    let added = densities
        .extend_from_json(&json)
        .map_err(|source| ConfigError::DensityData {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), added, "loaded extra ingredient densities");
    Ok(())
}

pub mod config;
pub mod error;
pub mod ingredient_parser;
pub mod metric_conversion;
pub mod recipe;
pub mod unit_variants;

pub use config::{ConfigError, ConvertOptions, ConverterConfig, Direction, DENSITIES_ENV_VAR};
pub use error::UnitTableError;
pub use ingredient_density::{ConversionError, DensityEntry, DensityTable};
pub use ingredient_parser::{parse_amount, ParsedLine, RecipeParser};
pub use metric_conversion::{
    convert_line, format_temperature, format_weight, LineConversion, SkipReason,
};
pub use recipe::{ConversionStats, ConvertedRecipe, RecipeConverter};
pub use unit_variants::{CanonicalUnit, UnitVariantTable, STANDARD_VARIANTS};

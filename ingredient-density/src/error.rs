use thiserror::Error;

/// Failure converting a quantity between units.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Unsupported unit: '{unit}'. Valid units are: {}", .valid.join(", "))]
    UnsupportedUnit {
        unit: String,
        valid: Vec<&'static str>,
    },

    #[error("Unsupported temperature conversion: {from} to {to}")]
    UnsupportedConversion { from: String, to: String },

    #[error("Cannot convert {grams} g of {ingredient} to a volume: density is zero")]
    DivisionByZero { ingredient: String, grams: f64 },
}

/// Failure loading density data.
#[derive(Error, Debug)]
pub enum DensityDataError {
    #[error("Invalid density JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid density for {name}: {grams_per_cup} g/cup")]
    InvalidDensity { name: String, grams_per_cup: f64 },
}

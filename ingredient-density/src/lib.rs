//! Unit conversion and ingredient density lookup.
//!
//! This crate converts quantities between volume units, weight units and
//! temperature scales, and provides density data (grams per US cup) for
//! common cooking ingredients so volumes can be bridged to weights.
//!
//! # Example
//!
//! ```
//! use ingredient_density::{DensityTable, VolumeUnit};
//!
//! let table = DensityTable::builtin().unwrap();
//! if let Some(flour) = table.get("all-purpose flour") {
//!     let grams = flour.volume_to_weight(2.0, VolumeUnit::Cup);
//!     println!("2 cups flour = {grams}g");
//! }
//! ```

mod density_lookup;
mod error;
mod units;

pub use density_lookup::{DensityEntry, DensityTable, DENSITY_REFERENCE_UNIT};
pub use error::{ConversionError, DensityDataError};
pub use units::{
    convert_temperature, convert_volume, convert_weight, TemperatureUnit, VolumeUnit, WeightUnit,
    GRAMS_PER_KG, GRAMS_PER_LB, GRAMS_PER_OZ, ML_PER_CUP, ML_PER_FL_OZ, ML_PER_GALLON, ML_PER_L,
    ML_PER_PINT, ML_PER_QUART, ML_PER_TBSP, ML_PER_TSP,
};

//! Metric conversion of a single parsed ingredient line.
//!
//! US volumes become weights through the density table, US weights become
//! grams directly and temperatures switch scale. Anything else keeps its
//! original text, with the reason recorded in [`SkipReason`].

use ingredient_density::{ConversionError, DensityTable, TemperatureUnit, VolumeUnit, WeightUnit};

use crate::config::Direction;
use crate::ingredient_parser::ParsedLine;
use crate::unit_variants::CanonicalUnit;

/// Result of formatting one ingredient line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineConversion {
    Converted(String),
    Unchanged(SkipReason),
}

impl LineConversion {
    /// Text to emit for `line`: the conversion, or the original text.
    pub fn into_text(self, line: &ParsedLine) -> String {
        match self {
            LineConversion::Converted(text) => text,
            LineConversion::Unchanged(_) => line.original_text.clone(),
        }
    }
}

/// Why a line was left as written.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoUnit,
    UnknownIngredient,
    UnsupportedDirection,
    ConversionFailed(ConversionError),
}

/// Convert one parsed line in the requested direction.
pub fn convert_line(
    line: &ParsedLine,
    direction: Direction,
    densities: &DensityTable,
) -> LineConversion {
    if !line.has_unit() {
        return LineConversion::Unchanged(SkipReason::NoUnit);
    }

    let unit: CanonicalUnit = match line.unit.parse() {
        Ok(unit) => unit,
        Err(e) => return LineConversion::Unchanged(SkipReason::ConversionFailed(e)),
    };

    match (unit, direction) {
        (CanonicalUnit::Volume(volume), Direction::ToMetric) if needs_density(volume) => {
            let Some(entry) = densities.get(&line.name) else {
                return LineConversion::Unchanged(SkipReason::UnknownIngredient);
            };
            let grams = entry.volume_to_weight(line.amount, volume);
            LineConversion::Converted(with_name(format_weight(grams), &line.name))
        }
        (
            CanonicalUnit::Weight(weight @ (WeightUnit::Pound | WeightUnit::Ounce)),
            Direction::ToMetric,
        ) => {
            let grams = weight.convert(line.amount, WeightUnit::Gram);
            LineConversion::Converted(with_name(format_weight(grams), &line.name))
        }
        (CanonicalUnit::Temperature(TemperatureUnit::Fahrenheit), Direction::ToMetric) => {
            convert_temperature(line, TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius)
        }
        (CanonicalUnit::Temperature(TemperatureUnit::Celsius), Direction::ToUs) => {
            convert_temperature(line, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit)
        }
        _ => LineConversion::Unchanged(SkipReason::UnsupportedDirection),
    }
}

/// US volume units whose metric form is a weight.
fn needs_density(unit: VolumeUnit) -> bool {
    matches!(
        unit,
        VolumeUnit::Cup | VolumeUnit::Tablespoon | VolumeUnit::Teaspoon | VolumeUnit::FluidOunce
    )
}

fn convert_temperature(
    line: &ParsedLine,
    from: TemperatureUnit,
    to: TemperatureUnit,
) -> LineConversion {
    match ingredient_density::convert_temperature(line.amount, from.symbol(), to.symbol()) {
        Ok(degrees) => {
            LineConversion::Converted(with_name(format_temperature(degrees, to), &line.name))
        }
        Err(e) => LineConversion::Unchanged(SkipReason::ConversionFailed(e)),
    }
}

/// Format a gram amount as mg below 1 g, whole grams below 1 kg, else kg.
pub fn format_weight(grams: f64) -> String {
    if grams < 1.0 {
        format!("{:.0} mg", grams * 1000.0)
    } else if grams < 1000.0 {
        format!("{:.0} g", grams)
    } else {
        format!("{:.2} kg", grams / 1000.0)
    }
}

/// Format a temperature rounded to whole degrees, e.g. "191°C".
pub fn format_temperature(degrees: f64, unit: TemperatureUnit) -> String {
    format!("{:.0}°{}", degrees, unit.letter())
}

fn with_name(quantity: String, name: &str) -> String {
    if name.is_empty() {
        quantity
    } else {
        format!("{quantity} {name}")
    }
}

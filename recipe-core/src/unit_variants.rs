//! Unit spelling variants recognised in recipe text.
//!
//! Maps every accepted spelling ("tbsp", "Tbsp.", "tablespoons", ...) to one
//! canonical unit. Variants are kept sorted longest first so that prefix
//! matching never stops at a shorter spelling (e.g. "cups" must match
//! before "cup", and "tbsp." before "tbsp").

use std::fmt;
use std::str::FromStr;

use ingredient_density::{ConversionError, TemperatureUnit, VolumeUnit, WeightUnit};
use serde::{Deserialize, Serialize};

use crate::error::UnitTableError;

/// The normalized unit a family of spellings stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalUnit {
    Volume(VolumeUnit),
    Weight(WeightUnit),
    Temperature(TemperatureUnit),
}

impl CanonicalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalUnit::Volume(unit) => unit.as_str(),
            CanonicalUnit::Weight(unit) => unit.as_str(),
            CanonicalUnit::Temperature(unit) => unit.as_str(),
        }
    }

    /// "volume", "weight" or "temperature".
    pub fn dimension(&self) -> &'static str {
        match self {
            CanonicalUnit::Volume(_) => "volume",
            CanonicalUnit::Weight(_) => "weight",
            CanonicalUnit::Temperature(_) => "temperature",
        }
    }

    /// Every canonical unit name, in declaration order.
    pub fn all_names() -> Vec<&'static str> {
        VolumeUnit::ALL
            .iter()
            .map(|u| u.as_str())
            .chain(WeightUnit::ALL.iter().map(|u| u.as_str()))
            .chain(TemperatureUnit::ALL.iter().map(|u| u.as_str()))
            .collect()
    }

    /// Look up a canonical unit by its canonical name ("cup", "fluid ounce", ...).
    pub fn from_name(name: &str) -> Option<Self> {
        VolumeUnit::ALL
            .iter()
            .map(|&u| CanonicalUnit::Volume(u))
            .chain(WeightUnit::ALL.iter().map(|&u| CanonicalUnit::Weight(u)))
            .chain(
                TemperatureUnit::ALL
                    .iter()
                    .map(|&u| CanonicalUnit::Temperature(u)),
            )
            .find(|u| u.as_str() == name)
    }
}

impl fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ConversionError::UnsupportedUnit {
            unit: s.to_string(),
            valid: Self::all_names(),
        })
    }
}

/// Spellings recognised for each canonical unit.
///
/// A bare "oz" is always a weight; fluid ounces need "fl oz" or "fluid ounce".
pub const STANDARD_VARIANTS: &[(CanonicalUnit, &[&str])] = &[
    // Volume - US
    (
        CanonicalUnit::Volume(VolumeUnit::Cup),
        &["cup", "cups", "c", "c."],
    ),
    (
        CanonicalUnit::Volume(VolumeUnit::Tablespoon),
        &[
            "tablespoon",
            "tablespoons",
            "tbsp",
            "tbsp.",
            "tbs",
            "tbs.",
            "T",
        ],
    ),
    (
        CanonicalUnit::Volume(VolumeUnit::Teaspoon),
        &["teaspoon", "teaspoons", "tsp", "tsp.", "t"],
    ),
    (
        CanonicalUnit::Volume(VolumeUnit::FluidOunce),
        &["fluid ounce", "fluid ounces", "fl oz", "fl. oz.", "fl oz."],
    ),
    (
        CanonicalUnit::Volume(VolumeUnit::Pint),
        &["pint", "pints", "pt", "pt."],
    ),
    (
        CanonicalUnit::Volume(VolumeUnit::Quart),
        &["quart", "quarts", "qt", "qt."],
    ),
    (
        CanonicalUnit::Volume(VolumeUnit::Gallon),
        &["gallon", "gallons", "gal", "gal."],
    ),
    // Weight - US
    (
        CanonicalUnit::Weight(WeightUnit::Pound),
        &["pound", "pounds", "lb", "lb.", "lbs", "lbs."],
    ),
    (
        CanonicalUnit::Weight(WeightUnit::Ounce),
        &["ounce", "ounces", "oz", "oz."],
    ),
    // Temperature
    (
        CanonicalUnit::Temperature(TemperatureUnit::Fahrenheit),
        &[
            "f",
            "fahrenheit",
            "degrees f",
            "degrees fahrenheit",
            "°f",
            "℉",
        ],
    ),
];

#[derive(Debug, Clone)]
struct UnitVariant {
    spelling: String,
    folded: String,
    unit: CanonicalUnit,
    /// Set when another unit has a spelling differing only by case ("T" vs "t").
    case_sensitive: bool,
}

impl UnitVariant {
    fn matches(&self, candidate: &str) -> bool {
        if self.case_sensitive {
            candidate == self.spelling
        } else {
            candidate.to_lowercase() == self.folded
        }
    }

    fn needs_word_boundary(&self) -> bool {
        self.spelling
            .chars()
            .last()
            .is_some_and(|c| c.is_alphanumeric())
    }
}

/// Lookup table from unit spelling to canonical unit.
#[derive(Debug, Clone)]
pub struct UnitVariantTable {
    /// Sorted by spelling length, longest first.
    variants: Vec<UnitVariant>,
}

impl Default for UnitVariantTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl UnitVariantTable {
    /// The US volume, weight and Fahrenheit spellings used in recipes.
    pub fn standard() -> Self {
        let (table, conflicts) = Self::index(STANDARD_VARIANTS.iter().copied());
        debug_assert!(conflicts.is_empty(), "standard unit table: {conflicts:?}");
        table
    }

    /// Build a table from custom spellings.
    ///
    /// Fails if one spelling is given for two different units, or if two
    /// spellings differing only by case name units of different dimensions.
    pub fn from_variants<'a, I>(entries: I) -> Result<Self, UnitTableError>
    where
        I: IntoIterator<Item = (CanonicalUnit, &'a [&'a str])>,
    {
        let (table, conflicts) = Self::index(entries);
        match conflicts.into_iter().next() {
            Some(conflict) => Err(conflict),
            None => Ok(table),
        }
    }

    fn index<'a, I>(entries: I) -> (Self, Vec<UnitTableError>)
    where
        I: IntoIterator<Item = (CanonicalUnit, &'a [&'a str])>,
    {
        let mut variants: Vec<UnitVariant> = Vec::new();
        let mut conflicts = Vec::new();

        for (unit, spellings) in entries {
            for &spelling in spellings {
                let folded = spelling.to_lowercase();
                // Case alone may only separate units of the same dimension.
                let clash = variants.iter().find(|v| {
                    v.unit != unit
                        && (v.spelling == spelling
                            || (v.folded == folded && v.unit.dimension() != unit.dimension()))
                });
                if let Some(existing) = clash {
                    conflicts.push(UnitTableError::AmbiguousVariant {
                        spelling: spelling.to_string(),
                        first: existing.unit,
                        second: unit,
                    });
                    continue;
                }
                if variants.iter().any(|v| v.spelling == spelling) {
                    continue;
                }
                variants.push(UnitVariant {
                    spelling: spelling.to_string(),
                    folded,
                    unit,
                    case_sensitive: false,
                });
            }
        }

        // Spellings that only differ by case from another unit's spelling
        // must match exactly.
        let folded_units: Vec<(String, CanonicalUnit)> = variants
            .iter()
            .map(|v| (v.folded.clone(), v.unit))
            .collect();
        for variant in &mut variants {
            variant.case_sensitive = folded_units
                .iter()
                .any(|(folded, unit)| *folded == variant.folded && *unit != variant.unit);
        }

        variants.sort_by(|a, b| {
            b.spelling
                .len()
                .cmp(&a.spelling.len())
                .then_with(|| a.spelling.cmp(&b.spelling))
        });

        (Self { variants }, conflicts)
    }

    /// Number of distinct spellings.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Look up a complete unit token.
    pub fn lookup(&self, token: &str) -> Option<CanonicalUnit> {
        self.variants
            .iter()
            .find(|v| v.case_sensitive && v.spelling == token)
            .or_else(|| {
                let folded = token.to_lowercase();
                self.variants
                    .iter()
                    .find(|v| !v.case_sensitive && v.folded == folded)
            })
            .map(|v| v.unit)
    }

    /// Normalize a unit token to its canonical name.
    ///
    /// Tokens that are not known spellings, even after stripping trailing
    /// periods, are returned lowercased with the periods stripped.
    pub fn normalize(&self, token: &str) -> String {
        let token = token.trim();
        if let Some(unit) = self.lookup(token) {
            return unit.as_str().to_string();
        }

        let stripped = token.trim_end_matches('.');
        match self.lookup(stripped) {
            Some(unit) => unit.as_str().to_string(),
            None => stripped.to_lowercase(),
        }
    }

    /// Find the longest spelling at the start of `text` that ends on a word
    /// boundary. Returns the matched slice of `text` and its unit.
    pub fn match_prefix<'t>(&self, text: &'t str) -> Option<(&'t str, CanonicalUnit)> {
        self.variants.iter().find_map(|variant| {
            let candidate = text.get(..variant.spelling.len())?;
            if !variant.matches(candidate) {
                return None;
            }
            if variant.needs_word_boundary() {
                let next = text[candidate.len()..].chars().next();
                if next.is_some_and(|c| c.is_alphanumeric() || c == '_') {
                    return None;
                }
            }
            Some((candidate, variant.unit))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUP: CanonicalUnit = CanonicalUnit::Volume(VolumeUnit::Cup);
    const TBSP: CanonicalUnit = CanonicalUnit::Volume(VolumeUnit::Tablespoon);
    const TSP: CanonicalUnit = CanonicalUnit::Volume(VolumeUnit::Teaspoon);
    const FL_OZ: CanonicalUnit = CanonicalUnit::Volume(VolumeUnit::FluidOunce);
    const OUNCE: CanonicalUnit = CanonicalUnit::Weight(WeightUnit::Ounce);
    const POUND: CanonicalUnit = CanonicalUnit::Weight(WeightUnit::Pound);
    const FAHRENHEIT: CanonicalUnit = CanonicalUnit::Temperature(TemperatureUnit::Fahrenheit);

    #[test]
    fn test_standard_table_has_no_ambiguous_variants() {
        let result = UnitVariantTable::from_variants(STANDARD_VARIANTS.iter().copied());
        assert!(result.is_ok(), "{:?}", result.err());
    }

    #[test]
    fn test_canonical_unit_from_str() {
        assert_eq!("fluid ounce".parse::<CanonicalUnit>(), Ok(FL_OZ));
        assert_eq!("pound".parse::<CanonicalUnit>(), Ok(POUND));
        let err = "lbs".parse::<CanonicalUnit>().unwrap_err();
        assert!(err.to_string().starts_with("Unsupported unit: 'lbs'"));
    }

    #[test]
    fn test_normalize_standard_units() {
        let table = UnitVariantTable::standard();
        assert_eq!(table.normalize("cups"), "cup");
        assert_eq!(table.normalize("TBSP"), "tablespoon");
        assert_eq!(table.normalize("tsp."), "teaspoon");
        assert_eq!(table.normalize("Fl. Oz."), "fluid ounce");
        assert_eq!(table.normalize("Lbs."), "pound");
        assert_eq!(table.normalize("c"), "cup");
        assert_eq!(table.normalize("oz"), "ounce");
        assert_eq!(table.normalize("°F"), "fahrenheit");
    }

    #[test]
    fn test_normalize_strips_trailing_periods() {
        let table = UnitVariantTable::standard();
        assert_eq!(table.normalize("cups."), "cup");
        assert_eq!(table.normalize("quarts.."), "quart");
    }

    #[test]
    fn test_normalize_unknown_passes_through() {
        let table = UnitVariantTable::standard();
        assert_eq!(table.normalize("unknown"), "unknown");
        assert_eq!(table.normalize("Bushel."), "bushel");
    }

    #[test]
    fn test_single_letter_spoons_are_case_sensitive() {
        let table = UnitVariantTable::standard();
        assert_eq!(table.lookup("T"), Some(TBSP));
        assert_eq!(table.lookup("t"), Some(TSP));
        // Other single letters still fold case
        assert_eq!(table.lookup("C"), Some(CUP));
        assert_eq!(table.lookup("F"), Some(FAHRENHEIT));
    }

    #[test]
    fn test_match_prefix_prefers_longest() {
        let table = UnitVariantTable::standard();
        assert_eq!(table.match_prefix("cups flour"), Some(("cups", CUP)));
        assert_eq!(table.match_prefix("Tablespoons butter"), Some(("Tablespoons", TBSP)));
        assert_eq!(table.match_prefix("tbsp. sugar"), Some(("tbsp.", TBSP)));
        assert_eq!(table.match_prefix("fl oz milk"), Some(("fl oz", FL_OZ)));
        assert_eq!(table.match_prefix("degrees fahrenheit"), Some(("degrees fahrenheit", FAHRENHEIT)));
    }

    #[test]
    fn test_match_prefix_requires_word_boundary() {
        let table = UnitVariantTable::standard();
        assert_eq!(table.match_prefix("chocolate chips"), None);
        assert_eq!(table.match_prefix("large eggs"), None);
        assert_eq!(table.match_prefix("ozone"), None);
        assert_eq!(table.match_prefix("lb, trimmed"), Some(("lb", POUND)));
        assert_eq!(table.match_prefix("oz"), Some(("oz", OUNCE)));
    }

    #[test]
    fn test_match_prefix_non_ascii() {
        let table = UnitVariantTable::standard();
        assert_eq!(table.match_prefix("°F oven"), Some(("°F", FAHRENHEIT)));
        assert_eq!(table.match_prefix("℉"), Some(("℉", FAHRENHEIT)));
        assert_eq!(table.match_prefix("é"), None);
    }

    #[test]
    fn test_from_variants_rejects_duplicates() {
        let entries: [(CanonicalUnit, &[&str]); 2] = [(CUP, &["cup", "c"]), (OUNCE, &["oz", "c"])];
        let err = UnitVariantTable::from_variants(entries).unwrap_err();
        assert_eq!(
            err,
            UnitTableError::AmbiguousVariant {
                spelling: "c".to_string(),
                first: CUP,
                second: OUNCE,
            }
        );
    }

    #[test]
    fn test_from_variants_rejects_case_clash_across_dimensions() {
        let celsius = CanonicalUnit::Temperature(TemperatureUnit::Celsius);
        let entries: [(CanonicalUnit, &[&str]); 2] = [(CUP, &["c"]), (celsius, &["C"])];
        let err = UnitVariantTable::from_variants(entries).unwrap_err();
        assert_eq!(
            err,
            UnitTableError::AmbiguousVariant {
                spelling: "C".to_string(),
                first: CUP,
                second: celsius,
            }
        );
    }

    #[test]
    fn test_from_variants_allows_case_clash_within_dimension() {
        let entries: [(CanonicalUnit, &[&str]); 2] = [(TBSP, &["T"]), (TSP, &["t"])];
        let table = UnitVariantTable::from_variants(entries).unwrap();
        assert_eq!(table.lookup("T"), Some(TBSP));
        assert_eq!(table.lookup("t"), Some(TSP));
    }

    #[test]
    fn test_canonical_unit_names() {
        assert_eq!(CanonicalUnit::from_name("fluid ounce"), Some(FL_OZ));
        assert_eq!(CanonicalUnit::from_name("pound"), Some(POUND));
        assert_eq!(CanonicalUnit::from_name("lbs"), None);
        assert!(CanonicalUnit::all_names().contains(&"celsius"));
    }
}

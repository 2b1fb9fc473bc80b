//! Ingredient density lookup for volume-to-weight conversion.
//!
//! Densities are stored as grams per US cup (236.588 ml).
//! The built-in table is embedded at compile time; callers may layer
//! their own entries on top with [`DensityTable::add`] or
//! [`DensityTable::extend_from_json`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ConversionError, DensityDataError};
use crate::units::VolumeUnit;

/// Reference volume unit for density values.
pub const DENSITY_REFERENCE_UNIT: VolumeUnit = VolumeUnit::Cup;

// =============================================================================
// Data structures
// =============================================================================

/// An ingredient with a known density.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityEntry {
    name: String,
    grams_per_cup: f64,
    aliases: Vec<String>,
}

impl DensityEntry {
    /// Build an entry; the name and aliases are lowercased.
    ///
    /// Lowercasing is `str::to_lowercase`, not full Unicode case folding:
    /// "Weißbier" and "WEISSBIER" stay distinct keys.
    pub fn new<I, S>(name: &str, grams_per_cup: f64, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.to_lowercase(),
            grams_per_cup,
            aliases: aliases
                .into_iter()
                .map(|a| a.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grams_per_cup(&self) -> f64 {
        self.grams_per_cup
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Weight in grams of `amount` of `unit` of this ingredient.
    pub fn volume_to_weight(&self, amount: f64, unit: VolumeUnit) -> f64 {
        unit.convert(amount, DENSITY_REFERENCE_UNIT) * self.grams_per_cup
    }

    /// Volume in `unit` occupied by `grams` of this ingredient.
    pub fn weight_to_volume(&self, grams: f64, unit: VolumeUnit) -> Result<f64, ConversionError> {
        if self.grams_per_cup == 0.0 {
            return Err(ConversionError::DivisionByZero {
                ingredient: self.name.clone(),
                grams,
            });
        }
        let cups = grams / self.grams_per_cup;
        Ok(DENSITY_REFERENCE_UNIT.convert(cups, unit))
    }
}

/// Density data file format.
#[derive(Deserialize)]
struct DensityDataFile {
    ingredients: Vec<DensityRecord>,
}

#[derive(Deserialize)]
struct DensityRecord {
    name: String,
    grams_per_cup: f64,
    #[serde(default)]
    aliases: Vec<String>,
    #[allow(dead_code)]
    #[serde(default)]
    source: Option<String>,
}

/// Embedded default density data.
static BUILTIN_JSON: &str = include_str!("data/densities.json");

/// Lookup table from ingredient name or alias to its density entry.
///
/// Several keys may share one entry. Adding an entry replaces whatever
/// each of its keys pointed to before.
#[derive(Debug, Clone, Default)]
pub struct DensityTable {
    entries: HashMap<String, Arc<DensityEntry>>,
}

impl DensityTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table of common baking ingredients shipped with the crate.
    pub fn builtin() -> Result<Self, DensityDataError> {
        Self::from_json(BUILTIN_JSON)
    }

    /// Build a table from density JSON.
    pub fn from_json(json: &str) -> Result<Self, DensityDataError> {
        let mut table = Self::new();
        table.extend_from_json(json)?;
        Ok(table)
    }

    /// Add every entry in `json` to this table, in file order.
    ///
    /// The whole file is validated before anything is inserted.
    /// Returns the number of entries added.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, DensityDataError> {
        let data: DensityDataFile = serde_json::from_str(json)?;

        if let Some(bad) = data
            .ingredients
            .iter()
            .find(|r| !r.grams_per_cup.is_finite() || r.grams_per_cup < 0.0)
        {
            return Err(DensityDataError::InvalidDensity {
                name: bad.name.clone(),
                grams_per_cup: bad.grams_per_cup,
            });
        }

        let count = data.ingredients.len();
        for record in data.ingredients {
            self.add(&record.name, record.grams_per_cup, &record.aliases);
        }
        Ok(count)
    }

    /// Index a new entry under its name and every alias.
    pub fn add<I, S>(&mut self, name: &str, grams_per_cup: f64, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = Arc::new(DensityEntry::new(name, grams_per_cup, aliases));
        self.entries.insert(entry.name.clone(), Arc::clone(&entry));
        for alias in &entry.aliases {
            self.entries.insert(alias.clone(), Arc::clone(&entry));
        }
    }

    /// Look up an ingredient by name or alias.
    ///
    /// Lookup order:
    /// 1. Lowercased name
    /// 2. Lowercased name with hyphens and underscores replaced by spaces
    ///
    /// Names are compared after `to_lowercase`, so "ß" does not match "ss".
    pub fn get(&self, name: &str) -> Option<&DensityEntry> {
        let lookup_name = name.to_lowercase();
        if let Some(entry) = self.entries.get(&lookup_name) {
            return Some(entry.as_ref());
        }

        let normalized = lookup_name.replace(['-', '_'], " ");
        self.entries.get(&normalized).map(|entry| entry.as_ref())
    }

    /// Number of lookup keys (names plus aliases).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct entries currently reachable from some key, sorted by name.
    pub fn entries(&self) -> Vec<&DensityEntry> {
        let mut seen: Vec<&DensityEntry> = Vec::new();
        for entry in self.entries.values() {
            if !seen.iter().any(|e| std::ptr::eq(*e, entry.as_ref())) {
                seen.push(entry.as_ref());
            }
        }
        seen.sort_by(|a, b| a.name.cmp(&b.name));
        seen
    }
}

// =============================================================================
// Tests
// =============================================================================

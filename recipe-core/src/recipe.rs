//! Whole-recipe conversion.
//!
//! Rewrites every convertible ingredient line of a recipe and leaves all
//! other text exactly as written.

use std::collections::HashMap;

use ingredient_density::{DensityDataError, DensityTable};
use serde::{Deserialize, Serialize};

use crate::config::{ConvertOptions, Direction};
use crate::ingredient_parser::{ParsedLine, RecipeParser};
use crate::metric_conversion::{self, LineConversion, SkipReason};

/// Statistics about one recipe conversion.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub total_lines: usize,
    pub ingredient_lines: usize,
    pub converted: usize,
    pub skipped_no_unit: usize,
    pub skipped_unknown_ingredient: usize,
    pub skipped_unsupported_direction: usize,
    pub skipped_conversion_failed: usize,
    /// Conversions whose text came out identical to the input.
    pub skipped_identical: usize,
    /// Ingredient names with no density entry, in first-seen order.
    pub unknown_ingredients: Vec<String>,
}

impl ConversionStats {
    fn record_skip(&mut self, line: &ParsedLine, reason: &SkipReason) {
        match reason {
            SkipReason::NoUnit => self.skipped_no_unit += 1,
            SkipReason::UnknownIngredient => {
                self.skipped_unknown_ingredient += 1;
                if !self.unknown_ingredients.contains(&line.name) {
                    self.unknown_ingredients.push(line.name.clone());
                }
            }
            SkipReason::UnsupportedDirection => self.skipped_unsupported_direction += 1,
            SkipReason::ConversionFailed(_) => self.skipped_conversion_failed += 1,
        }
    }
}

/// Output of [`RecipeConverter::convert_recipe`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedRecipe {
    pub text: String,
    /// Number of lines whose text changed.
    pub conversions: usize,
    pub stats: ConversionStats,
}

/// Converts recipes with one parser and one density table.
#[derive(Debug, Clone)]
pub struct RecipeConverter {
    parser: RecipeParser,
    densities: DensityTable,
}

impl RecipeConverter {
    pub fn new(parser: RecipeParser, densities: DensityTable) -> Self {
        Self { parser, densities }
    }

    /// A converter with the standard units and the built-in density table.
    pub fn with_builtin_densities() -> Result<Self, DensityDataError> {
        Ok(Self::new(RecipeParser::new(), DensityTable::builtin()?))
    }

    pub fn parser(&self) -> &RecipeParser {
        &self.parser
    }

    pub fn densities(&self) -> &DensityTable {
        &self.densities
    }

    pub fn densities_mut(&mut self) -> &mut DensityTable {
        &mut self.densities
    }

    /// Parse every ingredient line of `text`, in order.
    pub fn parse_recipe(&self, text: &str) -> Vec<ParsedLine> {
        self.parser.parse_recipe(text)
    }

    pub fn convert_line(&self, line: &ParsedLine, direction: Direction) -> LineConversion {
        metric_conversion::convert_line(line, direction, &self.densities)
    }

    /// Convert a full recipe.
    ///
    /// Output has the same lines as `text`. Ingredient lines that convert
    /// are rewritten, keeping their surrounding whitespace; every other
    /// line is copied unchanged.
    pub fn convert_recipe(&self, text: &str, options: &ConvertOptions) -> ConvertedRecipe {
        let parsed = self.parse_recipe(text);
        let mut by_text: HashMap<&str, &ParsedLine> = HashMap::new();
        for line in &parsed {
            by_text.entry(line.original_text.as_str()).or_insert(line);
        }

        let mut stats = ConversionStats::default();
        let mut output = Vec::new();

        for raw in text.split('\n') {
            stats.total_lines += 1;
            let Some(line) = by_text.get(raw.trim()).copied() else {
                output.push(raw.to_string());
                continue;
            };
            stats.ingredient_lines += 1;

            match self.convert_line(line, options.direction) {
                LineConversion::Converted(formatted) if formatted != line.original_text => {
                    log_line(options.verbose, &line.original_text, &formatted);
                    stats.converted += 1;
                    output.push(reindent(raw, &formatted));
                }
                LineConversion::Converted(_) => {
                    stats.skipped_identical += 1;
                    output.push(raw.to_string());
                }
                LineConversion::Unchanged(reason) => {
                    tracing::debug!(line = %line.original_text, ?reason, "ingredient left unchanged");
                    stats.record_skip(line, &reason);
                    output.push(raw.to_string());
                }
            }
        }

        if options.verbose {
            tracing::info!(
                converted = stats.converted,
                ingredients = stats.ingredient_lines,
                unknown = ?stats.unknown_ingredients,
                "recipe conversion finished"
            );
        } else {
            tracing::debug!(
                converted = stats.converted,
                ingredients = stats.ingredient_lines,
                "recipe conversion finished"
            );
        }

        ConvertedRecipe {
            text: output.join("\n"),
            conversions: stats.converted,
            stats,
        }
    }
}

fn log_line(verbose: bool, original: &str, converted: &str) {
    if verbose {
        tracing::info!(%original, %converted, "converted ingredient");
    } else {
        tracing::debug!(%original, %converted, "converted ingredient");
    }
}

/// Put `formatted` between the leading and trailing whitespace of `raw`.
fn reindent(raw: &str, formatted: &str) -> String {
    let body = raw.trim();
    let start = raw.len() - raw.trim_start().len();
    let leading = &raw[..start];
    let trailing = &raw[start + body.len()..];
    format!("{leading}{formatted}{trailing}")
}

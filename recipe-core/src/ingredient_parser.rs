//! Ingredient line parsing.
//!
//! Classifies a single line of recipe text as either an ingredient line
//! ("2 1/4 cups all-purpose flour") or ordinary text, extracting the
//! leading amount, the leading unit and the remaining ingredient name.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::unit_variants::{CanonicalUnit, UnitVariantTable};

/// One ingredient line broken into amount, unit and name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedLine {
    pub amount: f64,
    /// Canonical unit name, or empty when the line has no unit.
    pub unit: String,
    pub name: String,
    /// The trimmed source line.
    pub original_text: String,
}

impl ParsedLine {
    pub fn has_unit(&self) -> bool {
        !self.unit.is_empty()
    }

    /// The unit as a [`CanonicalUnit`], if it is one.
    pub fn canonical_unit(&self) -> Option<CanonicalUnit> {
        CanonicalUnit::from_name(&self.unit)
    }
}

/// Parser for ingredient lines, configured with a unit spelling table.
#[derive(Debug, Clone, Default)]
pub struct RecipeParser {
    units: UnitVariantTable,
}

impl RecipeParser {
    /// A parser recognising the standard US unit spellings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(units: UnitVariantTable) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &UnitVariantTable {
        &self.units
    }

    /// Parse every ingredient line in a recipe, in order.
    ///
    /// Blank lines and lines that are not ingredients are skipped.
    pub fn parse_recipe(&self, text: &str) -> Vec<ParsedLine> {
        text.split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| self.parse_line(line))
            .collect()
    }

    /// Parse a single line as an ingredient.
    ///
    /// Returns `None` unless the line starts with an amount, a unit, or
    /// both. A unit without an amount ("cup of flour") means one of it.
    pub fn parse_line(&self, line: &str) -> Option<ParsedLine> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (amount_str, remaining) = extract_amount(line);
        let (unit_str, remaining) = self.extract_unit(remaining);

        if amount_str.is_none() && unit_str.is_none() {
            return None;
        }

        let amount = match amount_str {
            Some(numeral) => parse_amount(numeral)?,
            None => 1.0,
        };

        let unit = unit_str
            .map(|token| self.units.normalize(token))
            .unwrap_or_default();

        Some(ParsedLine {
            amount,
            unit,
            name: clean_name(remaining),
            original_text: line.to_string(),
        })
    }

    /// Extract a unit from the beginning of a string.
    /// Returns (unit, remaining_string).
    fn extract_unit<'a>(&self, s: &'a str) -> (Option<&'a str>, &'a str) {
        let s = s.trim_start();
        match self.units.match_prefix(s) {
            Some((token, _)) => (Some(token), &s[token.len()..]),
            None => (None, s),
        }
    }
}

/// Extract a numeral from the beginning of a string.
/// Returns (numeral, remaining_string).
///
/// Recognises, in order: mixed numbers and fractions ("2 1/4", "3/4"),
/// decimals ("2.5") and integers ("2").
fn extract_amount(s: &str) -> (Option<&str>, &str) {
    let bytes = s.as_bytes();
    let lead = digit_run(bytes, 0);
    if lead == 0 {
        return (None, s);
    }

    let end = mixed_number_end(bytes, lead)
        .or_else(|| fraction_end(bytes, lead))
        .or_else(|| decimal_end(bytes, lead))
        .unwrap_or(lead);

    (Some(&s[..end]), &s[end..])
}

/// Length of the run of ASCII digits starting at `from`.
fn digit_run(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .map(|rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
        .unwrap_or(0)
}

/// "2 1/4": digits, whitespace, then a fraction.
fn mixed_number_end(bytes: &[u8], lead: usize) -> Option<usize> {
    let spaces = bytes[lead..]
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    if spaces == 0 {
        return None;
    }
    fraction_at(bytes, lead + spaces)
}

/// "3/4": the leading digits are a numerator.
fn fraction_end(bytes: &[u8], lead: usize) -> Option<usize> {
    fraction_at(bytes, 0).filter(|&end| end > lead)
}

fn fraction_at(bytes: &[u8], start: usize) -> Option<usize> {
    let numerator = digit_run(bytes, start);
    if numerator == 0 {
        return None;
    }
    let slash = start + numerator;
    if bytes.get(slash) != Some(&b'/') {
        return None;
    }
    let denominator = digit_run(bytes, slash + 1);
    (denominator > 0).then_some(slash + 1 + denominator)
}

/// "2.5": digits on both sides of the point.
fn decimal_end(bytes: &[u8], lead: usize) -> Option<usize> {
    if bytes.get(lead) != Some(&b'.') {
        return None;
    }
    let fraction = digit_run(bytes, lead + 1);
    (fraction > 0).then_some(lead + 1 + fraction)
}

/// Parse a numeral into a decimal value.
///
/// Handles:
/// - Integers: "8" → 8.0
/// - Decimals: "2.5" → 2.5
/// - Fractions: "1/2" → 0.5
/// - Mixed numbers: "2 1/4" → 2.25
///
/// Integer and fraction parts are summed exactly, at any size, before the
/// single conversion to floating point. Returns `None` for components that
/// are not integers or fractions, for zero denominators and for sums
/// beyond the range of `f64`.
pub fn parse_amount(numeral: &str) -> Option<f64> {
    let numeral = numeral.trim();
    if numeral.is_empty() {
        return None;
    }

    if numeral.contains('.') {
        let value: f64 = numeral.parse().ok()?;
        return value.is_finite().then_some(value);
    }

    let mut total = BigRational::zero();
    for part in numeral.split_whitespace() {
        total += parse_rational(part)?;
    }
    total.to_f64().filter(|value| value.is_finite())
}

/// Parse "3" or "3/4" exactly.
fn parse_rational(s: &str) -> Option<BigRational> {
    let (numerator, denominator) = s.split_once('/').unwrap_or((s, "1"));
    let numerator = parse_digits(numerator)?;
    let denominator = parse_digits(denominator)?;
    if denominator.is_zero() {
        return None;
    }
    Some(BigRational::new(numerator, denominator))
}

fn parse_digits(s: &str) -> Option<BigInt> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Trim the name, drop a leading "of " and surrounding commas.
fn clean_name(raw: &str) -> String {
    let name = raw.trim();
    let name = name.strip_prefix("of ").unwrap_or(name);
    name.trim_matches(',').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<ParsedLine> {
        RecipeParser::new().parse_line(line)
    }

    #[test]
    fn test_amount_and_unit() {
        let line = "2 cups all-purpose flour";
        let result = parse(line).unwrap();
        assert_eq!(result.amount, 2.0);
        assert_eq!(result.unit, "cup");
        assert_eq!(result.name, "all-purpose flour");
        assert_eq!(result.original_text, line);
    }

    #[test]
    fn test_longest_unit_variant_wins() {
        let result = parse("2 cups flour").unwrap();
        assert_eq!(result.unit, "cup");
        assert_eq!(result.name, "flour");
    }

    #[test]
    fn test_fraction() {
        let result = parse("1/2 cup sugar").unwrap();
        assert_eq!(result.amount, 0.5);
        assert_eq!(result.unit, "cup");
        assert_eq!(result.name, "sugar");

        assert_eq!(parse("3/4 cup sugar").unwrap().amount, 0.75);
    }

    #[test]
    fn test_mixed_number() {
        let result = parse("1 1/2 tsp vanilla extract").unwrap();
        assert_eq!(result.amount, 1.5);
        assert_eq!(result.unit, "teaspoon");
        assert_eq!(result.name, "vanilla extract");

        assert_eq!(parse("2 1/4 cups all-purpose flour").unwrap().amount, 2.25);
    }

    #[test]
    fn test_decimal() {
        let result = parse("2.5 tablespoons olive oil").unwrap();
        assert_eq!(result.amount, 2.5);
        assert_eq!(result.unit, "tablespoon");
        assert_eq!(result.name, "olive oil");
    }

    #[test]
    fn test_unit_without_amount() {
        let result = parse("cup of flour").unwrap();
        assert_eq!(result.amount, 1.0);
        assert_eq!(result.unit, "cup");
        assert_eq!(result.name, "flour");

        // "pinch" is not a unit
        assert!(parse("pinch of salt").is_none());
    }

    #[test]
    fn test_amount_without_unit() {
        let result = parse("2 eggs").unwrap();
        assert_eq!(result.amount, 2.0);
        assert_eq!(result.unit, "");
        assert!(!result.has_unit());
        assert_eq!(result.name, "eggs");
    }

    #[test]
    fn test_not_ingredients() {
        assert!(parse("").is_none());
        assert!(parse("   ").is_none());
        assert!(parse("INGREDIENTS:").is_none());
        assert!(parse("Chocolate Chip Cookies").is_none());
        assert!(parse("Preheat oven to 375°F.").is_none());
        assert!(parse("To serve, slice thinly").is_none());
    }

    #[test]
    fn test_zero_denominator_is_not_an_ingredient() {
        assert!(parse("1/0 cup flour").is_none());
        assert!(parse("2 3/0 cups flour").is_none());
    }

    #[test]
    fn test_large_numerals_are_exact() {
        let result = parse("18446744073709551616 cups flour").unwrap();
        assert_eq!(result.amount, 18446744073709551616.0);
        assert_eq!(result.unit, "cup");

        let result = parse("5000000000 1/5000000000 cups flour").unwrap();
        assert_eq!(result.amount, 5000000000.0);
        assert_eq!(result.name, "flour");
    }

    #[test]
    fn test_malformed_components_are_rejected() {
        assert_eq!(parse_amount("1/2/3"), None);
        assert_eq!(parse_amount("1 x/2"), None);
        assert_eq!(parse_amount("+3"), None);
    }

    #[test]
    fn test_trailing_comma_and_whitespace() {
        let result = parse("  1 cup sugar,  ").unwrap();
        assert_eq!(result.name, "sugar");
        assert_eq!(result.original_text, "1 cup sugar,");
    }

    #[test]
    fn test_comma_after_unit() {
        let result = parse("8 oz, cream cheese").unwrap();
        assert_eq!(result.unit, "ounce");
        assert_eq!(result.name, "cream cheese");
    }

    #[test]
    fn test_note_stays_in_name() {
        let result = parse("1 cup butter, softened").unwrap();
        assert_eq!(result.name, "butter, softened");
    }

    #[test]
    fn test_unit_abbreviations() {
        let result = parse("1 Tbsp. olive oil").unwrap();
        assert_eq!(result.unit, "tablespoon");
        assert_eq!(result.name, "olive oil");

        assert_eq!(parse("1 T butter").unwrap().unit, "tablespoon");
        assert_eq!(parse("1 t salt").unwrap().unit, "teaspoon");
        assert_eq!(parse("6 fl. oz. milk").unwrap().unit, "fluid ounce");
        assert_eq!(parse("2 lbs chicken thighs").unwrap().unit, "pound");
    }

    #[test]
    fn test_unit_must_end_on_word_boundary() {
        let result = parse("2 chocolate bars").unwrap();
        assert_eq!(result.unit, "");
        assert_eq!(result.name, "chocolate bars");
    }

    #[test]
    fn test_no_space_between_amount_and_unit() {
        let result = parse("350°F oven").unwrap();
        assert_eq!(result.amount, 350.0);
        assert_eq!(result.unit, "fahrenheit");
        assert_eq!(result.name, "oven");

        let result = parse("2cups milk").unwrap();
        assert_eq!(result.unit, "cup");
        assert_eq!(result.name, "milk");
    }

    #[test]
    fn test_name_may_be_empty() {
        let result = parse("2 cups").unwrap();
        assert_eq!(result.amount, 2.0);
        assert_eq!(result.unit, "cup");
        assert_eq!(result.name, "");
    }

    #[test]
    fn test_parse_recipe_skips_blank_and_text_lines() {
        let recipe = "Pancakes\n\n1 cup flour\r\n  2 eggs\nWhisk well.\n";
        let results = RecipeParser::new().parse_recipe(recipe);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "flour");
        assert_eq!(results[0].original_text, "1 cup flour");
        assert_eq!(results[1].name, "eggs");
    }

    #[test]
    fn test_parse_recipe_is_repeatable() {
        let parser = RecipeParser::new();
        let recipe = "1 cup flour\n3/4 cup sugar";
        assert_eq!(parser.parse_recipe(recipe), parser.parse_recipe(recipe));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("8"), Some(8.0));
        assert_eq!(parse_amount("2.5"), Some(2.5));
        assert_eq!(parse_amount("1/4"), Some(0.25));
        assert_eq!(parse_amount("2 3/4"), Some(2.75));
        assert_eq!(parse_amount("1/3"), Some(1.0 / 3.0));
        assert_eq!(parse_amount("1/0"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_extract_amount_forms() {
        assert_eq!(extract_amount("2 1/4 cups"), (Some("2 1/4"), " cups"));
        assert_eq!(extract_amount("3/4 cup"), (Some("3/4"), " cup"));
        assert_eq!(extract_amount("2.5 oz"), (Some("2.5"), " oz"));
        assert_eq!(extract_amount("2. eggs"), (Some("2"), ". eggs"));
        assert_eq!(extract_amount("2 eggs"), (Some("2"), " eggs"));
        assert_eq!(extract_amount("eggs"), (None, "eggs"));
    }
}

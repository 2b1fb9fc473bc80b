//! Reading, converting and writing one recipe.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use recipe_core::{ConvertOptions, RecipeConverter};

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Convert `input` into `output`, returning the number of converted lines.
///
/// The input is read completely before the output is opened, so a file
/// can be converted in place.
pub fn run(
    converter: &RecipeConverter,
    options: &ConvertOptions,
    input: &Path,
    output: &Path,
) -> Result<usize> {
    let text = if is_stdio(input) {
        read_all(io::stdin().lock()).context("Failed to read recipe from stdin")?
    } else {
        let file = File::open(input)
            .with_context(|| format!("Failed to open {}", input.display()))?;
        read_all(file).with_context(|| format!("Failed to read {}", input.display()))?
    };

    if is_stdio(output) {
        convert_stream(converter, options, &text, io::stdout().lock())
    } else {
        let file = File::create(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        convert_stream(converter, options, &text, BufWriter::new(file))
            .with_context(|| format!("Failed to write {}", output.display()))
    }
}

fn read_all(mut reader: impl Read) -> io::Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

/// Convert `text` and write the result to `writer`.
pub fn convert_stream<W: Write>(
    converter: &RecipeConverter,
    options: &ConvertOptions,
    text: &str,
    mut writer: W,
) -> Result<usize> {
    let converted = converter.convert_recipe(text, options);
    writer.write_all(converted.text.as_bytes())?;
    writer.flush()?;
    Ok(converted.conversions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn converter() -> RecipeConverter {
        RecipeConverter::with_builtin_densities().unwrap()
    }

    #[test]
    fn test_convert_stream() {
        let mut out = Vec::new();
        let count = convert_stream(
            &converter(),
            &ConvertOptions::default(),
            "Cookies\n1 cup flour\n",
            &mut out,
        )
        .unwrap();

        assert_eq!(count, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "Cookies\n120 g flour\n");
    }

    #[test]
    fn test_run_converts_file_in_place() {
        let path = env::temp_dir().join(format!("recipe-cli-{}.txt", std::process::id()));
        fs::write(&path, "8 oz chocolate\n").unwrap();

        let count = run(&converter(), &ConvertOptions::default(), &path, &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(count, 1);
        assert_eq!(written, "227 g chocolate\n");
    }

    #[test]
    fn test_run_missing_input_fails() {
        let missing = env::temp_dir().join("recipe-cli-does-not-exist.txt");
        let err = run(&converter(), &ConvertOptions::default(), &missing, Path::new("-"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to open"));
    }

    #[test]
    fn test_is_stdio() {
        assert!(is_stdio(Path::new("-")));
        assert!(!is_stdio(Path::new("recipe.txt")));
    }
}

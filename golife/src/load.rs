// load.rs - Resolving a pattern source to an initial population

use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::grid::Population;
use crate::parse::{parse_any, parse_plaintext, parse_rle};
use crate::patterns::{DEFAULT_PATTERN_NAME, builtin, default_population};

/// Loads a population from a file path or a built-in pattern name.
///
/// Files are tried first; `.rle` and `.cells`/`.txt` pick their reader by
/// extension, anything else is sniffed.
pub fn load(source: &str) -> Result<Population, LoadError> {
    let path = Path::new(source);
    if path.is_file() {
        return load_file(path);
    }
    builtin(source).unwrap_or_else(|| Err(LoadError::NotFound(source.to_string())))
}

fn load_file(path: &Path) -> Result<Population, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("rle") => parse_rle(&text),
        Some("cells") | Some("txt") => parse_plaintext(&text),
        _ => parse_any(&text),
    }
}

/// Loads `source`, falling back to the built-in default when it is absent or
/// unusable. Returns the population and the name of what was actually loaded.
///
/// Only a failure of the default itself is an error.
pub fn load_or_default(source: Option<&str>) -> Result<(Population, String), LoadError> {
    if let Some(source) = source {
        match load(source) {
            Ok(population) => {
                tracing::info!(source, cells = population.len(), "loaded pattern");
                return Ok((population, source.to_string()));
            }
            Err(err) => {
                tracing::warn!(source, error = %err, "failed to load pattern, using default");
            }
        }
    }

    let population = default_population()?;
    tracing::info!(cells = population.len(), "loaded default pattern");
    Ok((population, DEFAULT_PATTERN_NAME.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_pattern(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("golife-load-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_rle_file_by_extension() {
        let path = temp_pattern("glider.rle", "x = 3, y = 3\nbob$2bo$3o!");
        let pop = load(path.to_str().unwrap()).unwrap();
        assert_eq!(pop.len(), 5);
    }

    #[test]
    fn loads_plaintext_file_by_extension() {
        let path = temp_pattern("block.cells", "!Block\nOO\nOO\n");
        assert_eq!(load(path.to_str().unwrap()).unwrap().len(), 4);
    }

    #[test]
    fn sniffs_unknown_extension() {
        let path = temp_pattern("blinker.life", "#C sniffed\nx = 3, y = 1\n3o!");
        assert_eq!(load(path.to_str().unwrap()).unwrap().len(), 3);
    }

    #[test]
    fn builtin_names_resolve() {
        assert_eq!(load("glider").unwrap().len(), 5);
    }

    #[test]
    fn missing_source_is_not_found() {
        assert!(matches!(load("/no/such/pattern.rle"), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn falls_back_to_default() {
        let (pop, name) = load_or_default(Some("/no/such/pattern.rle")).unwrap();
        assert_eq!(name, DEFAULT_PATTERN_NAME);
        assert_eq!(pop.len(), 36);

        let path = temp_pattern("broken.rle", "x = 1, y = 1\no?!");
        let (_, name) = load_or_default(path.to_str()).unwrap();
        assert_eq!(name, DEFAULT_PATTERN_NAME);
    }

    #[test]
    fn no_source_loads_default() {
        let (pop, _) = load_or_default(None).unwrap();
        assert_eq!(pop.len(), 36);
    }
}

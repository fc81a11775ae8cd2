//! CSV-based assumption loader
//!
//! Loads illustration overrides from `illustration.csv` in data/assumptions/

use crate::error::{ProjectionError, ProjectionResult};
use std::fs::File;
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File name of the key/value override table
pub const ILLUSTRATION_FILE: &str = "illustration.csv";

/// Load `key,value` override rows from `illustration.csv` in the given directory
/// Returns the rows in file order; blank keys are skipped
pub fn load_illustration_overrides(path: &Path) -> ProjectionResult<Vec<(String, f64)>> {
    let file = File::open(path.join(ILLUSTRATION_FILE))?;
    read_overrides(file)
}

/// Parse override rows from any reader with a `key,value` header
pub fn read_overrides<R: std::io::Read>(source: R) -> ProjectionResult<Vec<(String, f64)>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(source);

    let mut overrides = Vec::new();

    for result in reader.records() {
        let record = result?;
        let key = record.get(0).unwrap_or("").to_string();
        if key.is_empty() {
            continue;
        }
        let raw = record.get(1).unwrap_or("");
        let value: f64 = raw.parse().map_err(|_| ProjectionError::MalformedAssumption {
            key: key.clone(),
            value: raw.to_string(),
        })?;
        overrides.push((key, value));
    }

    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_overrides() {
        let result = load_illustration_overrides(Path::new(DEFAULT_ASSUMPTIONS_PATH));
        assert!(result.is_ok(), "Failed to load assumptions: {:?}", result.err());

        let overrides = result.unwrap();
        assert!(overrides.iter().any(|(k, _)| k == "policy_growth_rate"));
    }

    #[test]
    fn test_comments_and_whitespace() {
        let data = "key,value\n# growth\npolicy_growth_rate, 0.05\n\nloan_to_value,0.9\n";
        let overrides = read_overrides(data.as_bytes()).unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides[0], ("policy_growth_rate".to_string(), 0.05));
    }

    #[test]
    fn test_malformed_value() {
        let data = "key,value\nloan_to_value,ninety\n";
        let err = read_overrides(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ProjectionError::MalformedAssumption { .. }));
    }
}

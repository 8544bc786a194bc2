use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Load a loan input file (terms or a comparison) from JSON.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let path = locate(path)?;
    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read loan file '{}': {}", path.display(), e))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| format!("'{}' is not a valid loan file: {}", path.display(), e))?;
    Ok(value)
}

/// Resolve a relative path against the working directory and require a regular file.
fn locate(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.is_file() {
        let reason = if resolved.exists() { "Not a file" } else { "File not found" };
        return Err(format!("{}: {}", reason, resolved.display()).into());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_calc_core::LoanTerms;
    use std::io::Write;

    #[test]
    fn test_read_loan_terms_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"principal":"18500","annual_rate_percent":"6.9","term_months":60,"start_date":"2025-01-10"}}"#
        )
        .unwrap();

        let terms: LoanTerms = read_json(file.path().to_str().unwrap()).unwrap();
        assert_eq!(terms.term_months, 60);
    }

    #[test]
    fn test_missing_file() {
        let err = read_json::<LoanTerms>("/no/such/loan.json").unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json::<LoanTerms>(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Not a file"));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"principal": "lots"}}"#).unwrap();
        let err = read_json::<LoanTerms>(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("is not a valid loan file"));
    }
}

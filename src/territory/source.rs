use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{AppError, AppResult};

use super::Territory;

const SILHOUETTE_EXTENSION: &str = "png";

/// `united_kingdom` → `UNITED KINGDOM`.
pub fn format_territory_name(raw: &str) -> String {
    raw.trim().replace('_', " ").to_uppercase()
}

/// Loads territories from a JSON array file or from a directory of silhouette images.
pub fn load_territories(path: impl AsRef<Path>) -> AppResult<Vec<Territory>> {
    let path = path.as_ref();
    if path.is_dir() {
        return load_silhouette_dir(path);
    }

    let raw = fs::read_to_string(path).map_err(|source| {
        AppError::io_with_context(
            source,
            format!("failed to read territories: {}", path.display()),
        )
    })?;
    parse_territories_json(&raw).map_err(|err| match err {
        AppError::InvalidArgument(message) => AppError::invalid_territory_data(path, message),
        other => other,
    })
}

/// Parses a JSON array of territories. Entries of any other shape are skipped.
pub fn parse_territories_json(raw: &str) -> AppResult<Vec<Territory>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| AppError::invalid_argument(format!("malformed JSON: {err}")))?;
    let Value::Array(entries) = value else {
        return Err(AppError::invalid_argument("expected a JSON array"));
    };

    let total = entries.len();
    let territories: Vec<Territory> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<Territory>(entry).ok())
        .collect();
    if territories.len() < total {
        tracing::warn!(
            skipped = total - territories.len(),
            "skipped territory entries that are neither strings nor records"
        );
    }
    Ok(territories)
}

fn load_silhouette_dir(dir: &Path) -> AppResult<Vec<Territory>> {
    let entries = fs::read_dir(dir).map_err(|source| {
        AppError::io_with_context(
            source,
            format!("failed to list silhouettes: {}", dir.display()),
        )
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_silhouette = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SILHOUETTE_EXTENSION));
        if !is_silhouette {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            names.push(format_territory_name(stem));
        }
    }
    names.sort();
    names.dedup();
    Ok(names.into_iter().map(Territory::Name).collect())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::error::AppError;
    use crate::territory::Territory;

    use super::{format_territory_name, load_territories, parse_territories_json};

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("tguess_territory_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[test]
    fn format_territory_name_matches_silhouette_stems() {
        assert_eq!(format_territory_name("united_kingdom"), "UNITED KINGDOM");
        assert_eq!(format_territory_name(" chad "), "CHAD");
    }

    #[test]
    fn parse_skips_entries_that_are_not_territories() {
        let parsed = parse_territories_json(r#"["Fiji", 42, null, {"name": "Togo", "code": "TG"}]"#)
            .expect("array should parse");
        assert_eq!(
            parsed,
            vec![Territory::named("Fiji"), Territory::with_code("Togo", "TG")]
        );
    }

    #[test]
    fn parse_rejects_non_arrays() {
        assert!(parse_territories_json(r#"{"name": "Fiji"}"#).is_err());
        assert!(parse_territories_json("not json").is_err());
    }

    #[test]
    fn load_territories_reads_silhouette_directory() {
        let dir = unique_temp_path("silhouettes");
        fs::create_dir_all(&dir).expect("temp dir should be created");
        for file in ["south_africa.png", "peru.PNG", "notes.txt"] {
            fs::write(dir.join(file), b"").expect("fixture should be written");
        }

        let loaded = load_territories(&dir).expect("directory should load");
        assert_eq!(
            loaded,
            vec![Territory::named("PERU"), Territory::named("SOUTH AFRICA")]
        );

        fs::remove_dir_all(&dir).expect("temp dir should be removed");
    }

    #[test]
    fn load_territories_reports_bad_file_with_path() {
        let path = unique_temp_path("bad.json");
        fs::write(&path, "{}").expect("fixture should be written");

        let err = load_territories(&path).expect_err("object is not a territory list");
        assert!(matches!(err, AppError::InvalidTerritoryData { .. }));

        fs::remove_file(&path).expect("fixture should be removed");
    }
}

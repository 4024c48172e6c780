//! Catalog loading from JSON files

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

use super::CatalogFile;

/// Load a catalog from JSON, gunzipping when the path ends in `.gz`
pub fn load_catalog(path: impl AsRef<Path>) -> Result<CatalogFile> {
    let path = path.as_ref();
    log::info!("Loading catalog from {:?}", path);

    let file =
        File::open(path).with_context(|| format!("Failed to open catalog file: {:?}", path))?;
    let reader = BufReader::new(file);

    let catalog: CatalogFile = if path.extension().is_some_and(|ext| ext == "gz") {
        serde_json::from_reader(GzDecoder::new(reader))
            .with_context(|| "Failed to parse gzipped catalog JSON")?
    } else {
        serde_json::from_reader(reader).with_context(|| "Failed to parse catalog JSON")?
    };

    log::info!(
        "Loaded {} catalog entries (generated at {})",
        catalog.objects.len(),
        catalog.generated_at
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_json_shape() {
        let json = r#"{
            "generated_at": "2026-08-01T00:00:00Z",
            "objects": {
                "25544": {
                    "norad_cat_id": 25544,
                    "name": "ISS (ZARYA)",
                    "mass_kg": 420000.0,
                    "tle": {
                        "epoch": "2026-08-01",
                        "line1": "1 25544U 98067A   ...",
                        "line2": "2 25544  51.6400 ..."
                    }
                },
                "99999": {
                    "norad_cat_id": 99999,
                    "name": null,
                    "mass_kg": null,
                    "tle": null
                }
            }
        }"#;

        let catalog: CatalogFile = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.objects.len(), 2);

        let with_tle = catalog.records_with_tle();
        assert_eq!(with_tle.len(), 1);
        assert_eq!(with_tle[0].norad_cat_id, 25544);
        assert_eq!(with_tle[0].mass_kg, Some(420000.0));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_catalog("does/not/exist.json").is_err());
    }
}

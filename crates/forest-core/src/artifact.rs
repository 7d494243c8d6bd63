//! JSON input and artifact I/O.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::correction::CorrectionTable;
use crate::error::{PipelineError, Result};
use crate::model::NationalForest;
use crate::paths::{self, DataDir};

/// Read and parse a whole JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| PipelineError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a list of records, logging how many were read.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let records: Vec<T> = read_json(path)?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

pub fn load_forests(path: &Path) -> Result<Vec<NationalForest>> {
    let forests: Vec<NationalForest> = read_json(path)?;
    let districts: usize = forests.iter().map(|f| f.ranger_districts.len()).sum();
    info!(
        "Loaded {} forests with {} ranger districts from {}",
        forests.len(),
        districts,
        path.display()
    );
    Ok(forests)
}

/// `corrections.json` if the data directory has one, else the built-in table.
pub fn load_corrections(dir: &DataDir) -> Result<CorrectionTable> {
    let path = dir.file(paths::CORRECTIONS);
    if !path.exists() {
        return Ok(CorrectionTable::default());
    }
    let table: CorrectionTable = read_json(&path)?;
    info!("Loaded {} corrections from {}", table.0.len(), path.display());
    Ok(table)
}

/// Write `forests` as pretty JSON. The document goes to a temporary file in
/// the same directory first and is renamed over `path` once complete.
pub fn save_forests(path: &Path, forests: &[NationalForest]) -> Result<()> {
    let write_err = |source: io::Error| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    let mut writer = BufWriter::new(tmp);
    serde_json::to_writer_pretty(&mut writer, forests).map_err(|e| write_err(io::Error::from(e)))?;
    writer.write_all(b"\n").map_err(write_err)?;
    let tmp = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!("Wrote {} forests to {}", forests.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::records::MvumRoadRecord;
    use crate::model::RangerDistrict;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(paths::FORESTS_WITH_DISTRICTS);
        let mut forest = NationalForest { name: "Test".into(), org_code: 501, ..Default::default() };
        forest.routes.mvum_roads.total_mileage = 12.5;
        forest.ranger_districts.push(RangerDistrict { name: "North".into(), ..Default::default() });

        save_forests(&path, &[forest.clone()]).unwrap();
        let loaded = load_forests(&path).unwrap();
        assert_eq!(loaded, vec![forest]);

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  {\n    \"OBJECTID\""));
        assert!(text.contains("\"TOTAL_MILEAGE\": 12.5"));
    }

    #[test]
    fn save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "stale").unwrap();
        save_forests(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
        // Only the artifact is left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_input_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(paths::MVUM_ROADS);
        let err = load_records::<MvumRoadRecord>(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Read { .. }));
        assert!(err.to_string().contains(paths::MVUM_ROADS));
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[{").unwrap();
        assert!(matches!(load_forests(&path), Err(PipelineError::Parse { .. })));
    }

    #[test]
    fn corrections_default_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        assert_eq!(load_corrections(&data).unwrap(), CorrectionTable::default());

        fs::write(data.file(paths::CORRECTIONS), "[]").unwrap();
        assert!(load_corrections(&data).unwrap().0.is_empty());
    }
}

use crate::error::{LvsegError, Result};
use serde::Deserialize;
use std::path::Path;

/// Name of the patient link table inside a dataset directory
pub const LINK_FILE: &str = "link.csv";

/// One row of `link.csv`
///
/// Maps the DICOM directory name (`patient_id`) to the contour directory
/// name (`original_id`) of the same study.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct PatientLink {
    pub patient_id: String,
    pub original_id: String,
}

/// Reads the patient link table
///
/// Columns are matched by header name, surrounding whitespace is trimmed and
/// extra columns are ignored.
///
/// # Errors
///
/// Returns [`LvsegError::Link`] if the file cannot be read or a row lacks
/// either column.
pub fn read_links<P: AsRef<Path>>(path: P) -> Result<Vec<PatientLink>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| LvsegError::Link(format!("{}: {}", path.display(), e)))?;

    let links = reader
        .deserialize::<PatientLink>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if let Some(link) = links
        .iter()
        .find(|l| l.patient_id.is_empty() || l.original_id.is_empty())
    {
        return Err(LvsegError::Link(format!(
            "{}: empty identifier in row {:?}",
            path.display(),
            link
        )));
    }

    Ok(links)
}

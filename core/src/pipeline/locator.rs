use crate::error::Result;
use crate::parsing::{read_links, ContourFileName, PatientLink, LINK_FILE};
use crate::types::{ContourKind, ContourSelection};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Directory holding one DICOM subdirectory per patient
pub const DICOM_DIR: &str = "dicoms";

/// Directory holding one contour subdirectory per study
pub const CONTOUR_DIR: &str = "contourfiles";

/// File paths of one annotated slice
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SamplePaths {
    /// DICOM directory name from `link.csv`
    pub patient_id: String,

    /// Contour directory name from `link.csv`
    pub original_id: String,

    /// Slice number shared by the DICOM and contour file names
    pub slice: u32,

    /// Path to the DICOM slice
    pub dicom: PathBuf,

    /// Path to the i-contour file
    pub inner_contour: PathBuf,

    /// Path to the o-contour file, when one was drawn for this slice
    pub outer_contour: Option<PathBuf>,
}

/// Maps patients to their annotated slices inside a dataset directory
///
/// # Example
///
/// ```no_run
/// use lvseg_core::{ContourSelection, SampleLocator};
///
/// let samples = SampleLocator::new("./final_data")
///     .locate_all(ContourSelection::InnerOnly)
///     .unwrap();
/// println!("{} annotated slices", samples.len());
/// ```
#[derive(Debug, Clone)]
pub struct SampleLocator {
    base_dir: PathBuf,
}

impl SampleLocator {
    /// Creates a locator rooted at a dataset directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Dataset root
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Reads `link.csv` from the dataset root
    pub fn read_links(&self) -> Result<Vec<PatientLink>> {
        read_links(self.base_dir.join(LINK_FILE))
    }

    /// Reads `link.csv` and locates every annotated slice it references
    pub fn locate_all(&self, selection: ContourSelection) -> Result<Vec<SamplePaths>> {
        let links = self.read_links()?;
        info!("Read {} patient links", links.len());
        self.locate(&links, selection)
    }

    /// Locates the annotated slices of the given patients
    ///
    /// Every i-contour is paired with `dicoms/<patient_id>/<slice>.dcm`.
    /// Contours whose DICOM is missing are skipped with a warning, as are
    /// file names that do not parse. Results are sorted by patient and slice.
    pub fn locate(
        &self,
        links: &[PatientLink],
        selection: ContourSelection,
    ) -> Result<Vec<SamplePaths>> {
        let mut samples = Vec::new();

        for link in links {
            let inner_dir = self.contour_dir(link, ContourKind::Inner);
            if !inner_dir.is_dir() {
                warn!(
                    "No {} directory for {}: {}",
                    ContourKind::Inner.dir_name(),
                    link.original_id,
                    inner_dir.display()
                );
                continue;
            }

            for contour_path in collect_contour_files(&inner_dir)? {
                if let Some(sample) = self.pair_contour(link, &contour_path, selection) {
                    samples.push(sample);
                }
            }
        }

        samples.sort_by(|a, b| {
            (&a.patient_id, a.slice).cmp(&(&b.patient_id, b.slice))
        });
        info!("Located {} samples", samples.len());
        Ok(samples)
    }

    fn pair_contour(
        &self,
        link: &PatientLink,
        contour_path: &Path,
        selection: ContourSelection,
    ) -> Option<SamplePaths> {
        let name = contour_path.file_name()?.to_string_lossy();
        let parsed = match ContourFileName::parse(&name) {
            Ok(parsed) if parsed.kind == ContourKind::Inner => parsed,
            Ok(_) => {
                warn!("Outer contour in inner directory: {}", contour_path.display());
                return None;
            }
            Err(e) => {
                warn!("Skipping {}: {}", contour_path.display(), e);
                return None;
            }
        };

        let dicom = self.dicom_path(link, parsed.slice);
        if !dicom.is_file() {
            warn!("Non-existing dicom for contour: {}", dicom.display());
            return None;
        }

        let outer = self
            .contour_dir(link, ContourKind::Outer)
            .join(parsed.with_kind(ContourKind::Outer).file_name());
        let outer_contour = outer.is_file().then_some(outer);

        if selection.requires_outer() && outer_contour.is_none() {
            debug!(
                "No outer contour for {} slice {}, skipping",
                link.original_id, parsed.slice
            );
            return None;
        }

        Some(SamplePaths {
            patient_id: link.patient_id.clone(),
            original_id: link.original_id.clone(),
            slice: parsed.slice,
            dicom,
            inner_contour: contour_path.to_path_buf(),
            outer_contour,
        })
    }

    /// `contourfiles/<original_id>/<i|o>-contours`
    pub fn contour_dir(&self, link: &PatientLink, kind: ContourKind) -> PathBuf {
        self.base_dir
            .join(CONTOUR_DIR)
            .join(&link.original_id)
            .join(kind.dir_name())
    }

    /// `dicoms/<patient_id>/<slice>.dcm`, slice number without zero padding
    pub fn dicom_path(&self, link: &PatientLink, slice: u32) -> PathBuf {
        self.base_dir
            .join(DICOM_DIR)
            .join(&link.patient_id)
            .join(format!("{}.dcm", slice))
    }
}

/// Lists the `.txt` files of a contour directory
fn collect_contour_files(directory: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_file()
            && path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("txt"))
                .unwrap_or(false)
        {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

use crate::mask::{mask_area, mask_bbox, BoundingBox, Mask};
use crate::parsing::DicomImage;
use crate::parsing::PatientLink;
use crate::pipeline::SamplePaths;
use crate::types::PixelSpacing;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Text report for a located dataset
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SummaryReport {
    pub base_dir: PathBuf,

    /// Rows of `link.csv`
    pub patients: usize,

    /// Patients with at least one located sample
    pub annotated_patients: usize,
    pub samples: usize,
    pub with_outer: usize,
}

impl SummaryReport {
    /// Summarizes the samples located for a set of patient links
    pub fn new(base_dir: &Path, links: &[PatientLink], samples: &[SamplePaths]) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            patients: links.len(),
            annotated_patients: count_patients(samples),
            samples: samples.len(),
            with_outer: samples.iter().filter(|s| s.outer_contour.is_some()).count(),
        }
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset Summary")?;
        writeln!(f, "===============")?;
        writeln!(f)?;
        writeln!(f, "Base Directory: {}", self.base_dir.display())?;
        writeln!(f, "Patients:       {}", self.patients)?;
        writeln!(f, "Annotated:      {}", self.annotated_patients)?;
        writeln!(f, "Samples:        {}", self.samples)?;
        writeln!(f, "Outer Contours: {}", self.with_outer)?;
        Ok(())
    }
}

/// Text report for one DICOM slice and its contour mask
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct InspectReport {
    pub dicom: PathBuf,
    pub contour: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub min_value: f32,
    pub max_value: f32,
    pub pixel_spacing: Option<PixelSpacing>,
    pub vertices: usize,
    pub mask_area: usize,
    pub mask_area_mm2: Option<f64>,
    pub bbox: Option<BoundingBox>,
}

impl InspectReport {
    pub fn new(
        dicom_path: &Path,
        contour_path: &Path,
        image: &DicomImage,
        vertices: usize,
        mask: &Mask,
    ) -> Self {
        let (min_value, max_value) = image.value_range();
        let area = mask_area(mask);
        Self {
            dicom: dicom_path.to_path_buf(),
            contour: contour_path.to_path_buf(),
            rows: image.rows,
            columns: image.columns,
            min_value,
            max_value,
            pixel_spacing: image.pixel_spacing,
            vertices,
            mask_area: area,
            mask_area_mm2: image
                .pixel_spacing
                .map(|ps| ps.pixel_area() * area as f64),
            bbox: mask_bbox(mask),
        }
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Slice Inspection")?;
        writeln!(f, "================")?;
        writeln!(f)?;
        writeln!(f, "DICOM:          {}", self.dicom.display())?;
        writeln!(f, "Contour:        {}", self.contour.display())?;
        writeln!(f, "Shape:          {}x{}", self.rows, self.columns)?;
        writeln!(f, "Pixel Range:    {} .. {}", self.min_value, self.max_value)?;
        match &self.pixel_spacing {
            Some(ps) => writeln!(f, "Pixel Spacing:  {}", ps)?,
            None => writeln!(f, "Pixel Spacing:  unknown")?,
        }
        writeln!(f, "Vertices:       {}", self.vertices)?;
        writeln!(f, "Mask Area:      {} px", self.mask_area)?;
        if let Some(mm2) = self.mask_area_mm2 {
            writeln!(f, "Mask Area (mm): {:.1} mm²", mm2)?;
        }
        match &self.bbox {
            Some(bbox) => writeln!(f, "Bounding Box:   {}", bbox)?,
            None => writeln!(f, "Bounding Box:   empty")?,
        }
        Ok(())
    }
}

/// Distinct patients among located samples
fn count_patients(samples: &[SamplePaths]) -> usize {
    samples
        .iter()
        .map(|s| s.patient_id.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

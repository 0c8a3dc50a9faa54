//! Fixture builders shared by the unit tests
//!
//! DICOM slices are synthesized on the fly (explicit VR little endian,
//! 16-bit unsigned MONOCHROME2) so no binary fixtures live in the tree.

use crate::mask::Mask;
use crate::parsing::tags::*;
use crate::pipeline::{Sample, SamplePaths};
use crate::types::Point;
use dicom_core::{DataElement, PrimitiveValue, VR};
use dicom_dictionary_std::{tags, uids};
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional header extras for a synthesized slice
#[derive(Debug, Clone, Default)]
pub struct SliceOptions {
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
    pub pixel_spacing: Option<&'static str>,

    /// Frames to write, 0 and 1 both give a single-frame object. Frame `f`
    /// holds `value(row, col) + 1000 * f`.
    pub frames: u16,
}

impl SliceOptions {
    pub fn rescale(slope: f64, intercept: f64) -> Self {
        Self {
            slope: Some(slope),
            intercept: Some(intercept),
            ..Self::default()
        }
    }
}

/// Writes an MR slice whose pixels are produced by `value(row, col)`
pub fn write_dicom(
    path: &Path,
    rows: u16,
    columns: u16,
    options: &SliceOptions,
    value: impl Fn(usize, usize) -> u16,
) {
    let frames = options.frames.max(1);
    let mut pixels = Vec::with_capacity(frames as usize * rows as usize * columns as usize);
    for f in 0..frames {
        for r in 0..rows as usize {
            for c in 0..columns as usize {
                pixels.push(value(r, c) + 1000 * f);
            }
        }
    }

    let mut obj = InMemDicomObject::new_empty();
    obj.put(DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("MR")));
    obj.put(DataElement::new(
        SOP_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from("1.2.826.0.1.3680043.2.1125.1"),
    ));
    obj.put(DataElement::new(ROWS, VR::US, PrimitiveValue::from(rows)));
    obj.put(DataElement::new(COLUMNS, VR::US, PrimitiveValue::from(columns)));
    obj.put(DataElement::new(
        SAMPLES_PER_PIXEL,
        VR::US,
        PrimitiveValue::from(1_u16),
    ));
    obj.put(DataElement::new(
        PHOTOMETRIC_INTERPRETATION,
        VR::CS,
        PrimitiveValue::from("MONOCHROME2"),
    ));
    obj.put(DataElement::new(BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16)));
    obj.put(DataElement::new(BITS_STORED, VR::US, PrimitiveValue::from(16_u16)));
    obj.put(DataElement::new(HIGH_BIT, VR::US, PrimitiveValue::from(15_u16)));
    obj.put(DataElement::new(
        PIXEL_REPRESENTATION,
        VR::US,
        PrimitiveValue::from(0_u16),
    ));
    if frames > 1 {
        obj.put(DataElement::new(
            tags::NUMBER_OF_FRAMES,
            VR::IS,
            PrimitiveValue::from(frames.to_string()),
        ));
    }
    if let Some(slope) = options.slope {
        obj.put(DataElement::new(
            RESCALE_SLOPE,
            VR::DS,
            PrimitiveValue::from(slope.to_string()),
        ));
    }
    if let Some(intercept) = options.intercept {
        obj.put(DataElement::new(
            RESCALE_INTERCEPT,
            VR::DS,
            PrimitiveValue::from(intercept.to_string()),
        ));
    }
    if let Some(spacing) = options.pixel_spacing {
        obj.put(DataElement::new(
            PIXEL_SPACING,
            VR::DS,
            PrimitiveValue::from(spacing),
        ));
    }
    obj.put(DataElement::new(
        PIXEL_DATA,
        VR::OW,
        PrimitiveValue::U16(pixels.into()),
    ));

    let file_obj = obj
        .with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(uids::MR_IMAGE_STORAGE)
                .media_storage_sop_instance_uid("1.2.826.0.1.3680043.2.1125.1"),
        )
        .unwrap();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    file_obj.write_to_file(path).unwrap();
}

/// Writes a contour file with one `x y` pair per line
pub fn write_contour(path: &Path, points: &[Point]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let body: String = points
        .iter()
        .map(|p| format!("{:.2} {:.2}\n", p.x, p.y))
        .collect();
    fs::write(path, body).unwrap();
}

/// Axis-aligned square contour with corners at `lo` and `hi`
pub fn square(lo: f64, hi: f64) -> Vec<Point> {
    vec![
        Point::new(lo, lo),
        Point::new(hi, lo),
        Point::new(hi, hi),
        Point::new(lo, hi),
    ]
}

/// Lays out a dataset directory the way the annotated exercise data ships
///
/// Every `(patient_id, original_id, slices)` entry gets a DICOM per slice
/// (pixel value offset by slice number so images are distinguishable), an
/// i-contour per slice and an o-contour for even slice numbers.
pub struct DatasetBuilder {
    base: PathBuf,
    size: u16,
    links: Vec<(String, String)>,
}

impl DatasetBuilder {
    pub fn new(base: &Path, size: u16) -> Self {
        Self {
            base: base.to_path_buf(),
            size,
            links: Vec::new(),
        }
    }

    pub fn patient(mut self, patient_id: &str, original_id: &str, slices: &[u32]) -> Self {
        let size = self.size;
        for &slice in slices {
            let dicom = self
                .base
                .join("dicoms")
                .join(patient_id)
                .join(format!("{}.dcm", slice));
            write_dicom(&dicom, size, size, &SliceOptions::default(), |r, c| {
                (slice as usize * 100 + r + c) as u16
            });

            let contours = self.base.join("contourfiles").join(original_id);
            write_contour(
                &contours
                    .join("i-contours")
                    .join(format!("IM-0001-{:04}-icontour-manual.txt", slice)),
                &square(2.0, f64::from(size) / 2.0),
            );
            if slice % 2 == 0 {
                write_contour(
                    &contours
                        .join("o-contours")
                        .join(format!("IM-0001-{:04}-ocontour-manual.txt", slice)),
                    &square(1.0, f64::from(size) - 2.0),
                );
            }
        }
        self.links
            .push((patient_id.to_string(), original_id.to_string()));
        self
    }

    pub fn build(self) -> PathBuf {
        let mut csv = String::from("patient_id,original_id\n");
        for (patient_id, original_id) in &self.links {
            csv.push_str(&format!("{},{}\n", patient_id, original_id));
        }
        fs::create_dir_all(&self.base).unwrap();
        fs::write(self.base.join("link.csv"), csv).unwrap();
        self.base
    }
}

/// In-memory sample with constant pixel value `slice` and no backing files
///
/// The inner mask is full for even slices and empty for odd ones.
pub fn synthetic_sample(slice: u32, height: usize, width: usize, outer: bool) -> Sample {
    Sample {
        paths: SamplePaths {
            patient_id: "SCD0000101".to_string(),
            original_id: "SC-HF-I-1".to_string(),
            slice,
            dicom: PathBuf::from(format!("{}.dcm", slice)),
            inner_contour: PathBuf::from(format!("{}-i.txt", slice)),
            outer_contour: outer.then(|| PathBuf::from(format!("{}-o.txt", slice))),
        },
        image: Array2::from_elem((height, width), slice as f32),
        inner_mask: Mask::from_elem((height, width), slice % 2 == 0),
        outer_mask: outer.then(|| Mask::from_elem((height, width), true)),
        pixel_spacing: None,
    }
}

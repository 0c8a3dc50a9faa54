use crate::error::{LvsegError, Result};
use crate::parsing::tags::{
    get_f64_value, get_string_value, get_u16_value, COLUMNS, PIXEL_SPACING, RESCALE_INTERCEPT,
    RESCALE_SLOPE, ROWS,
};
use crate::types::PixelSpacing;
use dicom_object::{open_file, DefaultDicomObject};
use dicom_pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder};
use log::{debug, warn};
use ndarray::{s, Array2};
use std::path::Path;

/// A single decoded DICOM slice
#[derive(Debug, Clone, PartialEq)]
pub struct DicomImage {
    /// Pixel values of the first frame, shape `(rows, columns)`, with the
    /// rescale slope and intercept applied when both are present
    pub pixels: Array2<f32>,

    /// Number of rows in the image
    pub rows: usize,

    /// Number of columns in the image
    pub columns: usize,

    /// Physical pixel spacing, when the header carries a valid one
    pub pixel_spacing: Option<PixelSpacing>,
}

impl DicomImage {
    /// Image shape as `(height, width)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Minimum and maximum pixel value
    pub fn value_range(&self) -> (f32, f32) {
        self.pixels
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// Reads a DICOM file into a 2D pixel array
///
/// # Errors
///
/// Returns [`LvsegError::Dicom`] if the file is not a readable DICOM object
/// and [`LvsegError::PixelData`] if it has no decodable pixel data.
pub fn parse_dicom_file<P: AsRef<Path>>(path: P) -> Result<DicomImage> {
    let path = path.as_ref();
    let dcm = open_file(path)?;
    let image = decode_image(&dcm)?;
    debug!(
        "Decoded {}: {}x{}",
        path.display(),
        image.rows,
        image.columns
    );
    Ok(image)
}

/// Decodes the first frame of an opened DICOM object
///
/// The decoder's own modality LUT is disabled; RescaleSlope and
/// RescaleIntercept are applied here only when both tags are present.
pub fn decode_image(dcm: &DefaultDicomObject) -> Result<DicomImage> {
    let decoded = dcm.decode_pixel_data()?;
    if decoded.number_of_frames() > 1 {
        warn!(
            "Multi-frame object with {} frames, using the first frame only",
            decoded.number_of_frames()
        );
    }

    let options = ConvertOptions::new().with_modality_lut(ModalityLutOption::None);
    let frames = decoded.to_ndarray_with_options::<f32>(&options)?;
    // (frames, rows, columns, samples)
    let mut pixels = frames.slice(s![0, .., .., 0]).to_owned();

    if let Some((slope, intercept)) = rescale(dcm) {
        debug!("Applying rescale slope {} intercept {}", slope, intercept);
        pixels.mapv_inplace(|v| v * slope as f32 + intercept as f32);
    }

    let (rows, columns) = pixels.dim();
    check_geometry(dcm, rows, columns)?;

    let pixel_spacing = get_string_value(dcm, PIXEL_SPACING).and_then(|s| {
        PixelSpacing::parse(&s)
            .map_err(|e| warn!("Ignoring pixel spacing: {}", e))
            .ok()
    });

    Ok(DicomImage {
        pixels,
        rows,
        columns,
        pixel_spacing,
    })
}

fn rescale(dcm: &DefaultDicomObject) -> Option<(f64, f64)> {
    let slope = get_f64_value(dcm, RESCALE_SLOPE)?;
    let intercept = get_f64_value(dcm, RESCALE_INTERCEPT)?;
    Some((slope, intercept))
}

/// The decoded frame must agree with the Rows/Columns attributes
fn check_geometry(dcm: &DefaultDicomObject, rows: usize, columns: usize) -> Result<()> {
    match (get_u16_value(dcm, ROWS), get_u16_value(dcm, COLUMNS)) {
        (Some(r), Some(c)) if r as usize != rows || c as usize != columns => {
            Err(LvsegError::PixelData(format!(
                "Decoded frame is {}x{} but header declares {}x{}",
                rows, columns, r, c
            )))
        }
        _ => Ok(()),
    }
}

use crate::error::{LvsegError, Result};
use crate::mask::{poly_to_mask, Mask};
use crate::parsing::{parse_contour_file, parse_dicom_file};
use crate::pipeline::locator::SamplePaths;
use crate::types::PixelSpacing;
use log::debug;
use ndarray::Array2;
use std::path::Path;

/// One loaded training sample
#[derive(Debug, Clone)]
pub struct Sample {
    /// Files the sample was read from
    pub paths: SamplePaths,

    /// DICOM pixels, shape `(height, width)`
    pub image: Array2<f32>,

    /// Inner (blood pool) mask, same shape as `image`
    pub inner_mask: Mask,

    /// Outer (epicardial) mask, when the slice has an o-contour
    pub outer_mask: Option<Mask>,

    /// Physical pixel spacing from the DICOM header
    pub pixel_spacing: Option<PixelSpacing>,
}

impl Sample {
    /// Image shape as `(height, width)`
    pub fn shape(&self) -> (usize, usize) {
        self.image.dim()
    }
}

/// Reads the DICOM slice and rasterizes its contours
///
/// # Errors
///
/// Propagates DICOM and contour parse errors; an empty contour file gives
/// [`LvsegError::EmptyContour`].
pub fn load_sample(paths: &SamplePaths) -> Result<Sample> {
    let dicom = parse_dicom_file(&paths.dicom)?;
    let (height, width) = dicom.shape();

    let inner_mask = load_mask(&paths.inner_contour, width, height)?;
    let outer_mask = paths
        .outer_contour
        .as_deref()
        .map(|path| load_mask(path, width, height))
        .transpose()?;

    debug!("Loaded: {}", paths.dicom.display());
    Ok(Sample {
        paths: paths.clone(),
        image: dicom.pixels,
        inner_mask,
        outer_mask,
        pixel_spacing: dicom.pixel_spacing,
    })
}

/// Parses a contour file and rasterizes it at the given image size
pub fn load_mask(contour: &Path, width: usize, height: usize) -> Result<Mask> {
    let polygon = parse_contour_file(contour)?;
    if polygon.is_empty() {
        return Err(LvsegError::EmptyContour(contour.to_path_buf()));
    }
    Ok(poly_to_mask(&polygon, width, height))
}

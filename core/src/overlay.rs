//! Mask-over-image renderings for checking annotations by eye

use crate::error::{LvsegError, Result};
use crate::mask::Mask;
use image::{Rgb, RgbImage};
use log::info;
use ndarray::Array2;
use std::path::Path;

/// Windows an image to 8 bits using its own min/max
///
/// A constant image maps to all zeros.
pub fn to_gray8(image: &Array2<f32>) -> Array2<u8> {
    let (lo, hi) = image
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;
    if !range.is_finite() || range <= 0.0 {
        return Array2::zeros(image.dim());
    }
    image.mapv(|v| (((v - lo) / range) * 255.0).round().clamp(0.0, 255.0) as u8)
}

/// Renders the image in gray with the green channel zeroed inside the mask
///
/// # Errors
///
/// Returns [`LvsegError::ShapeMismatch`] if the mask does not match the image.
pub fn render_overlay(image: &Array2<f32>, mask: &Mask) -> Result<RgbImage> {
    if image.dim() != mask.dim() {
        return Err(LvsegError::ShapeMismatch(format!(
            "image {:?} vs mask {:?}",
            image.dim(),
            mask.dim()
        )));
    }

    let gray = to_gray8(image);
    let (height, width) = gray.dim();
    Ok(RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let idx = [y as usize, x as usize];
        let v = gray[idx];
        let g = if mask[idx] { 0 } else { v };
        Rgb([v, g, v])
    }))
}

/// Renders an overlay and writes it as a PNG
pub fn save_overlay<P: AsRef<Path>>(image: &Array2<f32>, mask: &Mask, path: P) -> Result<()> {
    let path = path.as_ref();
    render_overlay(image, mask)?.save(path)?;
    info!("Wrote overlay {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tempfile::TempDir;

    #[test]
    fn test_to_gray8_stretches_range() {
        let image = array![[-100.0_f32, 0.0], [50.0, 155.0]];
        let gray = to_gray8(&image);
        assert_eq!(gray, array![[0_u8, 100], [150, 255]]);
    }

    #[test]
    fn test_to_gray8_constant_image() {
        let image = Array2::from_elem((2, 3), 7.0_f32);
        assert_eq!(to_gray8(&image), Array2::<u8>::zeros((2, 3)));
    }

    #[test]
    fn test_render_overlay() {
        let image = array![[0.0_f32, 255.0, 255.0], [255.0, 255.0, 0.0]];
        let mask = array![[false, true, false], [false, false, false]];

        let rgb = render_overlay(&image, &mask).unwrap();
        assert_eq!(rgb.dimensions(), (3, 2));
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([255, 0, 255]));
        assert_eq!(rgb.get_pixel(2, 0), &Rgb([255, 255, 255]));
        assert_eq!(rgb.get_pixel(2, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_render_overlay_shape_mismatch() {
        let image = Array2::<f32>::zeros((2, 2));
        let mask = Mask::from_elem((2, 3), false);
        assert!(render_overlay(&image, &mask).is_err());
    }

    #[test]
    fn test_save_overlay_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("merged48.png");
        let image = Array2::from_shape_fn((4, 4), |(r, c)| (r * 4 + c) as f32);
        let mask = Mask::from_elem((4, 4), true);

        save_overlay(&image, &mask, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}

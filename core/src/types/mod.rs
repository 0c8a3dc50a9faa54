//! Core type definitions shared by the parsers and the data pipeline
//!
//! - [`Point`]: Contour vertex in image coordinates
//! - [`ContourKind`]: Inner (endocardial) or outer (epicardial) contour
//! - [`ContourSelection`]: Which contours a sample must carry
//! - [`PixelSpacing`]: Physical pixel size from the DICOM header
//! - [`LoaderConfig`]: Batch size, shuffling and load policy

mod config;
mod contour;
mod pixel_spacing;
mod point;

pub use config::{LoadPolicy, LoaderConfig};
pub use contour::{ContourKind, ContourSelection};
pub use pixel_spacing::PixelSpacing;
pub use point::Point;

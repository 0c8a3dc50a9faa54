pub mod cli;
pub mod error;
pub mod mask;
pub mod overlay;
pub mod parsing;
pub mod pipeline;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::report::{InspectReport, SummaryReport};
pub use error::{LvsegError, Result};
pub use mask::{mask_area, mask_bbox, poly_to_mask, BoundingBox, Mask};
pub use overlay::{render_overlay, save_overlay};
pub use parsing::{parse_contour_file, parse_dicom_file, read_links, DicomImage, PatientLink};
pub use pipeline::{
    load_sample, Batch, DataLoader, Dataset, Epoch, Sample, SampleLocator, SamplePaths,
};
pub use types::*;

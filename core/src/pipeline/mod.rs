//! From a dataset directory to shuffled minibatches
//!
//! [`SampleLocator`] pairs contours with DICOM slices, [`load_sample`] turns
//! one pair into an image and masks, [`Dataset`] keeps everything in memory
//! and [`DataLoader`] serves shuffled [`Batch`]es epoch by epoch.

mod batch;
mod dataset;
mod loader;
mod locator;
mod sample;

pub use batch::Batch;
pub use dataset::Dataset;
pub use loader::{DataLoader, Epoch};
pub use locator::{SampleLocator, SamplePaths, CONTOUR_DIR, DICOM_DIR};
pub use sample::{load_mask, load_sample, Sample};

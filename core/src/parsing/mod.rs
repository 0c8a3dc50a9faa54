//! Readers for the three on-disk inputs: DICOM slices, contour files and the
//! patient link table

pub mod contour;
pub mod dicom;
pub mod link;
pub mod tags;

pub use contour::{parse_contour_file, ContourFileName};
pub use dicom::{decode_image, parse_dicom_file, DicomImage};
pub use link::{read_links, PatientLink, LINK_FILE};

use std::path::PathBuf;
use thiserror::Error;

/// Result type for lvseg operations
pub type Result<T> = std::result::Result<T, LvsegError>;

/// Error types for lvseg operations
#[derive(Error, Debug)]
pub enum LvsegError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    Dicom(String),

    /// Pixel data could not be decoded
    #[error("Pixel data error: {0}")]
    PixelData(String),

    /// Malformed line in a contour file
    #[error("Contour parse error in {path}:{line}: {message}")]
    ContourParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Contour file without any vertex
    #[error("Contour file empty: {0}")]
    EmptyContour(PathBuf),

    /// Contour file name does not follow the IM-0001-NNNN-*contour-manual.txt pattern
    #[error("Invalid contour file name: {0}")]
    InvalidFileName(String),

    /// Patient link table could not be read
    #[error("Link table error: {0}")]
    Link(String),

    /// Samples of different shape ended up in one batch
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Invalid loader configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for LvsegError {
    fn from(e: dicom_object::ReadError) -> Self {
        LvsegError::Dicom(format!("{}", e))
    }
}

impl From<dicom_pixeldata::Error> for LvsegError {
    fn from(e: dicom_pixeldata::Error) -> Self {
        LvsegError::PixelData(format!("{}", e))
    }
}

impl From<csv::Error> for LvsegError {
    fn from(e: csv::Error) -> Self {
        LvsegError::Link(format!("{}", e))
    }
}

impl From<ndarray::ShapeError> for LvsegError {
    fn from(e: ndarray::ShapeError) -> Self {
        LvsegError::ShapeMismatch(format!("{}", e))
    }
}

impl From<image::ImageError> for LvsegError {
    fn from(e: image::ImageError) -> Self {
        LvsegError::Image(format!("{}", e))
    }
}

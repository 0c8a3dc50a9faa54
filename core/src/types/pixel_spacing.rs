use crate::error::{LvsegError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Physical pixel spacing in millimeters (row, column)
///
/// Taken from the DICOM PixelSpacing attribute of an MR slice. Used to turn
/// mask areas into physical areas.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct PixelSpacing {
    pub row: f64,
    pub col: f64,
}

impl PixelSpacing {
    /// Creates a new PixelSpacing
    pub fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    /// Parses pixel spacing from a DICOM decimal string pair
    ///
    /// Accepts `"1.40625\\1.40625"`, space separated values and exponential
    /// notation.
    ///
    /// # Errors
    ///
    /// Returns [`LvsegError::Dicom`] if fewer than two numbers are found or
    /// either value is not strictly positive.
    pub fn parse(s: &str) -> Result<Self> {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGEX.get_or_init(|| {
            Regex::new(r"[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?").expect("Failed to compile regex")
        });

        let values: Vec<f64> = re
            .find_iter(s)
            .take(2)
            .map(|m| m.as_str().parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| LvsegError::Dicom(format!("Invalid PixelSpacing '{}': {}", s, e)))?;

        match values.as_slice() {
            [row, col] if *row > 0.0 && *col > 0.0 => Ok(Self::new(*row, *col)),
            _ => Err(LvsegError::Dicom(format!("Invalid PixelSpacing '{}'", s))),
        }
    }

    /// Area covered by one pixel, in mm²
    pub fn pixel_area(&self) -> f64 {
        self.row * self.col
    }
}

impl fmt::Display for PixelSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} mm", self.row, self.col)
    }
}

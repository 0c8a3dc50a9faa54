use std::fmt;

/// Kind of hand-drawn left-ventricle contour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum ContourKind {
    /// Endocardial boundary (blood pool)
    Inner,
    /// Epicardial boundary (myocardium outer wall)
    Outer,
}

impl ContourKind {
    /// Directory holding contours of this kind under `contourfiles/<original_id>/`
    pub fn dir_name(&self) -> &'static str {
        match self {
            ContourKind::Inner => "i-contours",
            ContourKind::Outer => "o-contours",
        }
    }

    /// Tag used inside contour file names, e.g. `icontour` in
    /// `IM-0001-0048-icontour-manual.txt`
    pub fn file_tag(&self) -> &'static str {
        match self {
            ContourKind::Inner => "icontour",
            ContourKind::Outer => "ocontour",
        }
    }

    /// Parses a file-name tag back into a kind
    pub fn from_file_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "icontour" => Some(ContourKind::Inner),
            "ocontour" => Some(ContourKind::Outer),
            _ => None,
        }
    }
}

impl fmt::Display for ContourKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContourKind::Inner => write!(f, "inner"),
            ContourKind::Outer => write!(f, "outer"),
        }
    }
}

/// Which contours a located sample must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum ContourSelection {
    /// Every slice with an i-contour; o-contours are attached when present
    #[default]
    InnerOnly,
    /// Only slices that have both an i-contour and an o-contour
    InnerAndOuter,
}

impl ContourSelection {
    /// Whether samples without an outer contour are dropped
    pub fn requires_outer(&self) -> bool {
        matches!(self, ContourSelection::InnerAndOuter)
    }
}

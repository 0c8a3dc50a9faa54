use crate::error::{LvsegError, Result};
use crate::types::{ContourKind, Point};
use log::warn;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Decomposed contour file name
///
/// Annotated contours are named `IM-0001-0048-icontour-manual.txt`:
/// image prefix, series number, zero-padded slice number, contour kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContourFileName {
    pub prefix: String,
    pub series: String,
    pub slice: u32,
    pub kind: ContourKind,
}

impl ContourFileName {
    /// Parses a contour file name (with or without directory components)
    ///
    /// A prefix other than `IM` or a series other than `0001` is accepted with
    /// a warning. The slice number and the `icontour`/`ocontour` tag must be
    /// present, so `IM-0001-0048-manual.txt` is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`LvsegError::InvalidFileName`] if the name does not have the
    /// `PREFIX-SERIES-SLICE-KIND-...` shape.
    pub fn parse(name: &str) -> Result<Self> {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGEX.get_or_init(|| {
            Regex::new(r"^([^-]+)-([^-]+)-(\d+)-([a-zA-Z]+)(?:-.*)?\.txt$")
                .expect("Failed to compile regex")
        });

        let file_name = Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(name);

        let caps = re
            .captures(file_name)
            .ok_or_else(|| LvsegError::InvalidFileName(name.to_string()))?;

        let prefix = caps[1].to_string();
        let series = caps[2].to_string();
        if prefix != "IM" || series != "0001" {
            warn!("Unknown naming pattern: {}", name);
        }

        let slice = caps[3]
            .parse::<u32>()
            .map_err(|_| LvsegError::InvalidFileName(name.to_string()))?;
        let kind = ContourKind::from_file_tag(&caps[4])
            .ok_or_else(|| LvsegError::InvalidFileName(name.to_string()))?;

        Ok(Self {
            prefix,
            series,
            slice,
            kind,
        })
    }

    /// Same slice, other contour kind
    pub fn with_kind(&self, kind: ContourKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    /// Renders the name as `PREFIX-SERIES-NNNN-KIND-manual.txt`
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}-{:04}-{}-manual.txt",
            self.prefix,
            self.series,
            self.slice,
            self.kind.file_tag()
        )
    }
}

/// Parses a contour file into an ordered list of polygon vertices
///
/// Each non-blank line holds an `x y` pair separated by whitespace. Extra
/// columns are ignored.
///
/// # Errors
///
/// Returns [`LvsegError::ContourParse`] naming the offending line when a line
/// holds fewer than two numbers or a coordinate that is NaN or infinite.
pub fn parse_contour_file<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    parse_contour_str(&content).map_err(|(line, message)| LvsegError::ContourParse {
        path: path.to_path_buf(),
        line,
        message,
    })
}

fn parse_contour_str(content: &str) -> std::result::Result<Vec<Point>, (usize, String)> {
    let mut points = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let x = match fields.next() {
            Some(x) => x,
            None => continue,
        };
        let y = fields
            .next()
            .ok_or_else(|| (idx + 1, format!("missing y coordinate in '{}'", line.trim())))?;

        let x: f64 = x
            .parse()
            .map_err(|e| (idx + 1, format!("invalid x coordinate '{}': {}", x, e)))?;
        let y: f64 = y
            .parse()
            .map_err(|e| (idx + 1, format!("invalid y coordinate '{}': {}", y, e)))?;
        if !x.is_finite() || !y.is_finite() {
            return Err((idx + 1, format!("non-finite vertex in '{}'", line.trim())));
        }

        points.push(Point::new(x, y));
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("IM-0001-0048-icontour-manual.txt", 48, ContourKind::Inner)]
    #[case("IM-0001-0219-ocontour-manual.txt", 219, ContourKind::Outer)]
    #[case("contourfiles/SC-HF-I-1/i-contours/IM-0001-0008-icontour-manual.txt", 8, ContourKind::Inner)]
    fn test_parse_file_name(
        #[case] name: &str,
        #[case] slice: u32,
        #[case] kind: ContourKind,
    ) {
        let parsed = ContourFileName::parse(name).unwrap();
        assert_eq!(parsed.prefix, "IM");
        assert_eq!(parsed.series, "0001");
        assert_eq!(parsed.slice, slice);
        assert_eq!(parsed.kind, kind);
    }

    #[test]
    fn test_parse_file_name_unknown_prefix_is_accepted() {
        let parsed = ContourFileName::parse("XX-0002-0010-icontour-manual.txt").unwrap();
        assert_eq!(parsed.prefix, "XX");
        assert_eq!(parsed.series, "0002");
        assert_eq!(parsed.slice, 10);
    }

    #[rstest]
    #[case("notes.txt")]
    #[case("IM-0001-abcd-icontour-manual.txt")]
    #[case("IM-0001-0048-pcontour-manual.txt")]
    #[case("IM-0001-0048-icontour-manual.csv")]
    #[case("IM-0001-0048-manual.txt")]
    #[case("IM-0001-0048.txt")]
    fn test_parse_file_name_invalid(#[case] name: &str) {
        assert!(matches!(
            ContourFileName::parse(name),
            Err(LvsegError::InvalidFileName(_))
        ));
    }

    #[test]
    fn test_file_name() {
        let inner = ContourFileName::parse("IM-0001-0048-icontour-manual.txt").unwrap();
        assert_eq!(inner.file_name(), "IM-0001-0048-icontour-manual.txt");
        assert_eq!(
            inner.with_kind(ContourKind::Outer).file_name(),
            "IM-0001-0048-ocontour-manual.txt"
        );
    }

    #[test]
    fn test_with_kind_keeps_prefix_and_series() {
        let inner = ContourFileName::parse("XX-0002-0120-icontour-auto.txt").unwrap();
        let outer = inner.with_kind(ContourKind::Outer);
        assert_eq!(outer.prefix, "XX");
        assert_eq!(outer.series, "0002");
        assert_eq!(outer.slice, 120);
        assert_eq!(outer.file_name(), "XX-0002-0120-ocontour-manual.txt");
    }

    #[test]
    fn test_parse_contour_str() {
        let points = parse_contour_str("120.50 137.50\n121.50 137.50\n\n122.00 138.25\n").unwrap();
        assert_eq!(
            points,
            vec![
                Point::new(120.5, 137.5),
                Point::new(121.5, 137.5),
                Point::new(122.0, 138.25),
            ]
        );
    }

    #[rstest]
    #[case("1.0 2.0\n3.0\n", 2)]
    #[case("1.0 abc\n", 1)]
    #[case("2 2\nnan 3\n4 4\n2 4\n", 2)]
    #[case("2 2\n3 NaN\n", 2)]
    #[case("inf 3.0\n", 1)]
    #[case("1 1\n2 2\n-inf 3\n", 3)]
    #[case("1 infinity\n", 1)]
    fn test_parse_contour_str_bad_line(#[case] content: &str, #[case] line: usize) {
        let err = parse_contour_str(content).unwrap_err();
        assert_eq!(err.0, line);
    }

    #[test]
    fn test_parse_contour_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("IM-0001-0048-icontour-manual.txt");
        std::fs::write(&path, "10.0 20.0\r\n11.0 21.0\r\n").unwrap();

        let points = parse_contour_file(&path).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], Point::new(11.0, 21.0));
    }

    #[test]
    fn test_parse_contour_file_reports_location() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.txt");
        std::fs::write(&path, "10.0 20.0\nten twenty\n").unwrap();

        match parse_contour_file(&path) {
            Err(LvsegError::ContourParse { path: p, line, .. }) => {
                assert_eq!(p, path);
                assert_eq!(line, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_contour_file_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");
        std::fs::write(&path, "").unwrap();

        assert!(parse_contour_file(&path).unwrap().is_empty());
    }
}

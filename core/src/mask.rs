//! Polygon rasterization into boolean masks
//!
//! Pixel `(row, col)` belongs to the mask when the point `(x = col, y = row)`
//! lies inside the polygon under the even-odd rule, or on its boundary.

use crate::types::Point;
use ndarray::Array2;
use std::fmt;

/// Boolean mask of shape `(height, width)`
pub type Mask = Array2<bool>;

const ON_EDGE_EPS: f64 = 1e-9;

/// Inclusive bounding box of the set pixels of a mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct BoundingBox {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl BoundingBox {
    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows {}..={}, cols {}..={}",
            self.min_row, self.max_row, self.min_col, self.max_col
        )
    }
}

/// Rasterizes a closed polygon into a mask of the given image size
///
/// The polygon is closed implicitly (last vertex connects to the first).
/// Vertices outside the image are allowed and the result is clipped.
/// Fewer than three vertices give an empty mask.
pub fn poly_to_mask(polygon: &[Point], width: usize, height: usize) -> Mask {
    let mut mask = Mask::from_elem((height, width), false);
    if polygon.len() < 3 || width == 0 || height == 0 {
        return mask;
    }

    let edges: Vec<(Point, Point)> = polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
        .collect();

    fill_interior(&mut mask, &edges);
    draw_boundary(&mut mask, &edges);
    mask
}

/// Even-odd scanline fill over integer rows
fn fill_interior(mask: &mut Mask, edges: &[(Point, Point)]) {
    let (height, width) = mask.dim();
    let mut crossings = Vec::new();

    for row in 0..height {
        let y = row as f64;
        crossings.clear();

        // Half-open rule so a vertex shared by two edges is counted once
        for (a, b) in edges {
            if (a.y <= y && y < b.y) || (b.y <= y && y < a.y) {
                crossings.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks_exact(2) {
            fill_span(mask, row, pair[0], pair[1], width);
        }
    }
}

fn fill_span(mask: &mut Mask, row: usize, x0: f64, x1: f64, width: usize) {
    let start = (x0 - ON_EDGE_EPS).ceil().max(0.0);
    let end = (x1 + ON_EDGE_EPS).floor().min(width as f64 - 1.0);
    if start > end {
        return;
    }
    for col in start as usize..=end as usize {
        mask[[row, col]] = true;
    }
}

/// Marks every integer pixel lying exactly on an edge
fn draw_boundary(mask: &mut Mask, edges: &[(Point, Point)]) {
    let (height, width) = mask.dim();

    for (a, b) in edges {
        let y_lo = a.y.min(b.y).ceil().max(0.0);
        let y_hi = a.y.max(b.y).floor().min(height as f64 - 1.0);
        if y_lo > y_hi {
            continue;
        }

        if (a.y - b.y).abs() < ON_EDGE_EPS {
            if (a.y - a.y.round()).abs() < ON_EDGE_EPS {
                fill_span(mask, a.y.round() as usize, a.x.min(b.x), a.x.max(b.x), width);
            }
            continue;
        }

        for row in y_lo as usize..=y_hi as usize {
            let y = row as f64;
            let x = a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y);
            let col = x.round();
            if (x - col).abs() < ON_EDGE_EPS && col >= 0.0 && col < width as f64 {
                mask[[row, col as usize]] = true;
            }
        }
    }
}

/// Number of set pixels
pub fn mask_area(mask: &Mask) -> usize {
    mask.iter().filter(|&&v| v).count()
}

/// Bounding box of the set pixels, `None` for an empty mask
pub fn mask_bbox(mask: &Mask) -> Option<BoundingBox> {
    let mut bbox: Option<BoundingBox> = None;
    for ((row, col), _) in mask.indexed_iter().filter(|(_, v)| **v) {
        bbox = Some(match bbox {
            None => BoundingBox {
                min_row: row,
                max_row: row,
                min_col: col,
                max_col: col,
            },
            Some(b) => BoundingBox {
                min_row: b.min_row.min(row),
                max_row: b.max_row.max(row),
                min_col: b.min_col.min(col),
                max_col: b.max_col.max(col),
            },
        });
    }
    bbox
}

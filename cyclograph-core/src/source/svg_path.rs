use anyhow::Context;
use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathSeg};

use crate::foundation::{
    core::{Canvas, Complex},
    error::{CyclographError, CyclographResult},
};

/// Arclength accuracy when measuring path segments for sampling.
const ARCLEN_ACCURACY: f64 = 1e-6;

/// The path extracted from an input SVG document, plus its canvas bounds.
///
/// IO stays with the caller: construction takes raw bytes. The first path
/// element found in document order is the one that gets decomposed.
#[derive(Clone, Debug)]
pub struct PathSource {
    /// Canvas width from the SVG root.
    pub width: f64,
    /// Canvas height from the SVG root.
    pub height: f64,
    bez: BezPath,
}

impl PathSource {
    /// Parse SVG bytes and extract the first path element.
    #[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn from_svg_bytes(bytes: &[u8]) -> CyclographResult<Self> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

        let bez = first_path(tree.root())
            .ok_or_else(|| CyclographError::validation("svg contains no path element"))?;
        if bez.segments().next().is_none() {
            return Err(CyclographError::validation(
                "svg path has no drawable segments",
            ));
        }

        let size = tree.size();
        Ok(Self {
            width: f64::from(size.width()),
            height: f64::from(size.height()),
            bez,
        })
    }

    /// Canvas bounds of the source document.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// The extracted path rendered back to SVG path data.
    pub fn path_d(&self) -> String {
        self.bez.to_svg()
    }

    /// `n` arclength-evenly-spaced samples over exactly one period of the
    /// path, as complex points (`x + iy`).
    ///
    /// The parameter runs `t = k/n` for `k = 0..n`, so the end point of a
    /// closed path is not repeated. Caller contract: `n >= 1`. A zero-length
    /// path yields its start point `n` times.
    pub fn sample_points(&self, n: usize) -> Vec<Complex> {
        debug_assert!(n >= 1, "sample count must be at least 1");

        let segments: Vec<PathSeg> = self.bez.segments().collect();
        let lengths: Vec<f64> = segments.iter().map(|s| s.arclen(ARCLEN_ACCURACY)).collect();
        let total: f64 = lengths.iter().sum();

        let mut out = Vec::with_capacity(n);
        let mut cursor = 0usize;
        let mut walked = 0.0;
        for k in 0..n {
            let target = total * k as f64 / n as f64;
            while cursor + 1 < segments.len() && target > walked + lengths[cursor] {
                walked += lengths[cursor];
                cursor += 1;
            }
            let len = lengths[cursor];
            let local = if len > 0.0 {
                ((target - walked) / len).clamp(0.0, 1.0)
            } else {
                0.0
            };
            out.push(Complex::from(segments[cursor].eval(local)));
        }
        out
    }
}

/// Depth-first search for the first path node in the tree.
fn first_path(group: &usvg::Group) -> Option<BezPath> {
    for node in group.children() {
        match node {
            usvg::Node::Path(path) => return Some(to_bez_path(path.data())),
            usvg::Node::Group(child) => {
                if let Some(found) = first_path(child) {
                    return Some(found);
                }
            }
            _ => {}
        }
    }
    None
}

/// Convert a tiny-skia path into kurbo's representation.
fn to_bez_path(path: &usvg::tiny_skia_path::Path) -> BezPath {
    use usvg::tiny_skia_path::PathSegment;

    let mut bez = BezPath::new();
    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => bez.move_to((f64::from(p.x), f64::from(p.y))),
            PathSegment::LineTo(p) => bez.line_to((f64::from(p.x), f64::from(p.y))),
            PathSegment::QuadTo(p1, p) => bez.quad_to(
                (f64::from(p1.x), f64::from(p1.y)),
                (f64::from(p.x), f64::from(p.y)),
            ),
            PathSegment::CubicTo(p1, p2, p) => bez.curve_to(
                (f64::from(p1.x), f64::from(p1.y)),
                (f64::from(p2.x), f64::from(p2.y)),
                (f64::from(p.x), f64::from(p.y)),
            ),
            PathSegment::Close => bez.close_path(),
        }
    }
    bez
}

#[cfg(test)]
#[path = "../../tests/unit/source/svg_path.rs"]
mod tests;

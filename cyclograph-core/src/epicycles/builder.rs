use std::collections::BTreeMap;
use std::f64::consts::TAU;

use crate::{
    foundation::core::{Canvas, Complex},
    foundation::error::{CyclographError, CyclographResult},
    foundation::math::{fmt_f64, wrap_unit},
    scene::model::{
        Animation, Document, Geometry, Group, Node, PathId, Shape, Timing, TransformKind,
    },
    scene::path::PathData,
};

/// Amplitudes below half the printable quantum (6 decimal places) would render
/// as a zero-length trajectory; such levels are treated as degenerate.
const DEGENERATE_AMPLITUDE: f64 = 5e-7;

const TRACE_STYLE: &str = r#"stroke="black" fill="none""#;
const GUIDE_STYLE: &str = r#"stroke="blue" fill="none" stroke-width="0.5" stroke-dasharray="1,1""#;
const VECTOR_STYLE: &str = r#"stroke="blue" fill="none" stroke-width="0.5""#;
const MARKER_STYLE: &str = r#"stroke="black" fill="red""#;

/// Tuning knobs for [`build_scene`].
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ChainOptions {
    /// Seconds per revolution of the fundamental (|index| = 1) level. Level
    /// `i` revolves in `cycle_seconds / |i|`.
    pub cycle_seconds: f64,
    /// Output canvas scale relative to the input canvas, leaving headroom for
    /// circles that swing outside the traced path.
    pub margin_scale: f64,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            cycle_seconds: 20.0,
            margin_scale: 1.2,
        }
    }
}

/// Assemble the animated epicycle document for a coefficient map.
///
/// The document holds the undecorated background trace plus one nested chain
/// of paired rotation groups, threaded positive/negative by decreasing |index|
/// and anchored by a translation to the DC coefficient. Level pairs are built
/// from the chain end (fastest, innermost in the tree) towards index 1.
///
/// Every index in `[-end, end]` must be present in `coeffs`, where `end` is
/// half the map size; a gap aborts with
/// [`CyclographError::MissingCoefficient`].
#[tracing::instrument(skip(background, coeffs), fields(coefficients = coeffs.len()))]
pub fn build_scene(
    background: PathData,
    canvas: Canvas,
    coeffs: &BTreeMap<i32, Complex>,
    opts: &ChainOptions,
) -> CyclographResult<Document> {
    let end = (coeffs.len() / 2) as i32;
    let coeff = |i: i32| -> CyclographResult<Complex> {
        coeffs
            .get(&i)
            .copied()
            .ok_or(CyclographError::MissingCoefficient { index: i })
    };

    let scaled = canvas.scaled(opts.margin_scale);
    let mut doc = Document::new(scaled.width, scaled.height);

    doc.push_child(Node::Shape(
        Shape::new(Geometry::Path { d: background }).with_style(TRACE_STYLE),
    ));

    let c0 = coeff(0)?;
    let anchor_style = format!(
        r#"transform="translate({} {})""#,
        fmt_f64(c0.re),
        fmt_f64(c0.im)
    );

    let mut marker = Shape::new(Geometry::Circle {
        r: canvas.width / 200.0,
        cx: Some(0.0),
        cy: Some(0.0),
    })
    .with_style(MARKER_STYLE);

    if end == 0 {
        // Degenerate chain: no rotating levels, the marker sits on the
        // centroid.
        let mut anchor = Group::new().with_style(anchor_style);
        anchor.push_child(Node::Shape(marker));
        doc.push_child(Node::Group(anchor));
        return Ok(doc);
    }

    // Tip trajectories, one registered path per level with a non-degenerate
    // amplitude. A zero-amplitude level has a zero-length trajectory and its
    // riders simply stay at the level's center.
    let mut tips: BTreeMap<i32, PathId> = BTreeMap::new();
    for i in -end..=end {
        if i == 0 {
            continue;
        }
        let amplitude = coeff(i)?.abs();
        if amplitude > DEGENERATE_AMPLITUDE {
            tips.insert(i, doc.register_path(tip_path(amplitude, i < 0))?);
        }
    }

    if let Some(&tip) = tips.get(&end) {
        marker.push_animation(ride(tip, -coeff(end)?.phase(), end, opts));
    }

    let mut inner = Node::Shape(marker);
    for i in (1..=end).rev() {
        let c_pos = coeff(i)?;
        let c_neg = coeff(-i)?;

        // Positive-index group: its own guide level, then whatever hangs
        // below it (the marker at the chain end, the next pair otherwise).
        // It rides the rim of the sibling negative level.
        let mut pos = Group::new().with_id(format!("a{i}"));
        pos.push_child(Node::Group(level_group(i, c_pos, opts)));
        pos.push_child(inner);
        if let Some(&tip) = tips.get(&-i) {
            pos.push_animation(ride(tip, c_neg.phase(), i, opts));
        }

        // Negative-index group wraps the positive one. At index -1 it anchors
        // the whole apparatus on the DC centroid; further out it rides the
        // rim of the enclosing positive level.
        let mut neg = Group::new().with_id(format!("a-{i}"));
        if i == 1 {
            neg = neg.with_style(anchor_style.clone());
        } else if let Some(&tip) = tips.get(&(i - 1)) {
            neg.push_animation(ride(tip, -coeff(i - 1)?.phase(), i - 1, opts));
        }
        neg.push_child(Node::Group(level_group(-i, c_neg, opts)));
        neg.push_child(Node::Group(pos));

        inner = Node::Group(neg);
    }
    doc.push_child(inner);

    tracing::debug!(
        levels = end,
        trajectories = doc.registered_paths(),
        "built epicycle chain"
    );
    Ok(doc)
}

/// One frequency level: guide circle + vector, spinning with period
/// `cycle_seconds / |index|`, opposite directions for opposite signs. The
/// start angle counters the coefficient phase so the vector already points at
/// the correct partial sum at t = 0.
fn level_group(index: i32, c: Complex, opts: &ChainOptions) -> Group {
    let amplitude = c.abs();
    let phase_deg = c.phase().to_degrees();

    let mut group = Group::new().with_id(format!("c{index}"));
    group.push_child(Node::Shape(
        Shape::new(Geometry::Circle {
            r: amplitude,
            cx: None,
            cy: None,
        })
        .with_style(GUIDE_STYLE),
    ));
    group.push_child(Node::Shape(
        Shape::new(Geometry::Line {
            x1: 0.0,
            y1: 0.0,
            x2: amplitude,
            y2: 0.0,
        })
        .with_style(VECTOR_STYLE),
    ));

    let (from, to) = if index > 0 {
        (phase_deg + 360.0, phase_deg)
    } else {
        (phase_deg, phase_deg + 360.0)
    };
    group.push_animation(Animation::Transform {
        kind: TransformKind::Rotate,
        from: Some(format!("{} 0 0", fmt_f64(from))),
        to: Some(format!("{} 0 0", fmt_f64(to))),
        by: None,
        timing: Timing::looping(opts.cycle_seconds / f64::from(index.abs())),
    });
    group
}

/// Back-and-forth motion along a tip trajectory, pinned so the rider tracks
/// the rotating vector's tip. The trajectory starts on the circle's left, half
/// a turn from the vector's t = 0 tip, hence the 0.5 bias.
fn ride(path: PathId, signed_phase: f64, speed_index: i32, opts: &ChainOptions) -> Animation {
    let start = wrap_unit(signed_phase / TAU + 0.5);
    Animation::Motion {
        path,
        key_points: vec![start, 1.0, 0.0, start],
        key_times: vec![0.0, 1.0 - start, 1.0 - start, 1.0],
        calc_mode: Some("linear".to_string()),
        timing: Timing::looping(opts.cycle_seconds / f64::from(speed_index.abs())),
    }
}

/// Circle outline as path data: two half-turn arcs from the leftmost point.
/// Positive levels sweep one way, negative levels the other.
fn tip_path(r: f64, negative: bool) -> Shape {
    let mut d = PathData::new();
    d.move_to(-r, 0.0)
        .rel_arc_to(r, r, 0.0, true, negative, 2.0 * r, 0.0)
        .rel_arc_to(r, r, 0.0, true, negative, -2.0 * r, 0.0);
    Shape::new(Geometry::Path { d })
}

#[cfg(test)]
#[path = "../../tests/unit/epicycles/builder.rs"]
mod tests;

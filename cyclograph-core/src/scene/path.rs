use crate::foundation::math::fmt_f64;

/// SVG path data under construction.
///
/// A thin builder over the `d` attribute grammar. Coordinates go through the
/// crate-wide fixed-precision formatter, so identical geometry always prints
/// identically.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PathData {
    d: String,
}

impl PathData {
    /// Empty path data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt an existing `d` attribute verbatim.
    pub fn from_svg(d: impl Into<String>) -> Self {
        Self { d: d.into() }
    }

    /// `M x y`, absolute move.
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.verb("M", &[x, y])
    }

    /// `m dx dy`, relative move.
    pub fn rel_move_to(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.verb("m", &[dx, dy])
    }

    /// `L x y`, absolute line.
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.verb("L", &[x, y])
    }

    /// `l dx dy`, relative line.
    pub fn rel_line_to(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.verb("l", &[dx, dy])
    }

    /// `C x1 y1 x2 y2 x y`, absolute cubic.
    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> &mut Self {
        self.verb("C", &[x1, y1, x2, y2, x, y])
    }

    /// `A rx ry rot large-arc sweep x y`, absolute arc.
    pub fn arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> &mut Self {
        self.arc("A", rx, ry, rotation, large_arc, sweep, x, y)
    }

    /// `a rx ry rot large-arc sweep dx dy`, relative arc.
    pub fn rel_arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        dx: f64,
        dy: f64,
    ) -> &mut Self {
        self.arc("a", rx, ry, rotation, large_arc, sweep, dx, dy)
    }

    /// `Z`, closing the current subpath.
    pub fn close(&mut self) -> &mut Self {
        self.push_segment("Z".to_string());
        self
    }

    /// The accumulated `d` attribute value.
    pub fn as_str(&self) -> &str {
        &self.d
    }

    /// Whether no segments have been recorded.
    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    fn verb(&mut self, op: &str, coords: &[f64]) -> &mut Self {
        let mut seg = op.to_string();
        for &c in coords {
            seg.push(' ');
            seg.push_str(&fmt_f64(c));
        }
        self.push_segment(seg);
        self
    }

    #[allow(clippy::too_many_arguments)]
    fn arc(
        &mut self,
        op: &str,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> &mut Self {
        let seg = format!(
            "{op} {} {} {} {} {} {} {}",
            fmt_f64(rx),
            fmt_f64(ry),
            fmt_f64(rotation),
            u8::from(large_arc),
            u8::from(sweep),
            fmt_f64(x),
            fmt_f64(y),
        );
        self.push_segment(seg);
        self
    }

    fn push_segment(&mut self, seg: String) {
        if !self.d.is_empty() {
            self.d.push(' ');
        }
        self.d.push_str(&seg);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/path.rs"]
mod tests;

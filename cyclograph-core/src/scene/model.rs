use crate::{
    foundation::error::{CyclographError, CyclographResult},
    scene::path::PathData,
};

/// Opaque handle to a path primitive registered on a [`Document`].
///
/// Handles are assigned at registration time and are the identity used for
/// defs deduplication, so "already emitted" comparisons never depend on node
/// addresses or structural equality.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PathId(pub u32);

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A complete scene document.
///
/// The document is a pure data model: a canvas, an ordered tree of visible
/// nodes, and a registry of path primitives that animations may reference by
/// [`PathId`] without owning them. Registered paths may additionally be placed
/// into the visible tree via [`Node::PathRef`]; a registered path that is only
/// referenced ends up in the serializer's defs block.
pub struct Document {
    /// Canvas width in user units.
    pub width: f64,
    /// Canvas height in user units.
    pub height: f64,
    /// Visible tree, in paint order.
    pub children: Vec<Node>,
    paths: Vec<Shape>,
}

impl Document {
    /// Build an empty document over a canvas.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            children: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// Append a node to the visible tree.
    pub fn push_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Register a path primitive as a shared animation target.
    ///
    /// Only path geometry is accepted; this is what guarantees that every
    /// motion animation points at a path, not at an arbitrary primitive.
    pub fn register_path(&mut self, shape: Shape) -> CyclographResult<PathId> {
        if !matches!(shape.geometry, Geometry::Path { .. }) {
            return Err(CyclographError::validation(
                "motion targets must be path primitives",
            ));
        }
        let id = PathId(self.paths.len() as u32);
        self.paths.push(shape);
        Ok(id)
    }

    /// Look up a registered path by handle.
    ///
    /// Panics on a foreign handle; handles are only ever minted by
    /// [`Document::register_path`] on the same document.
    pub fn path(&self, id: PathId) -> &Shape {
        &self.paths[id.0 as usize]
    }

    /// Number of registered shared paths.
    pub fn registered_paths(&self) -> usize {
        self.paths.len()
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A node of the visible tree.
pub enum Node {
    /// A container (`<g>`).
    Group(Group),
    /// A primitive.
    Shape(Shape),
    /// A registered path placed into the tree at this position.
    PathRef(PathId),
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// A container node: ordered children plus attached animations.
pub struct Group {
    /// Explicit identity, if any. Groups without one are emitted without an
    /// `id` attribute.
    pub id: Option<String>,
    /// Raw presentation attributes appended to the opening tag.
    pub style: Option<String>,
    /// Ordered children.
    pub children: Vec<Node>,
    /// Animations applied to this container.
    pub animations: Vec<Animation>,
}

impl Group {
    /// Build an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the explicit identity.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the presentation attributes.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Append a child node.
    pub fn push_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Attach an animation.
    pub fn push_animation(&mut self, animation: Animation) {
        self.animations.push(animation);
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A primitive node: shared identity/style/animation fields plus geometry.
pub struct Shape {
    /// Explicit identity, if any. Primitives without one get a lazily
    /// assigned token during serialization.
    pub id: Option<String>,
    /// Raw presentation attributes appended to the opening tag.
    pub style: Option<String>,
    /// Animations applied to this primitive.
    pub animations: Vec<Animation>,
    /// Shape-specific geometry payload.
    pub geometry: Geometry,
}

impl Shape {
    /// Build a primitive from its geometry.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            style: None,
            animations: Vec::new(),
            geometry,
        }
    }

    /// Set the explicit identity.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the presentation attributes.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Attach an animation.
    pub fn push_animation(&mut self, animation: Animation) {
        self.animations.push(animation);
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Geometry payload of a [`Shape`], one variant per SVG primitive.
pub enum Geometry {
    /// `<rect>`.
    Rect {
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Left edge; defaults to 0 when absent.
        x: Option<f64>,
        /// Top edge; defaults to 0 when absent.
        y: Option<f64>,
        /// Horizontal corner radius.
        rx: Option<f64>,
        /// Vertical corner radius.
        ry: Option<f64>,
    },
    /// `<circle>`.
    Circle {
        /// Radius.
        r: f64,
        /// Center x; defaults to 0 when absent.
        cx: Option<f64>,
        /// Center y; defaults to 0 when absent.
        cy: Option<f64>,
    },
    /// `<ellipse>`.
    Ellipse {
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
        /// Center x; defaults to 0 when absent.
        cx: Option<f64>,
        /// Center y; defaults to 0 when absent.
        cy: Option<f64>,
    },
    /// `<line>`.
    Line {
        /// Start x.
        x1: f64,
        /// Start y.
        y1: f64,
        /// End x.
        x2: f64,
        /// End y.
        y2: f64,
    },
    /// `<polygon>`.
    Polygon {
        /// Vertices.
        points: Vec<(f64, f64)>,
    },
    /// `<polyline>`.
    Polyline {
        /// Vertices.
        points: Vec<(f64, f64)>,
    },
    /// `<path>`.
    Path {
        /// Path data.
        d: PathData,
    },
    /// `<text>`.
    Text {
        /// Character content.
        content: String,
        /// Per-glyph x positions.
        x: Vec<f64>,
        /// Per-glyph y positions.
        y: Vec<f64>,
        /// Per-glyph rotations in degrees.
        rotate: Vec<f64>,
        /// Target advance length.
        text_length: Option<f64>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Transform kind animated by [`Animation::Transform`].
pub enum TransformKind {
    /// `type="rotate"`.
    Rotate,
    /// `type="translate"`.
    Translate,
    /// `type="scale"`.
    Scale,
}

impl TransformKind {
    /// SVG attribute value for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rotate => "rotate",
            Self::Translate => "translate",
            Self::Scale => "scale",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Repeat policy of an animation.
pub enum Repeat {
    /// `repeatCount="indefinite"`.
    Indefinite,
    /// `repeatCount="<n>"`.
    Count(f64),
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Timing fields shared by all animation variants.
pub struct Timing {
    /// Duration in seconds.
    pub dur_secs: Option<f64>,
    /// Repeat policy; absent means play once.
    pub repeat: Option<Repeat>,
}

impl Timing {
    /// Indefinitely repeating timing with the given duration.
    pub fn looping(dur_secs: f64) -> Self {
        Self {
            dur_secs: Some(dur_secs),
            repeat: Some(Repeat::Indefinite),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// An animation attached to a node.
pub enum Animation {
    /// `<animate>` over a named attribute.
    Attribute {
        /// Animated attribute name.
        attribute: String,
        /// `from` value.
        from: Option<String>,
        /// `to` value.
        to: Option<String>,
        /// `by` value.
        by: Option<String>,
        /// Shared timing.
        timing: Timing,
    },
    /// `<animateMotion>` along a registered path.
    ///
    /// The target is a non-owning [`PathId`]; this is the one place the scene
    /// graph is not a pure tree.
    Motion {
        /// Referenced path primitive.
        path: PathId,
        /// `keyPoints` timeline.
        key_points: Vec<f64>,
        /// `keyTimes` timeline.
        key_times: Vec<f64>,
        /// `calcMode` value.
        calc_mode: Option<String>,
        /// Shared timing.
        timing: Timing,
    },
    /// `<animateTransform>` over the `transform` attribute.
    Transform {
        /// Transform kind.
        kind: TransformKind,
        /// `from` value.
        from: Option<String>,
        /// `to` value.
        to: Option<String>,
        /// `by` value.
        by: Option<String>,
        /// Shared timing.
        timing: Timing,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;

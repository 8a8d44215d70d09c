use std::collections::BTreeSet;

use crate::{
    foundation::math::fmt_f64,
    scene::model::{Animation, Document, Geometry, Group, Node, PathId, Repeat, Shape, Timing},
};

/// Serialize a document to SVG markup.
///
/// Single pass: pre-order traversal of the visible tree, then resolution of
/// the deferred defs block, then assembly (header, defs, visible elements,
/// footer). All pass state (indentation depth, the lazy-identity counter,
/// path tokens, the reference list and the emitted set) lives in a per-call
/// context, so the document is never mutated and repeated calls produce
/// byte-identical output.
#[tracing::instrument(skip(doc))]
pub fn write_svg(doc: &Document) -> String {
    WriteCtx::new(doc).run()
}

struct WriteCtx<'a> {
    doc: &'a Document,
    out: String,
    indent: usize,
    next_auto_id: u64,
    tokens: Vec<Option<String>>,
    referenced: Vec<PathId>,
    emitted: BTreeSet<PathId>,
}

impl<'a> WriteCtx<'a> {
    fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            out: String::new(),
            indent: 1,
            next_auto_id: 0,
            tokens: vec![None; doc.registered_paths()],
            referenced: Vec::new(),
            emitted: BTreeSet::new(),
        }
    }

    fn run(mut self) -> String {
        // Traverse the visible tree.
        for node in &self.doc.children {
            self.write_node(node);
        }
        let body = std::mem::take(&mut self.out);

        // Resolve defs: referenced paths that the visible tree never emitted,
        // each exactly once, in first-reference order.
        let mut pending: Vec<PathId> = Vec::new();
        for &id in &self.referenced {
            if !self.emitted.contains(&id) && !pending.contains(&id) {
                pending.push(id);
            }
        }
        let mut defs = String::new();
        if !pending.is_empty() {
            self.push_indented("<defs>\n");
            self.indent += 1;
            for id in pending {
                let token = self.path_token(id);
                self.write_shape(self.doc.path(id), token);
            }
            self.indent -= 1;
            self.push_indented("</defs>\n");
            defs = std::mem::take(&mut self.out);
        }

        // Assemble.
        let mut svg = format!(
            "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\" \
             xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n",
            fmt_f64(self.doc.width),
            fmt_f64(self.doc.height),
        );
        svg.push_str(&defs);
        svg.push_str(&body);
        svg.push_str("</svg>\n");
        svg
    }

    fn write_node(&mut self, node: &Node) {
        match node {
            Node::Group(group) => self.write_group(group),
            Node::Shape(shape) => {
                let token = shape
                    .id
                    .clone()
                    .unwrap_or_else(|| self.fresh_auto_id());
                self.write_shape(shape, token);
            }
            Node::PathRef(id) => {
                let token = self.path_token(*id);
                self.emitted.insert(*id);
                self.write_shape(self.doc.path(*id), token);
            }
        }
    }

    fn write_group(&mut self, group: &Group) {
        let mut open = "<g".to_string();
        if let Some(id) = &group.id {
            open.push_str(&format!(" id=\"{id}\""));
        }
        if let Some(style) = &group.style {
            open.push(' ');
            open.push_str(style);
        }
        open.push_str(">\n");
        self.push_indented(&open);

        self.indent += 1;
        for child in &group.children {
            self.write_node(child);
        }
        for animation in &group.animations {
            self.write_animation(animation);
        }
        self.indent -= 1;

        self.push_indented("</g>\n");
    }

    fn write_shape(&mut self, shape: &Shape, token: String) {
        let (tag, attrs) = geometry_markup(&shape.geometry);

        let mut open = format!("<{tag}{attrs} id=\"{token}\"");
        if let Some(style) = &shape.style {
            open.push(' ');
            open.push_str(style);
        }
        open.push_str(">\n");
        self.push_indented(&open);

        self.indent += 1;
        if let Geometry::Text { content, .. } = &shape.geometry {
            self.push_indented(content);
            self.out.push('\n');
        }
        for animation in &shape.animations {
            self.write_animation(animation);
        }
        self.indent -= 1;

        self.push_indented(&format!("</{tag}>\n"));
    }

    fn write_animation(&mut self, animation: &Animation) {
        match animation {
            Animation::Attribute {
                attribute,
                from,
                to,
                by,
                timing,
            } => {
                let mut open = format!("<animate attributeName=\"{attribute}\"");
                push_opt_attr(&mut open, "by", by.as_deref());
                push_opt_attr(&mut open, "from", from.as_deref());
                push_opt_attr(&mut open, "to", to.as_deref());
                open.push_str(&timing_attrs(timing));
                open.push_str(">\n");
                self.push_indented(&open);
                self.push_indented("</animate>\n");
            }
            Animation::Transform {
                kind,
                from,
                to,
                by,
                timing,
            } => {
                let mut open = format!(
                    "<animateTransform attributeName=\"transform\" type=\"{}\"",
                    kind.as_str()
                );
                push_opt_attr(&mut open, "by", by.as_deref());
                push_opt_attr(&mut open, "from", from.as_deref());
                push_opt_attr(&mut open, "to", to.as_deref());
                open.push_str(&timing_attrs(timing));
                open.push_str(">\n");
                self.push_indented(&open);
                self.push_indented("</animateTransform>\n");
            }
            Animation::Motion {
                path,
                key_points,
                key_times,
                calc_mode,
                timing,
            } => {
                let mut open = "<animateMotion".to_string();
                if !key_points.is_empty() {
                    open.push_str(&format!(" keyPoints=\"{}\"", join_timeline(key_points)));
                }
                if !key_times.is_empty() {
                    open.push_str(&format!(" keyTimes=\"{}\"", join_timeline(key_times)));
                }
                push_opt_attr(&mut open, "calcMode", calc_mode.as_deref());
                open.push_str(&timing_attrs(timing));
                open.push_str(">\n");
                self.push_indented(&open);

                let token = self.path_token(*path);
                self.referenced.push(*path);
                self.indent += 1;
                self.push_indented(&format!("<mpath xlink:href=\"#{token}\"/>\n"));
                self.indent -= 1;

                self.push_indented("</animateMotion>\n");
            }
        }
    }

    /// Token for a registered path: its explicit identity if it has one, a
    /// fresh lazy token otherwise. Assigned once per pass.
    fn path_token(&mut self, id: PathId) -> String {
        if let Some(token) = &self.tokens[id.0 as usize] {
            return token.clone();
        }
        let token = match &self.doc.path(id).id {
            Some(explicit) => explicit.clone(),
            None => self.fresh_auto_id(),
        };
        self.tokens[id.0 as usize] = Some(token.clone());
        token
    }

    fn fresh_auto_id(&mut self) -> String {
        let token = format!("e{}", self.next_auto_id);
        self.next_auto_id += 1;
        token
    }

    fn push_indented(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
        self.out.push_str(text);
    }
}

fn geometry_markup(geometry: &Geometry) -> (&'static str, String) {
    let mut attrs = String::new();
    let tag = match geometry {
        Geometry::Rect {
            width,
            height,
            x,
            y,
            rx,
            ry,
        } => {
            push_num_attr(&mut attrs, "width", Some(*width));
            push_num_attr(&mut attrs, "height", Some(*height));
            push_num_attr(&mut attrs, "x", *x);
            push_num_attr(&mut attrs, "y", *y);
            push_num_attr(&mut attrs, "rx", *rx);
            push_num_attr(&mut attrs, "ry", *ry);
            "rect"
        }
        Geometry::Circle { r, cx, cy } => {
            push_num_attr(&mut attrs, "r", Some(*r));
            push_num_attr(&mut attrs, "cx", *cx);
            push_num_attr(&mut attrs, "cy", *cy);
            "circle"
        }
        Geometry::Ellipse { rx, ry, cx, cy } => {
            push_num_attr(&mut attrs, "rx", Some(*rx));
            push_num_attr(&mut attrs, "ry", Some(*ry));
            push_num_attr(&mut attrs, "cx", *cx);
            push_num_attr(&mut attrs, "cy", *cy);
            "ellipse"
        }
        Geometry::Line { x1, y1, x2, y2 } => {
            push_num_attr(&mut attrs, "x1", Some(*x1));
            push_num_attr(&mut attrs, "y1", Some(*y1));
            push_num_attr(&mut attrs, "x2", Some(*x2));
            push_num_attr(&mut attrs, "y2", Some(*y2));
            "line"
        }
        Geometry::Polygon { points } => {
            attrs.push_str(&format!(" points=\"{}\"", join_points(points)));
            "polygon"
        }
        Geometry::Polyline { points } => {
            attrs.push_str(&format!(" points=\"{}\"", join_points(points)));
            "polyline"
        }
        Geometry::Path { d } => {
            if !d.is_empty() {
                attrs.push_str(&format!(" d=\"{}\"", d.as_str()));
            }
            "path"
        }
        Geometry::Text {
            x,
            y,
            rotate,
            text_length,
            ..
        } => {
            push_num_attr(&mut attrs, "textLength", *text_length);
            if !x.is_empty() {
                attrs.push_str(&format!(" x=\"{}\"", join_list(x)));
            }
            if !y.is_empty() {
                attrs.push_str(&format!(" y=\"{}\"", join_list(y)));
            }
            if !rotate.is_empty() {
                attrs.push_str(&format!(" rotate=\"{}\"", join_list(rotate)));
            }
            "text"
        }
    };
    (tag, attrs)
}

fn timing_attrs(timing: &Timing) -> String {
    let mut attrs = String::new();
    if let Some(secs) = timing.dur_secs {
        attrs.push_str(&format!(" dur=\"{}s\"", fmt_f64(secs)));
    }
    match timing.repeat {
        Some(Repeat::Indefinite) => attrs.push_str(" repeatCount=\"indefinite\""),
        Some(Repeat::Count(n)) => attrs.push_str(&format!(" repeatCount=\"{}\"", fmt_f64(n))),
        None => {}
    }
    attrs
}

fn push_opt_attr(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push_str(&format!(" {name}=\"{value}\""));
    }
}

fn push_num_attr(out: &mut String, name: &str, value: Option<f64>) {
    if let Some(value) = value {
        out.push_str(&format!(" {name}=\"{}\"", fmt_f64(value)));
    }
}

fn join_timeline(values: &[f64]) -> String {
    values.iter().map(|&v| fmt_f64(v)).collect::<Vec<_>>().join(";")
}

fn join_list(values: &[f64]) -> String {
    values.iter().map(|&v| fmt_f64(v)).collect::<Vec<_>>().join(", ")
}

fn join_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|&(x, y)| format!("{},{}", fmt_f64(x), fmt_f64(y)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/serialize/writer.rs"]
mod tests;

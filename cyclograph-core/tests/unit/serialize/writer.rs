use super::*;

use crate::scene::model::TransformKind;
use crate::scene::path::PathData;

fn motion(path: PathId) -> Animation {
    Animation::Motion {
        path,
        key_points: vec![0.25, 1.0, 0.0, 0.25],
        key_times: vec![0.0, 0.75, 0.75, 1.0],
        calc_mode: Some("linear".to_string()),
        timing: Timing::looping(20.0),
    }
}

fn circle_path() -> Shape {
    let mut d = PathData::new();
    d.move_to(-1.0, 0.0)
        .rel_arc_to(1.0, 1.0, 0.0, true, false, 2.0, 0.0)
        .rel_arc_to(1.0, 1.0, 0.0, true, false, -2.0, 0.0);
    Shape::new(Geometry::Path { d })
}

fn doc_with_motion() -> Document {
    let mut doc = Document::new(100.0, 50.0);
    let target = doc.register_path(circle_path()).unwrap();

    let mut rider = Shape::new(Geometry::Circle {
        r: 0.5,
        cx: Some(0.0),
        cy: Some(0.0),
    });
    rider.push_animation(motion(target));

    let mut group = Group::new().with_id("a1");
    group.push_child(Node::Shape(rider));
    doc.push_child(Node::Group(group));
    doc
}

#[test]
fn header_and_footer_frame_the_document() {
    let out = write_svg(&Document::new(100.0, 50.0));
    assert!(out.starts_with(
        "<svg width=\"100\" height=\"50\" xmlns=\"http://www.w3.org/2000/svg\""
    ));
    assert!(out.contains("xmlns:xlink=\"http://www.w3.org/1999/xlink\""));
    assert!(out.ends_with("</svg>\n"));
}

#[test]
fn lazy_identities_are_sequential_in_traversal_order() {
    let mut doc = Document::new(10.0, 10.0);
    doc.push_child(Node::Shape(Shape::new(Geometry::Line {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 0.0,
    })));
    doc.push_child(Node::Shape(Shape::new(Geometry::Circle {
        r: 1.0,
        cx: None,
        cy: None,
    })));

    let out = write_svg(&doc);
    let line_pos = out.find("id=\"e0\"").expect("first lazy id");
    let circle_pos = out.find("id=\"e1\"").expect("second lazy id");
    assert!(line_pos < circle_pos);
}

#[test]
fn identity_assignment_is_deterministic() {
    // Two structurally identical documents produce identical identity
    // sequences, and serializing one document twice changes nothing.
    let a = write_svg(&doc_with_motion());
    let b = write_svg(&doc_with_motion());
    assert_eq!(a, b);

    let doc = doc_with_motion();
    assert_eq!(write_svg(&doc), write_svg(&doc));
}

#[test]
fn unplaced_motion_target_lands_in_defs_once() {
    let mut doc = doc_with_motion();
    // A second motion over the same target must not duplicate the defs entry.
    let target = PathId(0);
    let mut second = Group::new().with_id("a2");
    second.push_animation(motion(target));
    doc.push_child(Node::Group(second));

    let out = write_svg(&doc);
    assert_eq!(out.matches("<defs>").count(), 1);
    assert_eq!(out.matches("<path").count(), 1);
    assert_eq!(out.matches("xlink:href=\"#").count(), 2);

    // Defs precede the visible tree.
    assert!(out.find("<defs>").unwrap() < out.find("<g id=\"a1\"").unwrap());

    // The href token matches the defs entry's identity.
    let href_start = out.find("xlink:href=\"#").unwrap() + "xlink:href=\"#".len();
    let token: String = out[href_start..]
        .chars()
        .take_while(|c| *c != '"')
        .collect();
    assert!(out.contains(&format!("<path d=\"M -1 0 a 1 1 0 1 0 2 0 a 1 1 0 1 0 -2 0\" id=\"{token}\"")));
}

#[test]
fn target_placed_in_tree_suppresses_defs() {
    let mut doc = doc_with_motion();
    doc.push_child(Node::PathRef(PathId(0)));

    let out = write_svg(&doc);
    assert!(!out.contains("<defs>"));
    assert_eq!(out.matches("<path").count(), 1);
}

#[test]
fn indentation_tracks_nesting_depth() {
    let out = write_svg(&doc_with_motion());
    assert!(out.contains("\n\t<g id=\"a1\">"));
    assert!(out.contains("\n\t\t<circle"));
    assert!(out.contains("\n\t\t\t<animateMotion"));
    assert!(out.contains("\n\t\t\t\t<mpath"));
}

#[test]
fn motion_markup_carries_timeline_attributes() {
    let out = write_svg(&doc_with_motion());
    assert!(out.contains("keyPoints=\"0.25;1;0;0.25\""));
    assert!(out.contains("keyTimes=\"0;0.75;0.75;1\""));
    assert!(out.contains("calcMode=\"linear\""));
    assert!(out.contains("dur=\"20s\""));
    assert!(out.contains("repeatCount=\"indefinite\""));
}

#[test]
fn transform_markup_matches_svg_grammar() {
    let mut group = Group::new().with_id("c1");
    group.push_animation(Animation::Transform {
        kind: TransformKind::Rotate,
        from: Some("405 0 0".to_string()),
        to: Some("45 0 0".to_string()),
        by: None,
        timing: Timing::looping(20.0),
    });
    let mut doc = Document::new(10.0, 10.0);
    doc.push_child(Node::Group(group));

    let out = write_svg(&doc);
    assert!(out.contains(
        "<animateTransform attributeName=\"transform\" type=\"rotate\" \
         from=\"405 0 0\" to=\"45 0 0\" dur=\"20s\" repeatCount=\"indefinite\">"
    ));
}

#[test]
fn remaining_primitives_and_animate_render() {
    let mut doc = Document::new(10.0, 10.0);

    let mut rect = Shape::new(Geometry::Rect {
        width: 4.0,
        height: 2.0,
        x: Some(1.0),
        y: None,
        rx: None,
        ry: None,
    });
    rect.push_animation(Animation::Attribute {
        attribute: "opacity".to_string(),
        from: Some("0".to_string()),
        to: Some("1".to_string()),
        by: None,
        timing: Timing {
            dur_secs: Some(2.0),
            repeat: Some(Repeat::Count(3.0)),
        },
    });
    doc.push_child(Node::Shape(rect));
    doc.push_child(Node::Shape(Shape::new(Geometry::Ellipse {
        rx: 2.0,
        ry: 1.0,
        cx: Some(5.0),
        cy: Some(5.0),
    })));
    doc.push_child(Node::Shape(Shape::new(Geometry::Polygon {
        points: vec![(0.0, 0.0), (1.0, 0.5), (0.0, 1.0)],
    })));
    doc.push_child(Node::Shape(Shape::new(Geometry::Polyline {
        points: vec![(0.0, 0.0), (2.0, 2.0)],
    })));
    doc.push_child(Node::Shape(Shape::new(Geometry::Text {
        content: "tip".to_string(),
        x: vec![1.0, 2.0],
        y: vec![3.0],
        rotate: vec![],
        text_length: None,
    })));

    let out = write_svg(&doc);
    assert!(out.contains("<rect width=\"4\" height=\"2\" x=\"1\" id=\"e0\">"));
    assert!(out.contains(
        "<animate attributeName=\"opacity\" from=\"0\" to=\"1\" dur=\"2s\" repeatCount=\"3\">"
    ));
    assert!(out.contains("<ellipse rx=\"2\" ry=\"1\" cx=\"5\" cy=\"5\" id=\"e1\">"));
    assert!(out.contains("<polygon points=\"0,0 1,0.5 0,1\" id=\"e2\">"));
    assert!(out.contains("<polyline points=\"0,0 2,2\" id=\"e3\">"));
    assert!(out.contains("<text x=\"1, 2\" y=\"3\" id=\"e4\">"));
    assert!(out.contains("\n\t\ttip\n"));
}

#[test]
fn explicit_identities_are_never_replaced() {
    let mut doc = Document::new(10.0, 10.0);
    doc.push_child(Node::Shape(
        Shape::new(Geometry::Circle {
            r: 1.0,
            cx: None,
            cy: None,
        })
        .with_id("marker"),
    ));
    let out = write_svg(&doc);
    assert!(out.contains("id=\"marker\""));
    assert!(!out.contains("id=\"e0\""));
}

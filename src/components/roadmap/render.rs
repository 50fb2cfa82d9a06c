use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::{EdgePath, NodeKind, PathSegment};
use super::scene::{Geometry, Label, LabelRole, Line, SceneGraph, Shape};

const BACKGROUND: &str = "#f8fafc";
const EDGE: &str = "#94a3b8";
const EDGE_DONE: &str = "#22c55e";
const TOPIC_FILL: &str = "#fef9c3";
const TOPIC_DONE_FILL: &str = "#bbf7d0";
const CATEGORY_FILL: &str = "#1e293b";
const SENTINEL_FILL: &str = "#6366f1";
const STROKE: &str = "#0f172a";
const STROKE_DONE: &str = "#15803d";
const LINE_HEIGHT: f64 = 16.0;

/// Paints a scene onto a cleared canvas: connectors, then nodes, then text.
pub fn paint(scene: &SceneGraph, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
	scene.lines().for_each(|line| draw_line(line, ctx));
	scene.shapes().for_each(|shape| draw_shape(shape, ctx));
	scene.labels().for_each(|label| draw_label(label, ctx));
}

fn draw_line(line: &Line, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(if line.completed { EDGE_DONE } else { EDGE });
	ctx.set_line_width(if line.completed { 3.0 } else { 2.0 });
	// Pending connectors are dashed.
	let dash = if line.completed {
		js_sys::Array::new()
	} else {
		js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0))
	};
	let _ = ctx.set_line_dash(&dash);

	ctx.begin_path();
	match &line.path {
		EdgePath::Line { from, to } => {
			ctx.move_to(from.x, from.y);
			ctx.line_to(to.x, to.y);
		}
		EdgePath::Curve(segments) => {
			for segment in segments {
				match *segment {
					PathSegment::MoveTo(p) => ctx.move_to(p.x, p.y),
					PathSegment::LineTo(p) => ctx.line_to(p.x, p.y),
					PathSegment::QuadTo { control, to } => {
						ctx.quadratic_curve_to(control.x, control.y, to.x, to.y)
					}
				}
			}
		}
	}
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_shape(shape: &Shape, ctx: &CanvasRenderingContext2d) {
	let fill = match (shape.kind, shape.completed) {
		(NodeKind::Category, _) => CATEGORY_FILL,
		(NodeKind::Start | NodeKind::Finish, _) => SENTINEL_FILL,
		(NodeKind::Topic, true) => TOPIC_DONE_FILL,
		(NodeKind::Topic, false) => TOPIC_FILL,
	};
	ctx.set_fill_style_str(fill);
	ctx.set_stroke_style_str(if shape.completed { STROKE_DONE } else { STROKE });
	ctx.set_line_width(2.0);

	ctx.begin_path();
	match shape.geometry {
		Geometry::Rect {
			x,
			y,
			width,
			height,
		} => ctx.rect(x, y, width, height),
		Geometry::Circle { cx, cy, radius } => {
			let _ = ctx.arc(cx, cy, radius, 0.0, 2.0 * PI);
		}
	}
	ctx.fill();
	ctx.stroke();
}

fn draw_label(label: &Label, ctx: &CanvasRenderingContext2d) {
	let (font, color) = match (label.role, label.kind) {
		(LabelRole::Checkmark, _) => ("bold 18px sans-serif", STROKE_DONE),
		(LabelRole::Caption, _) => ("italic 12px sans-serif", "#475569"),
		(LabelRole::Title, NodeKind::Category) => ("bold 15px sans-serif", "white"),
		(LabelRole::Title, NodeKind::Start | NodeKind::Finish) => ("bold 11px sans-serif", "white"),
		(LabelRole::Title, NodeKind::Topic) => ("14px sans-serif", STROKE),
	};
	ctx.set_font(font);
	ctx.set_fill_style_str(color);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	// Two-line labels straddle the anchor.
	let first_y = label.y - (label.lines.len() as f64 - 1.0) * LINE_HEIGHT / 2.0;
	for (i, text) in label.lines.iter().enumerate() {
		let _ = ctx.fill_text(text, label.x, first_y + i as f64 * LINE_HEIGHT);
	}
}

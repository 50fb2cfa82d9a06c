//! Backend-independent scene description of a laid-out roadmap.
//!
//! [`draw`] walks a [`Layout`] and feeds primitives to any [`SceneBuilder`];
//! [`SceneGraph`] is the recording builder the canvas painter consumes.

use super::config::WrapConfig;
use super::layout::{EdgePath, Layout, NodeKind, NodeShape, Position};
use super::progress::CompletionSet;

const CHECKMARK: &str = "\u{2713}";
const LABEL_GAP: f64 = 16.0;
const CAPTION_GAP: f64 = 14.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Geometry {
	/// Top-left corner plus size.
	Rect {
		x: f64,
		y: f64,
		width: f64,
		height: f64,
	},
	Circle {
		cx: f64,
		cy: f64,
		radius: f64,
	},
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
	pub geometry: Geometry,
	pub kind: NodeKind,
	pub completed: bool,
	pub topic_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
	pub path: EdgePath,
	pub completed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelRole {
	Title,
	Caption,
	Checkmark,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
	pub x: f64,
	pub y: f64,
	pub lines: Vec<String>,
	pub role: LabelRole,
	pub kind: NodeKind,
	pub completed: bool,
}

pub trait SceneBuilder {
	fn add_shape(&mut self, shape: Shape);
	fn add_line(&mut self, line: Line);
	fn add_label(&mut self, label: Label);
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneItem {
	Shape(Shape),
	Line(Line),
	Label(Label),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneGraph {
	pub width: f64,
	pub height: f64,
	pub items: Vec<SceneItem>,
}

impl SceneGraph {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			items: Vec::new(),
		}
	}

	pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
		self.items.iter().filter_map(|item| match item {
			SceneItem::Shape(shape) => Some(shape),
			_ => None,
		})
	}

	pub fn lines(&self) -> impl Iterator<Item = &Line> {
		self.items.iter().filter_map(|item| match item {
			SceneItem::Line(line) => Some(line),
			_ => None,
		})
	}

	pub fn labels(&self) -> impl Iterator<Item = &Label> {
		self.items.iter().filter_map(|item| match item {
			SceneItem::Label(label) => Some(label),
			_ => None,
		})
	}
}

impl SceneBuilder for SceneGraph {
	fn add_shape(&mut self, shape: Shape) {
		self.items.push(SceneItem::Shape(shape));
	}

	fn add_line(&mut self, line: Line) {
		self.items.push(SceneItem::Line(line));
	}

	fn add_label(&mut self, label: Label) {
		self.items.push(SceneItem::Label(label));
	}
}

pub fn render(layout: &Layout, completed: &CompletionSet, wrap: &WrapConfig) -> SceneGraph {
	let mut scene = SceneGraph::new(layout.width, layout.height);
	draw(layout, completed, wrap, &mut scene);
	log::debug!("Rendered {} scene items", scene.items.len());
	scene
}

/// Emits edges first, then one shape and its labels per node.
pub fn draw<B: SceneBuilder>(
	layout: &Layout,
	completed: &CompletionSet,
	wrap: &WrapConfig,
	builder: &mut B,
) {
	let is_done = |id: Option<&String>| id.is_some_and(|id| completed.contains(id));

	for edge in &layout.edges {
		builder.add_line(Line {
			path: edge.path.clone(),
			completed: is_done(edge.target_id.as_ref()),
		});
	}

	let mut previous_tag: Option<&str> = None;
	for node in &layout.nodes {
		let done = is_done(node.id.as_ref());
		builder.add_shape(Shape {
			geometry: geometry(layout.shape, node),
			kind: node.kind,
			completed: done,
			topic_id: node.id.clone(),
		});

		let label = |x: f64, y: f64, lines: Vec<String>, role: LabelRole| Label {
			x,
			y,
			lines,
			role,
			kind: node.kind,
			completed: done,
		};

		match layout.shape {
			NodeShape::Rect { width, height } => {
				builder.add_label(label(node.x, node.y, wrap_label(&node.title, wrap), LabelRole::Title));
				if done {
					let (cx, cy) = (node.x + width / 2.0 - LABEL_GAP, node.y - height / 2.0 + LABEL_GAP);
					builder.add_label(label(cx, cy, vec![CHECKMARK.into()], LabelRole::Checkmark));
				}
			}
			NodeShape::Circle { radius } => {
				if node.kind == NodeKind::Topic {
					let tag = node.tag.as_deref();
					if let Some(text) = tag.filter(|_| tag != previous_tag) {
						let caption_y = node.y - radius - CAPTION_GAP;
						builder.add_label(label(node.x, caption_y, vec![text.into()], LabelRole::Caption));
					}
					previous_tag = tag;
					let title_y = node.y + radius + LABEL_GAP;
					builder.add_label(label(node.x, title_y, wrap_label(&node.title, wrap), LabelRole::Title));
					if done {
						builder.add_label(label(node.x, node.y, vec![CHECKMARK.into()], LabelRole::Checkmark));
					}
				} else {
					builder.add_label(label(node.x, node.y, vec![node.title.clone()], LabelRole::Title));
				}
			}
		}
	}
}

fn geometry(shape: NodeShape, node: &Position) -> Geometry {
	match shape {
		NodeShape::Rect { width, height } => Geometry::Rect {
			x: node.x - width / 2.0,
			y: node.y - height / 2.0,
			width,
			height,
		},
		NodeShape::Circle { radius } => Geometry::Circle {
			cx: node.x,
			cy: node.y,
			radius,
		},
	}
}

/// Splits a long title into at most two lines at a word boundary. The first
/// line greedily takes leading words up to `max_line_chars`; the rest goes to
/// the second line unwrapped.
pub fn wrap_label(title: &str, config: &WrapConfig) -> Vec<String> {
	let words: Vec<&str> = title.split_whitespace().collect();
	let too_long = words.len() > config.max_words || title.chars().count() > config.max_line_chars;
	if !too_long || words.len() < 2 {
		return vec![title.to_string()];
	}

	let mut taken = 1;
	let mut width = words[0].chars().count();
	while taken < words.len() - 1 {
		let next = width + 1 + words[taken].chars().count();
		if next > config.max_line_chars {
			break;
		}
		width = next;
		taken += 1;
	}
	vec![words[..taken].join(" "), words[taken..].join(" ")]
}

//! Roadmap tree to 2D geometry.
//!
//! Both strategies are pure functions of the node tree and the config; the
//! output is rebuilt from scratch on every paint. Coordinates are canvas
//! pixels and every [`Position`] is the centre of its node.

mod serpentine;
mod tree;

pub use serpentine::layout_serpentine;
pub use tree::layout_tree;

use super::config::{LayoutStrategy, RoadmapConfig};
use super::types::Node;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	Category,
	Topic,
	Start,
	Finish,
}

impl NodeKind {
	pub fn is_clickable(self) -> bool {
		self == NodeKind::Topic
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Position {
	/// Topic id; `None` for categories and sentinels.
	pub id: Option<String>,
	pub title: String,
	pub kind: NodeKind,
	pub x: f64,
	pub y: f64,
	/// Enclosing category title, serpentine mode only.
	pub tag: Option<String>,
}

impl Position {
	pub fn center(&self) -> Point {
		Point::new(self.x, self.y)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
	MoveTo(Point),
	LineTo(Point),
	QuadTo { control: Point, to: Point },
}

#[derive(Clone, Debug, PartialEq)]
pub enum EdgePath {
	Line { from: Point, to: Point },
	Curve(Vec<PathSegment>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub from: Point,
	pub to: Point,
	pub path: EdgePath,
	/// Topic id of the node the edge leads into, if any.
	pub target_id: Option<String>,
}

impl Edge {
	pub fn line(from: Point, to: Point, target_id: Option<String>) -> Self {
		Self {
			from,
			to,
			path: EdgePath::Line { from, to },
			target_id,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeShape {
	Rect { width: f64, height: f64 },
	Circle { radius: f64 },
}

impl NodeShape {
	fn contains(self, center: Point, x: f64, y: f64) -> bool {
		let (dx, dy) = (x - center.x, y - center.y);
		match self {
			NodeShape::Rect { width, height } => dx.abs() <= width / 2.0 && dy.abs() <= height / 2.0,
			NodeShape::Circle { radius } => (dx * dx + dy * dy).sqrt() <= radius,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
	pub strategy: LayoutStrategy,
	pub shape: NodeShape,
	pub width: f64,
	pub height: f64,
	pub nodes: Vec<Position>,
	pub edges: Vec<Edge>,
}

impl Layout {
	/// Topmost clickable node under a canvas-space point.
	pub fn topic_at(&self, x: f64, y: f64) -> Option<&Position> {
		self.nodes
			.iter()
			.rev()
			.filter(|node| node.kind.is_clickable())
			.find(|node| self.shape.contains(node.center(), x, y))
	}

	#[cfg(test)]
	pub fn position_of(&self, topic_id: &str) -> Option<&Position> {
		self.nodes
			.iter()
			.find(|node| node.id.as_deref() == Some(topic_id))
	}
}

pub fn layout(content: &[Node], strategy: LayoutStrategy, config: &RoadmapConfig) -> Layout {
	let layout = match strategy {
		LayoutStrategy::Tree => layout_tree(content, &config.tree),
		LayoutStrategy::Serpentine => layout_serpentine(content, &config.serpentine),
	};
	log::debug!(
		"{strategy} layout: {} nodes, {} edges, {}x{}",
		layout.nodes.len(),
		layout.edges.len(),
		layout.width,
		layout.height
	);
	layout
}

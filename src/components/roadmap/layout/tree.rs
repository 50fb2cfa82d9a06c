use super::{Edge, Layout, NodeKind, NodeShape, Point, Position};
use crate::components::roadmap::config::{LayoutStrategy, TreeConfig};
use crate::components::roadmap::types::Node;

/// Root-down layout: each top-level section takes one row (plus one row per
/// level of children), children fan out symmetrically under their parent.
///
/// Sections too wide for the canvas are shifted right so the leftmost node
/// keeps `side_margin` clearance, and the canvas widens to the rightmost one.
pub fn layout_tree(content: &[Node], config: &TreeConfig) -> Layout {
	let mut builder = TreeBuilder {
		config,
		nodes: Vec::new(),
		edges: Vec::new(),
	};

	let mut cursor = config.top_margin;
	for section in content {
		cursor = builder.section(section, config.center_x, cursor);
		cursor += config.section_gap;
	}

	let half = config.node_width / 2.0;
	let (left, right) = builder
		.nodes
		.iter()
		.fold((f64::INFINITY, f64::NEG_INFINITY), |(l, r), n| {
			(l.min(n.x - half), r.max(n.x + half))
		});
	let shift = if left < config.side_margin {
		config.side_margin - left
	} else {
		0.0
	};
	if shift > 0.0 {
		builder.shift_right(shift);
	}

	Layout {
		strategy: LayoutStrategy::Tree,
		shape: NodeShape::Rect {
			width: config.node_width,
			height: config.node_height,
		},
		width: config.canvas_width.max(right + shift + config.side_margin),
		height: cursor + config.bottom_margin,
		nodes: builder.nodes,
		edges: builder.edges,
	}
}

struct TreeBuilder<'a> {
	config: &'a TreeConfig,
	nodes: Vec<Position>,
	edges: Vec<Edge>,
}

impl TreeBuilder<'_> {
	/// Places a section at `top` and returns the cursor below it.
	fn section(&mut self, node: &Node, x: f64, top: f64) -> f64 {
		self.place(node, x, top);
		let next_row = top + self.config.row_height;
		if node.children().is_empty() {
			next_row
		} else {
			self.children(node.children(), x, top, next_row)
		}
	}

	fn children(&mut self, children: &[Node], center_x: f64, parent_top: f64, top: f64) -> f64 {
		let gap = self.config.horizontal_gap;
		let start_x = center_x - (children.len() - 1) as f64 * gap / 2.0;
		let anchor = Point::new(center_x, parent_top + self.config.connector_offset);
		let mut bottom = top + self.config.row_height;

		for (i, child) in children.iter().enumerate() {
			let x = start_x + i as f64 * gap;
			self.edges.push(Edge::line(
				anchor,
				Point::new(x, top),
				child.topic_id().map(str::to_string),
			));
			self.place(child, x, top);
			if !child.children().is_empty() {
				let below = self.children(child.children(), x, top, top + self.config.row_height);
				bottom = bottom.max(below);
			}
		}
		bottom
	}

	fn shift_right(&mut self, dx: f64) {
		let moved = |p: Point| Point::new(p.x + dx, p.y);
		for node in &mut self.nodes {
			node.x += dx;
		}
		for edge in &mut self.edges {
			*edge = Edge::line(moved(edge.from), moved(edge.to), edge.target_id.take());
		}
	}

	fn place(&mut self, node: &Node, x: f64, top: f64) {
		let kind = match node {
			Node::Category { .. } => NodeKind::Category,
			Node::Topic { .. } => NodeKind::Topic,
		};
		self.nodes.push(Position {
			id: node.topic_id().map(str::to_string),
			title: node.title().to_string(),
			kind,
			x,
			y: top + self.config.node_height / 2.0,
			tag: None,
		});
	}
}

#[cfg(test)]
mod tests {
	use super::super::EdgePath;
	use super::super::fixtures::{category, topic};
	use super::*;

	#[test]
	fn children_fan_out_symmetrically_under_category() {
		let config = TreeConfig::default();
		let content = vec![category("Basics", vec![
			topic("a", "A"),
			topic("b", "B"),
			topic("c", "C"),
		])];
		let layout = layout_tree(&content, &config);

		let parent = &layout.nodes[0];
		assert_eq!(parent.kind, NodeKind::Category);
		assert_eq!(parent.x, 600.0);
		assert_eq!(parent.y, 80.0);

		let xs: Vec<f64> = layout.nodes[1..].iter().map(|n| n.x).collect();
		assert_eq!(xs, vec![350.0, 600.0, 850.0]);
		assert!(layout.nodes[1..].iter().all(|n| n.y == 200.0));
		assert_eq!(xs[1] - xs[0], xs[2] - xs[1]);
		assert_eq!(parent.x - xs[0], xs[2] - parent.x);

		assert_eq!(layout.edges.len(), 3);
		for (edge, x) in layout.edges.iter().zip(&xs) {
			assert_eq!(edge.from, Point::new(600.0, 90.0));
			assert_eq!(edge.to, Point::new(*x, 170.0));
		}
		let targets: Vec<_> = layout.edges.iter().map(|e| e.target_id.as_deref()).collect();
		assert_eq!(targets, vec![Some("a"), Some("b"), Some("c")]);
	}

	#[test]
	fn sections_advance_the_cursor_in_input_order() {
		let content = vec![
			topic("intro", "Intro"),
			category("Core", vec![topic("a", "A")]),
			topic("outro", "Outro"),
		];
		let layout = layout_tree(&content, &TreeConfig::default());
		let tops: Vec<(Option<&str>, f64)> = layout
			.nodes
			.iter()
			.map(|n| (n.id.as_deref(), n.y - 30.0))
			.collect();
		assert_eq!(tops, vec![
			(Some("intro"), 50.0),
			(None, 220.0),
			(Some("a"), 340.0),
			(Some("outro"), 510.0),
		]);
		assert_eq!(layout.height, 730.0);
		assert_eq!(layout.width, 1200.0);
	}

	#[test]
	fn single_child_sits_under_parent() {
		let content = vec![category("Solo", vec![topic("a", "A")])];
		let layout = layout_tree(&content, &TreeConfig::default());
		assert_eq!(layout.nodes[1].x, 600.0);
		assert_eq!(layout.height, 390.0);
	}

	#[test]
	fn nested_children_get_their_own_row() {
		let content = vec![category("Root", vec![
			category("Left", vec![topic("l1", "L1"), topic("l2", "L2")]),
			topic("r", "R"),
		])];
		let layout = layout_tree(&content, &TreeConfig::default());
		let l1 = layout.position_of("l1").unwrap();
		let l2 = layout.position_of("l2").unwrap();
		assert_eq!((l1.x, l1.y), (350.0, 320.0));
		assert_eq!((l2.x, l2.y), (600.0, 320.0));
		assert_eq!(layout.edges.len(), 4);
		assert_eq!(layout.edges[1].from, Point::new(475.0, 210.0));
		assert_eq!(layout.height, 510.0);
	}

	#[test]
	fn wide_sections_stay_on_the_canvas() {
		let config = TreeConfig::default();
		let children = (0..6).map(|i| topic(&format!("t{i}"), "T")).collect();
		let layout = layout_tree(&[category("Wide", children)], &config);
		let half = config.node_width / 2.0;

		for node in &layout.nodes {
			assert!(node.x - half >= config.side_margin, "{:?} clipped left", node.id);
			assert!(node.x + half <= layout.width - config.side_margin, "{:?} clipped right", node.id);
		}
		let xs: Vec<f64> = layout.nodes[1..].iter().map(|n| n.x).collect();
		assert_eq!(xs, vec![150.0, 400.0, 650.0, 900.0, 1150.0, 1400.0]);
		assert_eq!(layout.nodes[0].x, 775.0);
		assert_eq!(layout.width, 1550.0);

		for (edge, x) in layout.edges.iter().zip(&xs) {
			assert_eq!(edge.from, Point::new(775.0, 90.0));
			assert_eq!(edge.to, Point::new(*x, 170.0));
			assert_eq!(edge.path, EdgePath::Line {
				from: edge.from,
				to: edge.to
			});
		}
		let first = layout.topic_at(150.0, 200.0).unwrap();
		assert_eq!(first.id.as_deref(), Some("t0"));
	}

	#[test]
	fn empty_content_keeps_margins() {
		let layout = layout_tree(&[], &TreeConfig::default());
		assert!(layout.nodes.is_empty());
		assert_eq!(layout.height, 100.0);
	}
}

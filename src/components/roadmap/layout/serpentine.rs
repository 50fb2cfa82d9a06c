use super::{Edge, EdgePath, Layout, NodeKind, NodeShape, PathSegment, Point, Position};
use crate::components::roadmap::config::{LayoutStrategy, SerpentineConfig};
use crate::components::roadmap::types::Node;

/// Grid cell `(row, col)` of the node at `index` in traversal order. Odd rows
/// run right to left so consecutive indices stay adjacent.
pub fn grid_cell(index: usize, columns_per_row: usize) -> (usize, usize) {
	let columns = columns_per_row.max(1);
	let row = index / columns;
	let col = if row % 2 == 0 {
		index % columns
	} else {
		columns - 1 - index % columns
	};
	(row, col)
}

/// Snake layout: every topic in document order between a START and a FINISH
/// sentinel, laid out boustrophedon-style on a fixed grid.
pub fn layout_serpentine(content: &[Node], config: &SerpentineConfig) -> Layout {
	let columns = config.columns_per_row.max(1);

	let mut sequence = vec![sentinel(NodeKind::Start)];
	flatten_topics(content, None, &mut sequence);
	sequence.push(sentinel(NodeKind::Finish));

	let nodes: Vec<Position> = sequence
		.into_iter()
		.enumerate()
		.map(|(index, node)| {
			let (row, col) = grid_cell(index, columns);
			Position {
				x: config.padding + (col as f64 + 0.5) * config.column_width,
				y: config.padding + (row as f64 + 0.5) * config.row_height,
				..node
			}
		})
		.collect();

	let edges = nodes
		.windows(2)
		.enumerate()
		.map(|(index, pair)| connect(index, &pair[0], &pair[1], columns, config))
		.collect();

	let rows = nodes.len().div_ceil(columns);
	Layout {
		strategy: LayoutStrategy::Serpentine,
		shape: NodeShape::Circle {
			radius: config.node_radius,
		},
		width: columns as f64 * config.column_width + 2.0 * config.padding,
		height: rows as f64 * config.row_height + 2.0 * config.padding,
		nodes,
		edges,
	}
}

fn sentinel(kind: NodeKind) -> Position {
	let title = match kind {
		NodeKind::Start => "START",
		_ => "FINISH",
	};
	Position {
		id: None,
		title: title.into(),
		kind,
		x: 0.0,
		y: 0.0,
		tag: None,
	}
}

/// Collects topics depth-first, tagging each with its nearest category.
fn flatten_topics(nodes: &[Node], tag: Option<&str>, out: &mut Vec<Position>) {
	for node in nodes {
		match node {
			Node::Category { title, children } => flatten_topics(children, Some(title.as_str()), out),
			Node::Topic {
				id,
				title,
				children,
			} => {
				out.push(Position {
					id: Some(id.clone()),
					title: title.clone(),
					kind: NodeKind::Topic,
					x: 0.0,
					y: 0.0,
					tag: tag.map(str::to_string),
				});
				flatten_topics(children, tag, out);
			}
		}
	}
}

fn connect(
	index: usize,
	from: &Position,
	to: &Position,
	columns: usize,
	config: &SerpentineConfig,
) -> Edge {
	let (a, b) = (from.center(), to.center());
	let target_id = to.id.clone();
	let same_row = index / columns == (index + 1) / columns;
	if same_row || columns == 1 {
		return Edge::line(a, b, target_id);
	}

	// U-turn past the end of the row, bulging outward in the travel direction.
	let (row, _) = grid_cell(index, columns);
	let dir = if row % 2 == 0 { 1.0 } else { -1.0 };
	let outer_x = a.x + dir * config.column_width / 2.0;
	let r = config
		.corner_radius
		.min(config.column_width / 2.0)
		.min((b.y - a.y) / 2.0);

	let segments = vec![
		PathSegment::MoveTo(a),
		PathSegment::LineTo(Point::new(outer_x - dir * r, a.y)),
		PathSegment::QuadTo {
			control: Point::new(outer_x, a.y),
			to: Point::new(outer_x, a.y + r),
		},
		PathSegment::LineTo(Point::new(outer_x, b.y - r)),
		PathSegment::QuadTo {
			control: Point::new(outer_x, b.y),
			to: Point::new(outer_x - dir * r, b.y),
		},
		PathSegment::LineTo(b),
	];
	Edge {
		from: a,
		to: b,
		path: EdgePath::Curve(segments),
		target_id,
	}
}

#[cfg(test)]
mod tests {
	use super::super::fixtures::{category, topic};
	use super::*;

	fn config(columns_per_row: usize) -> SerpentineConfig {
		SerpentineConfig {
			columns_per_row,
			column_width: 100.0,
			row_height: 80.0,
			padding: 20.0,
			node_radius: 25.0,
			corner_radius: 10.0,
		}
	}

	fn seven_topics() -> Vec<Node> {
		vec![
			category("One", vec![topic("t0", "T0"), topic("t1", "T1"), topic("t2", "T2")]),
			category("Two", vec![topic("t3", "T3"), topic("t4", "T4")]),
			topic("t5", "T5"),
			topic("t6", "T6"),
		]
	}

	#[test]
	fn odd_rows_are_mirrored() {
		let layout = layout_serpentine(&seven_topics(), &config(3));
		// START occupies index 0, so topic 4 is node 5.
		assert_eq!(grid_cell(5, 3), (1, 0));
		let t4 = layout.position_of("t4").unwrap();
		assert_eq!(t4.y, 20.0 + 1.5 * 80.0);
		assert_eq!(t4.x, 20.0 + 0.5 * 100.0);
		let naive_x = 20.0 + (5 % 3) as f64 * 100.0 + 50.0;
		assert_ne!(t4.x, naive_x);
	}

	#[test]
	fn traversal_snakes_through_the_grid() {
		let cells: Vec<_> = (0..9).map(|i| grid_cell(i, 3)).collect();
		assert_eq!(cells, vec![
			(0, 0),
			(0, 1),
			(0, 2),
			(1, 2),
			(1, 1),
			(1, 0),
			(2, 0),
			(2, 1),
			(2, 2),
		]);
	}

	#[test]
	fn sentinels_wrap_the_flattened_topics() {
		let layout = layout_serpentine(&seven_topics(), &config(3));
		assert_eq!(layout.nodes.len(), 9);
		assert_eq!(layout.nodes[0].kind, NodeKind::Start);
		assert_eq!(layout.nodes[0].title, "START");
		assert_eq!(layout.nodes[8].kind, NodeKind::Finish);
		let ids: Vec<_> = layout.nodes[1..8]
			.iter()
			.map(|n| n.id.as_deref().unwrap())
			.collect();
		assert_eq!(ids, vec!["t0", "t1", "t2", "t3", "t4", "t5", "t6"]);
		let tags: Vec<_> = layout.nodes[1..8].iter().map(|n| n.tag.as_deref()).collect();
		assert_eq!(tags, vec![
			Some("One"),
			Some("One"),
			Some("One"),
			Some("Two"),
			Some("Two"),
			None,
			None,
		]);
	}

	#[test]
	fn canvas_size_follows_node_count() {
		let layout = layout_serpentine(&seven_topics(), &config(3));
		assert_eq!(layout.width, 3.0 * 100.0 + 40.0);
		assert_eq!(layout.height, 3.0 * 80.0 + 40.0);

		let layout = layout_serpentine(&seven_topics(), &config(4));
		assert_eq!(layout.height, 3.0 * 80.0 + 40.0);
		let layout = layout_serpentine(&[], &config(4));
		assert_eq!(layout.nodes.len(), 2);
		assert_eq!(layout.height, 80.0 + 40.0);
	}

	#[test]
	fn edges_follow_traversal_order() {
		let layout = layout_serpentine(&seven_topics(), &config(3));
		assert_eq!(layout.edges.len(), 8);
		for (edge, pair) in layout.edges.iter().zip(layout.nodes.windows(2)) {
			assert_eq!(edge.from, pair[0].center());
			assert_eq!(edge.to, pair[1].center());
			assert_eq!(edge.target_id, pair[1].id);
		}
		assert!(layout.edges[7].target_id.is_none());
	}

	#[test]
	fn row_transitions_turn_with_rounded_corners() {
		let layout = layout_serpentine(&seven_topics(), &config(3));
		assert!(matches!(layout.edges[0].path, EdgePath::Line { .. }));
		assert!(matches!(layout.edges[1].path, EdgePath::Line { .. }));

		// Index 2 -> 3 leaves row 0 on the right edge.
		let EdgePath::Curve(segments) = &layout.edges[2].path else {
			panic!("expected a curve between rows");
		};
		assert_eq!(segments.first(), Some(&PathSegment::MoveTo(Point::new(270.0, 60.0))));
		assert_eq!(segments.last(), Some(&PathSegment::LineTo(Point::new(270.0, 140.0))));
		assert!(segments.contains(&PathSegment::QuadTo {
			control: Point::new(320.0, 60.0),
			to: Point::new(320.0, 70.0),
		}));

		// Index 5 -> 6 leaves row 1 on the left edge.
		let EdgePath::Curve(segments) = &layout.edges[5].path else {
			panic!("expected a curve between rows");
		};
		assert!(segments.contains(&PathSegment::LineTo(Point::new(20.0, 210.0))));
	}

	#[test]
	fn single_column_uses_straight_vertical_edges() {
		let layout = layout_serpentine(&seven_topics(), &config(1));
		assert!(layout.nodes.iter().all(|n| n.x == 70.0));
		assert!(
			layout
				.edges
				.iter()
				.all(|e| matches!(e.path, EdgePath::Line { from, to } if from.x == to.x))
		);
	}
}

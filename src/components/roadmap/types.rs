use std::fmt;

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
	Beginner,
	Intermediate,
	Advanced,
}

impl Difficulty {
	pub fn as_str(self) -> &'static str {
		match self {
			Difficulty::Beginner => "beginner",
			Difficulty::Intermediate => "intermediate",
			Difficulty::Advanced => "advanced",
		}
	}
}

impl fmt::Display for Difficulty {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One node of a roadmap tree, tagged by `type` in the data file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
	Category {
		title: String,
		#[serde(default)]
		children: Vec<Node>,
	},
	Topic {
		id: String,
		title: String,
		#[serde(default)]
		children: Vec<Node>,
	},
}

impl Node {
	pub fn title(&self) -> &str {
		match self {
			Node::Category { title, .. } | Node::Topic { title, .. } => title,
		}
	}

	/// Topic id, `None` for categories.
	pub fn topic_id(&self) -> Option<&str> {
		match self {
			Node::Topic { id, .. } => Some(id),
			Node::Category { .. } => None,
		}
	}

	pub fn children(&self) -> &[Node] {
		match self {
			Node::Category { children, .. } | Node::Topic { children, .. } => children,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Roadmap {
	pub id: String,
	pub title: String,
	pub description: String,
	pub difficulty: Difficulty,
	pub content: Vec<Node>,
}

impl Roadmap {
	pub fn total_topics(&self) -> usize {
		count_topics(&self.content)
	}

	/// Looks up a topic anywhere in the tree.
	pub fn find_topic(&self, topic_id: &str) -> Option<&Node> {
		fn walk<'a>(nodes: &'a [Node], topic_id: &str) -> Option<&'a Node> {
			nodes.iter().find_map(|node| {
				if node.topic_id() == Some(topic_id) {
					Some(node)
				} else {
					walk(node.children(), topic_id)
				}
			})
		}
		walk(&self.content, topic_id)
	}
}

/// Counts every topic node at any depth; categories only contribute their
/// children.
pub fn count_topics(nodes: &[Node]) -> usize {
	nodes
		.iter()
		.map(|node| usize::from(node.topic_id().is_some()) + count_topics(node.children()))
		.sum()
}

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Geometry of the root-down tree layout.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
	pub center_x: f64,
	/// Minimum canvas width; wide sections grow the canvas past it.
	pub canvas_width: f64,
	/// Clearance kept between the outermost nodes and the canvas sides.
	pub side_margin: f64,
	pub top_margin: f64,
	pub bottom_margin: f64,
	pub row_height: f64,
	pub horizontal_gap: f64,
	pub section_gap: f64,
	pub node_width: f64,
	pub node_height: f64,
	/// Distance from a parent's top edge to where its connectors start.
	pub connector_offset: f64,
}

impl Default for TreeConfig {
	fn default() -> Self {
		Self {
			center_x: 600.0,
			canvas_width: 1200.0,
			side_margin: 50.0,
			top_margin: 50.0,
			bottom_margin: 50.0,
			row_height: 120.0,
			horizontal_gap: 250.0,
			section_gap: 50.0,
			node_width: 200.0,
			node_height: 60.0,
			connector_offset: 40.0,
		}
	}
}

/// Geometry of the boustrophedon grid layout.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SerpentineConfig {
	pub columns_per_row: usize,
	pub column_width: f64,
	pub row_height: f64,
	pub padding: f64,
	pub node_radius: f64,
	pub corner_radius: f64,
}

impl Default for SerpentineConfig {
	fn default() -> Self {
		Self {
			columns_per_row: 4,
			column_width: 220.0,
			row_height: 140.0,
			padding: 60.0,
			node_radius: 28.0,
			corner_radius: 24.0,
		}
	}
}

/// Label wrapping thresholds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WrapConfig {
	pub max_words: usize,
	pub max_line_chars: usize,
}

impl Default for WrapConfig {
	fn default() -> Self {
		Self {
			max_words: 3,
			max_line_chars: 18,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoadmapConfig {
	pub data_url: String,
	pub tree: TreeConfig,
	pub serpentine: SerpentineConfig,
	pub wrap: WrapConfig,
}

impl Default for RoadmapConfig {
	fn default() -> Self {
		Self {
			data_url: "data/roadmaps.json".into(),
			tree: TreeConfig::default(),
			serpentine: SerpentineConfig::default(),
			wrap: WrapConfig::default(),
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
	#[default]
	Tree,
	Serpentine,
}

impl LayoutStrategy {
	pub fn as_str(self) -> &'static str {
		match self {
			LayoutStrategy::Tree => "tree",
			LayoutStrategy::Serpentine => "serpentine",
		}
	}

	/// Parses a `layout` query value, falling back to the tree layout.
	pub fn from_query(value: Option<&str>) -> Self {
		match value.map(str::parse) {
			Some(Ok(strategy)) => strategy,
			Some(Err(other)) => {
				log::warn!("Unknown layout {other:?}, using tree");
				LayoutStrategy::Tree
			}
			None => LayoutStrategy::Tree,
		}
	}
}

impl FromStr for LayoutStrategy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"tree" => Ok(LayoutStrategy::Tree),
			"serpentine" => Ok(LayoutStrategy::Serpentine),
			_ => Err(s.to_string()),
		}
	}
}

impl fmt::Display for LayoutStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_overrides_only_named_fields() {
		let config: RoadmapConfig =
			serde_json::from_str(r#"{"serpentine": {"columns_per_row": 3}}"#).unwrap();
		assert_eq!(config.serpentine.columns_per_row, 3);
		assert_eq!(config.serpentine.column_width, 220.0);
		assert_eq!(config.tree, TreeConfig::default());
		assert_eq!(config.data_url, "data/roadmaps.json");
	}

	#[test]
	fn layout_query_falls_back_to_tree() {
		assert_eq!(LayoutStrategy::from_query(Some("Serpentine")), LayoutStrategy::Serpentine);
		assert_eq!(LayoutStrategy::from_query(Some("radial")), LayoutStrategy::Tree);
		assert_eq!(LayoutStrategy::from_query(None), LayoutStrategy::Tree);
		assert_eq!(LayoutStrategy::Serpentine.to_string(), "serpentine");
	}
}

use log::{debug, info, warn};

use super::config::{LayoutStrategy, RoadmapConfig};
use super::layout::{self, Layout};
use super::progress::{self, CompletionSet, KeyValueStore, Progress, ProgressStore};
use super::scene::{self, SceneGraph};
use super::types::Roadmap;

/// Contents of the open detail panel, rebuilt from the session on every open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicDetail {
	pub topic_id: String,
	pub title: String,
	pub description: String,
	pub completed: bool,
}

impl TopicDetail {
	pub fn action_label(&self) -> &'static str {
		if self.completed {
			"Mark as Incomplete"
		} else {
			"Mark as Complete"
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Panel {
	#[default]
	Idle,
	DetailOpen(TopicDetail),
}

impl Panel {
	pub fn is_open(&self) -> bool {
		matches!(self, Panel::DetailOpen(_))
	}

	pub fn detail(&self) -> Option<&TopicDetail> {
		match self {
			Panel::DetailOpen(detail) => Some(detail),
			Panel::Idle => None,
		}
	}
}

/// One open roadmap view: the data, its completion set, the current layout
/// and scene, and the detail panel state.
pub struct RoadmapSession<S> {
	roadmap: Roadmap,
	strategy: LayoutStrategy,
	config: RoadmapConfig,
	progress: ProgressStore<S>,
	completed: CompletionSet,
	layout: Layout,
	scene: SceneGraph,
	panel: Panel,
}

impl<S: KeyValueStore> RoadmapSession<S> {
	pub fn open(
		roadmap: Roadmap,
		strategy: LayoutStrategy,
		config: RoadmapConfig,
		store: S,
	) -> Self {
		let progress = ProgressStore::new(store);
		let completed = progress.load(&roadmap.id);
		info!(
			"Opened roadmap {} ({strategy}) with {} completed topics",
			roadmap.id,
			completed.len()
		);
		let layout = layout::layout(&roadmap.content, strategy, &config);
		let scene = scene::render(&layout, &completed, &config.wrap);
		Self {
			roadmap,
			strategy,
			config,
			progress,
			completed,
			layout,
			scene,
			panel: Panel::Idle,
		}
	}

	#[cfg(test)]
	pub fn completed(&self) -> &CompletionSet {
		&self.completed
	}

	pub fn is_completed(&self, topic_id: &str) -> bool {
		self.completed.contains(topic_id)
	}

	#[cfg(test)]
	pub fn layout(&self) -> &Layout {
		&self.layout
	}

	pub fn scene(&self) -> &SceneGraph {
		&self.scene
	}

	#[cfg(test)]
	pub fn panel(&self) -> &Panel {
		&self.panel
	}

	#[cfg(test)]
	pub fn store(&self) -> &S {
		self.progress.store()
	}

	pub fn progress(&self) -> Progress {
		Progress::of(&self.roadmap, &self.completed)
	}

	/// Handles a click in canvas space. Only topic nodes open the panel;
	/// anything else leaves the session untouched.
	pub fn click(&mut self, x: f64, y: f64) -> Option<&TopicDetail> {
		let topic_id = self.layout.topic_at(x, y)?.id.clone()?;
		self.open_detail(&topic_id)
	}

	pub fn open_detail(&mut self, topic_id: &str) -> Option<&TopicDetail> {
		let Some(node) = self.roadmap.find_topic(topic_id) else {
			warn!("No topic {topic_id} in roadmap {}", self.roadmap.id);
			return None;
		};
		let title = node.title().to_string();
		self.panel = Panel::DetailOpen(TopicDetail {
			topic_id: topic_id.to_string(),
			description: format!("Learn about {title} and master this topic."),
			title,
			completed: self.is_completed(topic_id),
		});
		self.panel.detail()
	}

	pub fn close_detail(&mut self) {
		self.panel = Panel::Idle;
	}

	/// Flips the open topic, persists, closes the panel and repaints.
	/// Returns the new completion state, or `None` when no panel was open.
	pub fn toggle_open_topic(&mut self) -> Option<bool> {
		let Panel::DetailOpen(detail) = std::mem::take(&mut self.panel) else {
			return None;
		};
		Some(self.toggle(&detail.topic_id))
	}

	fn toggle(&mut self, topic_id: &str) -> bool {
		self.completed = progress::toggle(std::mem::take(&mut self.completed), topic_id);
		let now_completed = self.is_completed(topic_id);
		debug!("Topic {topic_id} completed={now_completed}");
		if let Err(e) = self.progress.save(&self.roadmap.id, &self.completed) {
			warn!("Could not persist progress for {}: {e}", self.roadmap.id);
		}
		self.relayout();
		now_completed
	}

	/// Recomputes layout and scene from scratch.
	pub fn relayout(&mut self) {
		self.layout = layout::layout(&self.roadmap.content, self.strategy, &self.config);
		self.scene = scene::render(&self.layout, &self.completed, &self.config.wrap);
	}
}

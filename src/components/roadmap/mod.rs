mod component;
pub mod config;
pub mod data;
pub mod layout;
pub mod progress;
mod render;
pub mod scene;
pub mod state;
pub mod types;

pub use component::RoadmapCanvas;
pub use config::{LayoutStrategy, RoadmapConfig};
pub use types::Roadmap;

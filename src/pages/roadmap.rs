use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};
use log::{error, warn};

use crate::components::roadmap::data::{fetch_roadmaps, find_roadmap};
use crate::components::roadmap::{LayoutStrategy, Roadmap, RoadmapCanvas, RoadmapConfig};
use crate::error::{Error, Result};

async fn load_roadmap(id: Option<String>, url: &str) -> Result<Roadmap> {
	let id = id.ok_or(Error::MissingRoadmapId)?;
	let roadmaps = fetch_roadmaps(url).await?;
	find_roadmap(&roadmaps, &id).cloned()
}

/// Detail page for `/roadmap?id=<id>[&layout=tree|serpentine]`.
#[component]
pub fn RoadmapPage() -> impl IntoView {
	let query = use_query_map();
	let navigate = use_navigate();
	let (id, strategy) = query.with_untracked(|q| {
		(
			q.get("id"),
			LayoutStrategy::from_query(q.get("layout").as_deref()),
		)
	});

	let (roadmap, set_roadmap) = signal(None::<Roadmap>);
	let (load_error, set_load_error) = signal(None::<String>);

	spawn_local(async move {
		let config = RoadmapConfig::default();
		match load_roadmap(id, &config.data_url).await {
			Ok(loaded) => set_roadmap.set(Some(loaded)),
			Err(e @ (Error::MissingRoadmapId | Error::UnknownRoadmap { .. })) => {
				warn!("{e}, redirecting to the roadmap list");
				navigate("/", NavigateOptions {
					replace: true,
					..Default::default()
				});
			}
			Err(e) => {
				error!("Error loading roadmap: {e}");
				set_load_error.set(Some(e.to_string()));
			}
		}
	});

	view! {
		<main class="roadmap-page">
			<a href="/" class="back-link">"\u{2190} All roadmaps"</a>

			{move || load_error.get().map(|e| view! { <p class="load-error">"Could not load roadmap: "{e}</p> })}

			{move || {
				roadmap
					.get()
					.map(|roadmap| {
						view! {
							<header class="roadmap-header">
								<h1 id="roadmap-title">{roadmap.title.clone()}</h1>
								<p id="roadmap-description">{roadmap.description.clone()}</p>
							</header>
							<RoadmapCanvas roadmap=roadmap strategy=strategy />
						}
					})
			}}
		</main>
	}
}

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::components::roadmap::data::fetch_roadmaps;
use crate::components::roadmap::{Roadmap, RoadmapConfig};

/// One card on the homepage grid.
#[component]
fn RoadmapCard(roadmap: Roadmap) -> impl IntoView {
	let href = format!("/roadmap?id={}", roadmap.id);
	let topics = roadmap.total_topics();
	let difficulty = roadmap.difficulty.as_str();

	view! {
		<a href=href class="roadmap-card">
			<h3>{roadmap.title}</h3>
			<p>{roadmap.description}</p>
			<div class="roadmap-meta">
				<span class=format!("difficulty {difficulty}")>{difficulty}</span>
				<span>{format!("{topics} topics")}</span>
			</div>
		</a>
	}
}

/// Default Home Page: every roadmap in the data file.
#[component]
pub fn Home() -> impl IntoView {
	let (roadmaps, set_roadmaps) = signal(Vec::<Roadmap>::new());
	let (load_error, set_load_error) = signal(None::<String>);

	spawn_local(async move {
		let url = RoadmapConfig::default().data_url;
		match fetch_roadmaps(&url).await {
			Ok(loaded) => set_roadmaps.set(loaded),
			Err(e) => {
				error!("Error loading roadmaps: {e}");
				set_load_error.set(Some(e.to_string()));
			}
		}
	});

	view! {
		<main class="home">
			<header class="hero">
				<h1>"Learning Roadmaps"</h1>
				<p class="subtitle">"Pick a roadmap and track your progress topic by topic."</p>
			</header>

			{move || load_error.get().map(|e| view! { <p class="load-error">"Could not load roadmaps: "{e}</p> })}

			<div id="roadmap-grid" class="roadmap-grid">
				<For
					each=move || roadmaps.get()
					key=|roadmap| roadmap.id.clone()
					children=move |roadmap: Roadmap| view! { <RoadmapCard roadmap=roadmap /> }
				/>
			</div>
		</main>
	}
}

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::config::{LayoutStrategy, RoadmapConfig};
use super::progress::BrowserStorage;
use super::render;
use super::state::{Panel, RoadmapSession, TopicDetail};
use super::types::Roadmap;

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Roadmap canvas with progress badge and topic detail panel.
#[component]
pub fn RoadmapCanvas(
	roadmap: Roadmap,
	#[prop(default = LayoutStrategy::Tree)] strategy: LayoutStrategy,
	#[prop(optional)] config: Option<RoadmapConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let session = StoredValue::new_local(RoadmapSession::open(
		roadmap,
		strategy,
		config.unwrap_or_default(),
		BrowserStorage::new(),
	));
	let (panel, set_panel) = signal(Panel::Idle);
	let (progress, set_progress) = signal(session.with_value(|s| s.progress()));

	let repaint = move || {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		session.with_value(|s| {
			let scene = s.scene();
			canvas.set_width(scene.width.ceil() as u32);
			canvas.set_height(scene.height.ceil() as u32);
			match context_2d(&canvas) {
				Some(ctx) => render::paint(scene, &ctx),
				None => warn!("Canvas 2d context unavailable"),
			}
		});
	};

	Effect::new(move |_| repaint());

	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		// CSS may scale the canvas; hit-test in canvas pixels.
		let scale = |pixels: u32, css: f64| if css > 0.0 { pixels as f64 / css } else { 1.0 };
		let (x, y) = (
			(ev.client_x() as f64 - rect.left()) * scale(canvas.width(), rect.width()),
			(ev.client_y() as f64 - rect.top()) * scale(canvas.height(), rect.height()),
		);

		if let Some(detail) = session.try_update_value(|s| s.click(x, y).cloned()).flatten() {
			set_panel.set(Panel::DetailOpen(detail));
		}
	};

	let on_toggle = move |_: MouseEvent| {
		let toggled = session
			.try_update_value(|s| s.toggle_open_topic())
			.flatten();
		set_panel.set(Panel::Idle);
		if toggled.is_some() {
			set_progress.set(session.with_value(|s| s.progress()));
			repaint();
		}
	};

	let on_close = move |_: MouseEvent| {
		session.update_value(|s| s.close_detail());
		set_panel.set(Panel::Idle);
	};

	let is_open = move || panel.with(Panel::is_open);
	let detail_field = move |f: fn(&TopicDetail) -> String| {
		move || panel.with(|p| p.detail().map(f).unwrap_or_default())
	};

	view! {
		<div class="progress">
			<span id="progress-badge" class="progress-badge">{move || progress.get().badge()}</span>
			<span id="progress-text" class="progress-text">{move || progress.get().summary()}</span>
		</div>

		<canvas
			node_ref=canvas_ref
			class="roadmap-canvas"
			data-layout=strategy.as_str()
			on:click=on_click
			style="display: block; margin: 0 auto; max-width: 100%;"
		/>

		<div class="modal-overlay" class:active=is_open on:click=on_close />
		<div class="node-modal" class:active=is_open>
			<div class="modal-header">
				<h3>{detail_field(|d| d.title.clone())}</h3>
				<button class="close-modal" on:click=on_close>"\u{00d7}"</button>
			</div>
			<div class="modal-content">
				<p>{detail_field(|d| d.description.clone())}</p>
				<button
					class="toggle-complete"
					class:completed=move || panel.with(|p| p.detail().is_some_and(|d| d.completed))
					on:click=on_toggle
				>
					{detail_field(|d| d.action_label().to_string())}
				</button>
			</div>
		</div>
	}
}

use serde::Deserialize;
use wasm_bindgen::JsCast;

use super::types::Roadmap;
use crate::error::{Error, Result};

#[derive(Deserialize)]
struct Catalog {
	roadmaps: Vec<Roadmap>,
}

pub fn parse_roadmaps(text: &str) -> Result<Vec<Roadmap>> {
	let catalog: Catalog = serde_json::from_str(text)?;
	Ok(catalog.roadmaps)
}

pub fn find_roadmap<'a>(roadmaps: &'a [Roadmap], id: &str) -> Result<&'a Roadmap> {
	roadmaps
		.iter()
		.find(|r| r.id == id)
		.ok_or_else(|| Error::UnknownRoadmap { id: id.to_string() })
}

/// Fetches and parses the roadmap data file. One request, no retry.
pub async fn fetch_roadmaps(url: &str) -> Result<Vec<Roadmap>> {
	let fetch_error = |message: String| Error::Fetch {
		url: url.to_string(),
		message,
	};
	let window = web_sys::window().ok_or_else(|| fetch_error("no window".into()))?;

	let response = wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|e| fetch_error(format!("{e:?}")))?;
	let response: web_sys::Response = response
		.dyn_into()
		.map_err(|_| fetch_error("not a Response".into()))?;
	if !response.ok() {
		return Err(fetch_error(format!("HTTP {}", response.status())));
	}

	let promise = response.text().map_err(|e| fetch_error(format!("{e:?}")))?;
	let text = wasm_bindgen_futures::JsFuture::from(promise)
		.await
		.map_err(|e| fetch_error(format!("{e:?}")))?
		.as_string()
		.ok_or_else(|| fetch_error("body is not text".into()))?;

	let roadmaps = parse_roadmaps(&text)?;
	log::info!("Loaded {} roadmaps from {url}", roadmaps.len());
	Ok(roadmaps)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::roadmap::types::Difficulty;

	const DATA: &str = r#"{
		"roadmaps": [
			{
				"id": "frontend",
				"title": "Frontend Developer",
				"description": "Browsers and beyond",
				"difficulty": "beginner",
				"content": [
					{"type": "category", "title": "Internet", "children": [
						{"type": "topic", "id": "http", "title": "How does HTTP work?"},
						{"type": "topic", "id": "dns", "title": "DNS"}
					]},
					{"type": "topic", "id": "html", "title": "HTML"}
				]
			},
			{
				"id": "devops",
				"title": "DevOps",
				"description": "Ship it",
				"difficulty": "advanced",
				"content": []
			}
		]
	}"#;

	#[test]
	fn parses_catalog() {
		let roadmaps = parse_roadmaps(DATA).unwrap();
		assert_eq!(roadmaps.len(), 2);
		assert_eq!(roadmaps[0].difficulty, Difficulty::Beginner);
		assert_eq!(roadmaps[0].total_topics(), 3);
		assert_eq!(roadmaps[1].total_topics(), 0);
	}

	#[test]
	fn finds_by_id() {
		let roadmaps = parse_roadmaps(DATA).unwrap();
		assert_eq!(find_roadmap(&roadmaps, "devops").unwrap().title, "DevOps");
		assert!(matches!(
			find_roadmap(&roadmaps, "nope"),
			Err(Error::UnknownRoadmap { id }) if id == "nope"
		));
	}

	#[test]
	fn malformed_data_is_a_json_error() {
		assert!(matches!(parse_roadmaps("{\"roadmaps\": 3}"), Err(Error::Json(_))));
		assert!(matches!(parse_roadmaps("<html>"), Err(Error::Json(_))));
		let bad_difficulty = DATA.replace("\"advanced\"", "\"expert\"");
		assert!(parse_roadmaps(&bad_difficulty).is_err());
	}
}

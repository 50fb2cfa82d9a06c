//! Crate-wide error type.

/// Failures surfaced by the data provider, the persistence provider and
/// page routing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The roadmap data file could not be fetched.
	#[error("failed to fetch {url}: {message}")]
	Fetch {
		/// Location that was requested.
		url: String,
		/// Network or HTTP status failure as reported by the browser.
		message: String,
	},
	/// The roadmap data file is not valid JSON of the expected shape.
	#[error("roadmap data JSON error: {0}")]
	Json(#[from] serde_json::Error),
	/// The page was opened without an `id` query parameter.
	#[error("missing roadmap id")]
	MissingRoadmapId,
	/// No roadmap in the data file has the requested id.
	#[error("unknown roadmap: {id}")]
	UnknownRoadmap {
		/// The `id` query value that matched nothing.
		id: String,
	},
	/// The persistence provider rejected a write.
	#[error("storage error: {message}")]
	Storage {
		/// Reason given by the backing store.
		message: String,
	},
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

use url::Url;
use vantage_core::Record;

/// Everything that can go wrong between asking the data endpoint for
/// records and having a `Vec<Record>` in hand. The variants keep transport,
/// decode, and shape failures apart so the surface can show the right
/// message, and the display text of [`FetchError::Status`] carries the
/// status code through to the user.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
	#[error("network error while loading data: {0}")]
	Network(#[source] reqwest::Error),
	#[error("the data endpoint returned HTTP {0}")]
	Status(u16),
	#[error("the response body is not valid JSON: {0}")]
	Parse(#[source] serde_json::Error),
	#[error("the response body is not an array of objects")]
	Shape,
}

/// Fetches the record array from the data endpoint. A non-success status is
/// an error even when the body is readable, and a fetch that fails leaves
/// the caller's session untouched because no records are produced.
pub async fn fetch_records(url: &Url) -> Result<Vec<Record>, FetchError> {
	let response = reqwest::get(url.clone()).await.map_err(FetchError::Network)?;
	let status = response.status();
	if !status.is_success() {
		return Err(FetchError::Status(status.as_u16()));
	}
	let body = response.text().await.map_err(FetchError::Network)?;
	parse_records(&body)
}

/// Fetches on a throwaway single threaded runtime, for callers that are not
/// already async.
pub fn fetch_records_blocking(url: &Url) -> Result<Vec<Record>, FetchError> {
	tokio::runtime::Builder::new()
		.basic_scheduler()
		.enable_all()
		.build()
		.unwrap()
		.block_on(fetch_records(url))
}

/// Decodes a response body into records. Parsing is separate from fetching
/// so the decode and shape rules are testable without a server.
pub fn parse_records(body: &str) -> Result<Vec<Record>, FetchError> {
	let value: serde_json::Value = serde_json::from_str(body).map_err(FetchError::Parse)?;
	records_from_value(value)
}

/// Requires the top level to be an array and every element to be an object.
/// An empty array is fine, but a top level object, scalar, or an array with
/// a non-object element is a shape error.
pub fn records_from_value(value: serde_json::Value) -> Result<Vec<Record>, FetchError> {
	let values = match value {
		serde_json::Value::Array(values) => values,
		_ => return Err(FetchError::Shape),
	};
	values
		.into_iter()
		.map(|value| match value {
			serde_json::Value::Object(record) => Ok(record),
			_ => Err(FetchError::Shape),
		})
		.collect()
}

#[test]
fn test_parse_records() {
	let records = parse_records(r#"[{"city":"A","sales":10},{"city":"B"}]"#).unwrap();
	assert_eq!(records.len(), 2);
	assert_eq!(records[0].get("sales"), Some(&serde_json::json!(10)));
	assert!(parse_records("[]").unwrap().is_empty());
}

#[test]
fn test_parse_records_rejects_bad_json() {
	assert!(matches!(
		parse_records("{not json"),
		Err(FetchError::Parse(_))
	));
}

#[test]
fn test_parse_records_rejects_bad_shapes() {
	assert!(matches!(
		parse_records(r#"{"city":"A"}"#),
		Err(FetchError::Shape)
	));
	assert!(matches!(parse_records("3"), Err(FetchError::Shape)));
	assert!(matches!(
		parse_records(r#"[{"city":"A"},3]"#),
		Err(FetchError::Shape)
	));
}

#[test]
fn test_status_error_carries_the_code() {
	assert_eq!(
		FetchError::Status(500).to_string(),
		"the data endpoint returned HTTP 500"
	);
}

use hyper::{header, Body, Response, StatusCode};
use vantage_util::error::Result;

pub mod charts;
pub mod dashboard;
pub mod filters;
pub mod health;
pub mod load;
pub mod table_columns;

pub fn json_response<T>(value: &T) -> Result<Response<Body>>
where
	T: serde::Serialize,
{
	let body = serde_json::to_string(value)?;
	let response = Response::builder()
		.status(StatusCode::OK)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(body))
		.unwrap();
	Ok(response)
}

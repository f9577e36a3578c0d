use crate::{error::Error, provider, Context};
use hyper::{body::to_bytes, header, Body, Request, Response, StatusCode};
use std::sync::Arc;
use url::Url;
use vantage_util::error::Result;

#[derive(serde::Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct Action {
	url: String,
}

pub(crate) async fn post(
	context: &Arc<Context>,
	mut request: Request<Body>,
) -> Result<Response<Body>> {
	let data = match to_bytes(request.body_mut()).await {
		Ok(data) => data,
		Err(_) => return Err(Error::BadRequest.into()),
	};
	let action: Action = match serde_json::from_slice(&data) {
		Ok(action) => action,
		Err(_) => return Err(Error::BadRequest.into()),
	};
	let url: Url = match action.url.parse() {
		Ok(url) => url,
		Err(_) => return Err(Error::BadRequest.into()),
	};
	// Only one load may be in flight at a time. The guard clears the flag
	// again however the fetch ends.
	{
		let mut state = match context.state.lock() {
			Ok(state) => state,
			Err(_) => return Err(Error::ServiceUnavailable.into()),
		};
		if state.loading {
			return Err(Error::Conflict.into());
		}
		state.loading = true;
	}
	let _guard = LoadGuard {
		context: context.clone(),
	};
	let records = match provider::fetch_records(&url).await {
		Ok(records) => records,
		// A failed fetch leaves the previous records and filters in place.
		Err(error) => {
			let response = Response::builder()
				.status(StatusCode::BAD_GATEWAY)
				.header(header::CONTENT_TYPE, "text/plain")
				.body(Body::from(error.to_string()))
				.unwrap();
			return Ok(response);
		}
	};
	let mut state = match context.state.lock() {
		Ok(state) => state,
		Err(_) => return Err(Error::ServiceUnavailable.into()),
	};
	let dashboard = state.session.load(records);
	drop(state);
	super::json_response(&dashboard)
}

struct LoadGuard {
	context: Arc<Context>,
}

impl Drop for LoadGuard {
	fn drop(&mut self) {
		if let Ok(mut state) = self.context.state.lock() {
			state.loading = false;
		}
	}
}

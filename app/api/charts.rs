use crate::{error::Error, Context};
use hyper::{body::to_bytes, header, Body, Request, Response, StatusCode};
use vantage_charts::ChartKind;
use vantage_util::error::Result;

#[derive(serde::Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
struct Action {
	x_field: String,
	y_field: String,
	kind: ChartKind,
}

pub(crate) async fn post(context: &Context, mut request: Request<Body>) -> Result<Response<Body>> {
	let data = match to_bytes(request.body_mut()).await {
		Ok(data) => data,
		Err(_) => return Err(Error::BadRequest.into()),
	};
	let action: Action = match serde_json::from_slice(&data) {
		Ok(action) => action,
		Err(_) => return Err(Error::BadRequest.into()),
	};
	let state = match context.state.lock() {
		Ok(state) => state,
		Err(_) => return Err(Error::ServiceUnavailable.into()),
	};
	let spec = state
		.session
		.custom_chart(&action.x_field, &action.y_field, action.kind);
	drop(state);
	match spec {
		Ok(spec) => super::json_response(&spec),
		// The message is the user-visible validation error.
		Err(error) => {
			let response = Response::builder()
				.status(StatusCode::BAD_REQUEST)
				.header(header::CONTENT_TYPE, "text/plain")
				.body(Body::from(error.to_string()))
				.unwrap();
			Ok(response)
		}
	}
}
